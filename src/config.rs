use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::error::AppResult;

pub const DEFAULT_FRAME_MS: u64 = 16;

/// Application settings; session parameters are always asked interactively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub results_dir: PathBuf,
    pub frame_ms: u64,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("."),
            frame_ms: DEFAULT_FRAME_MS,
            verbose: false,
        }
    }
}

/// Values given on the command line; `None` keeps the stored setting.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub results_dir: Option<PathBuf>,
    pub frame_ms: Option<u64>,
    pub verbose: bool,
}

impl Settings {
    pub fn with_overrides(mut self, o: &SettingsOverrides) -> Self {
        if let Some(dir) = &o.results_dir {
            self.results_dir = dir.clone();
        }
        if let Some(ms) = o.frame_ms {
            self.frame_ms = ms.max(1);
        }
        self.verbose |= o.verbose;
        self
    }
}

pub trait SettingsStore {
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings) -> AppResult<()>;
}

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::settings_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Settings {
        let Ok(bytes) = fs::read(&self.path) else {
            return Settings::default();
        };
        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(mut settings) => {
                settings.frame_ms = settings.frame_ms.max(1);
                settings
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable settings");
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(settings)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
