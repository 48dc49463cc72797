use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::session::SessionResult;

pub const MASTER_FILE_NAME: &str = "all.txt";
const SEPARATOR: &str = "----------";

/// Writes per-player and aggregate result files into one directory.
#[derive(Debug, Clone)]
pub struct ResultsWriter {
    dir: PathBuf,
}

impl ResultsWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn player_file(&self, player_name: &str) -> PathBuf {
        let safe: String = player_name
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(format!("{safe}_results.txt"))
    }

    pub fn master_file(&self) -> PathBuf {
        self.dir.join(MASTER_FILE_NAME)
    }

    /// Overwrites the player's file and appends to the master file.
    /// Returns the two paths written.
    pub fn write(&self, result: &SessionResult) -> AppResult<(PathBuf, PathBuf)> {
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir).map_err(|source| AppError::Persist {
                path: self.dir.clone(),
                source,
            })?;
        }

        let player_path = self.player_file(&result.player_name);
        fs::write(&player_path, player_record(result)).map_err(|source| AppError::Persist {
            path: player_path.clone(),
            source,
        })?;

        let master_path = self.master_file();
        append(&master_path, &master_record(result)).map_err(|source| AppError::Persist {
            path: master_path.clone(),
            source,
        })?;

        info!(
            player = %player_path.display(),
            master = %master_path.display(),
            "results saved"
        );
        Ok((player_path, master_path))
    }
}

fn append(path: &Path, record: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(record.as_bytes())
}

pub fn player_record(r: &SessionResult) -> String {
    format!(
        "User: {}\nScore: {}\nClicks: {}\nMisclicks: {}\nTimeouts: {}\n",
        r.player_name, r.score, r.clicks, r.misclicks, r.timeouts
    )
}

pub fn master_record(r: &SessionResult) -> String {
    format!(
        "User: {}\nScore: {}, Clicks: {}, Misclicks: {}, Timeouts: {}\n{SEPARATOR}\n",
        r.player_name, r.score, r.clicks, r.misclicks, r.timeouts
    )
}
