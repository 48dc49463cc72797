use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "rectclick";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn settings_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.config_dir().join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("rectclick_settings.json"))
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("rectclick.log")
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|pd| pd.data_local_dir().join("rectclick.log"))
                .unwrap_or_else(|| PathBuf::from("rectclick.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_named_for_the_app() {
        assert_eq!(
            AppDirs::settings_path().file_name().unwrap(),
            "settings.json"
        );
        assert_eq!(AppDirs::log_path().file_name().unwrap(), "rectclick.log");
    }
}
