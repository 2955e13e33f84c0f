use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "spelldrill";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `$HOME/.local/state/spelldrill`, or the platform data dir without `HOME`.
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    pub fn db_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("words.db"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("spelldrill.log"))
    }

    /// Exports land in the user's download folder when there is one.
    pub fn export_dir() -> PathBuf {
        directories::UserDirs::new()
            .and_then(|u| u.download_dir().map(|d| d.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_state_dir() {
        if let Some(state) = AppDirs::state_dir() {
            assert!(state.ends_with(APP_NAME));
            assert_eq!(AppDirs::db_path().unwrap().parent(), Some(state.as_path()));
            assert_eq!(AppDirs::log_path().unwrap().parent(), Some(state.as_path()));
        }
    }
}
