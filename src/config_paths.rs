//! Where livetype keeps its files
//!
//! Only two things live on disk: `config.yaml` with the playback tunables and
//! the `logs/` directory written by [`crate::tracing::init`].

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "livetype";

/// Directory holding `config.yaml` and `logs/`.
///
/// `$XDG_CONFIG_HOME/livetype` when that variable is set, `~/.config/livetype`
/// otherwise, and `%APPDATA%\livetype` on Windows. `None` if no home
/// directory can be found.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// Playback config read by [`crate::config::PlaybackConfig::load`]
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Rolling log files
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
