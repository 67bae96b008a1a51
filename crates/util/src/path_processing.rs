use std::env;
use std::path::PathBuf;

use dirs_next::{config_dir, data_local_dir, home_dir};

/// Directory name used under the platform config/data roots.
pub const APP_DIR_NAME: &str = "lockpick";

/// Environment variable overriding where the log file is written.
pub const LOG_PATH_ENV: &str = "LOCKPICK_LOG_PATH";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/").or_else(|| p.strip_prefix("~\\")) {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// `<config_dir>/lockpick`, falling back to the working directory.
pub fn app_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

/// Log file location: `$LOCKPICK_LOG_PATH`, else `<data_local_dir>/lockpick/lockpick.log`.
pub fn default_log_path() -> PathBuf {
    if let Ok(path) = env::var(LOG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("lockpick.log")
}
