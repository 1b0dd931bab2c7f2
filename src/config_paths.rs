//! Where codepad keeps `config.yaml` and its log files.
//!
//! Windows uses `%APPDATA%\codepad`. Everywhere else follows XDG and falls
//! back to `~/.config/codepad` when `XDG_CONFIG_HOME` is unset.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "codepad";
const CONFIG_FILE: &str = "config.yaml";
const LOGS_DIR: &str = "logs";

/// Per-user codepad directory, or None when no home can be found
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = env::var_os("APPDATA").map(PathBuf::from);

    #[cfg(not(target_os = "windows"))]
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

    base.map(|base| base.join(APP_DIR))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Target of the daily rolling log file
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOGS_DIR))
}

fn create(path: PathBuf) -> Result<PathBuf, String> {
    fs::create_dir_all(&path).map_err(|e| describe(&path, e))?;
    Ok(path)
}

fn describe(path: &Path, err: std::io::Error) -> String {
    format!("Failed to create directory {}: {}", path.display(), err)
}

/// Create the codepad directory if needed
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    config_dir()
        .ok_or_else(|| "No config directory available".to_string())
        .and_then(create)
}

/// Create the logs directory (and its parent) if needed
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    create(ensure_config_dir()?.join(LOGS_DIR))
}
