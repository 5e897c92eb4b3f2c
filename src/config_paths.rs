//! Configuration paths for csvgrid
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/csvgrid/`
//! - Windows: `%APPDATA%\csvgrid\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "csvgrid";

/// File name prefix of the rolling log
pub const LOG_FILE_PREFIX: &str = "csvgrid.log";

/// Base config directory
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/csvgrid`
///   - Else: `~/.config/csvgrid`
///
/// Windows:
///   - `%APPDATA%\csvgrid`
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

/// `~/.config/csvgrid/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/csvgrid/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Newest log file in `logs_dir`.
///
/// Daily rotation names files `csvgrid.log.YYYY-MM-DD`, which sort by date.
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;
    newest_log_in(&logs_dir).or_else(|| Some(logs_dir.join(LOG_FILE_PREFIX)))
}

fn newest_log_in(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX))
        })
        .max()
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = ensure_config_dir()?.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_base() {
        if let (Some(base), Some(file), Some(logs)) = (config_dir(), config_file(), logs_dir()) {
            assert!(base.ends_with(APP_DIR));
            assert_eq!(file.parent(), Some(base.as_path()));
            assert_eq!(logs.parent(), Some(base.as_path()));
        }
    }

    #[test]
    fn test_newest_log_picks_latest_date() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "csvgrid.log.2026-01-07",
            "csvgrid.log.2026-02-01",
            "other.txt",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let newest = newest_log_in(dir.path()).unwrap();
        assert!(newest.ends_with("csvgrid.log.2026-02-01"));
    }
}
