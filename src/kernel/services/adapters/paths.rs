//! Application directories.
//!
//! - macOS: ~/Library/Application Support/labmark/{state,logs}, config beside them
//! - Linux: $XDG_DATA_HOME/labmark (~/.local/share/labmark), config in
//!   $XDG_CONFIG_HOME/labmark (~/.config/labmark)
//! - Windows: %APPDATA%\labmark

use std::path::{Path, PathBuf};

const APP_NAME: &str = "labmark";
const STATE_DIR: &str = "state";
const LOG_DIR: &str = "logs";
const CONFIG_FILE: &str = "config.json";

fn get_app_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs_path_macos()
    }

    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_DATA_HOME", ".local/share")
    }

    #[cfg(target_os = "windows")]
    {
        dirs_path_windows()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

fn get_app_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_CONFIG_HOME", ".config")
    }

    #[cfg(not(target_os = "linux"))]
    {
        get_app_data_dir()
    }
}

#[cfg(target_os = "macos")]
fn dirs_path_macos() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join("Library/Application Support")
            .join(APP_NAME)
    })
}

#[cfg(target_os = "linux")]
fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var(var) {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join(APP_NAME));
        }
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(home_fallback).join(APP_NAME))
}

#[cfg(target_os = "windows")]
fn dirs_path_windows() -> Option<PathBuf> {
    std::env::var("APPDATA")
        .ok()
        .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

/// Default location of persisted workspace state.
pub fn get_state_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(STATE_DIR))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

pub fn get_config_path() -> Option<PathBuf> {
    get_app_config_dir().map(|p| p.join(CONFIG_FILE))
}

fn ensure_dir(dir: Option<PathBuf>, what: &str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Cannot determine {what} directory"),
        )
    })?;
    ensure_dir_at(&dir)?;
    Ok(dir)
}

pub(crate) fn ensure_dir_at(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn ensure_state_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_state_dir(), "state")
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "log")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
