//! Loads `AppConfig` from `config.json`.
//!
//! A missing file means defaults. A malformed file is logged and ignored.

use std::path::{Path, PathBuf};

use super::paths::{get_config_path, get_state_dir};
use crate::kernel::services::ports::AppConfig;

pub fn load_config() -> AppConfig {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => AppConfig::default(),
    }
}

pub fn load_config_from(path: &Path) -> AppConfig {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return AppConfig::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
            return AppConfig::default();
        }
    };
    match serde_json::from_str(&data) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config malformed, using defaults");
            AppConfig::default()
        }
    }
}

/// Configured data dir, or the platform state dir, or `./.labmark` as a last resort.
pub fn resolve_data_dir(config: &AppConfig) -> PathBuf {
    config
        .data_dir
        .clone()
        .or_else(get_state_dir)
        .unwrap_or_else(|| PathBuf::from(".labmark"))
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/config.rs"]
mod tests;
