use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_BASE_BRANCH: &str = "main";
pub const DEFAULT_LOG_FILTER: &str = "labmark=info";

/// Process-level configuration, read once at startup from `config.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Where persisted state lives. `None` means the platform data dir.
    pub data_dir: Option<PathBuf>,
    pub history_limit: usize,
    pub base_branch: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/config.rs"]
mod tests;
