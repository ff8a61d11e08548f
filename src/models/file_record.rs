use serde::{Deserialize, Serialize};

use super::path_key;

/// A single file or folder in the virtual store.
///
/// `name` always mirrors the last segment of `path`, and folders never carry
/// content. The store re-derives both on insert, so hand-built records cannot
/// break either rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_directory: bool,
}

impl FileRecord {
    pub fn file(path: &str, content: impl Into<String>) -> Self {
        let path = path_key::normalize(path);
        Self {
            name: path_key::name(&path).to_string(),
            path,
            content: content.into(),
            is_directory: false,
        }
    }

    pub fn directory(path: &str) -> Self {
        let path = path_key::normalize(path);
        Self {
            name: path_key::name(&path).to_string(),
            path,
            content: String::new(),
            is_directory: true,
        }
    }

    pub(crate) fn normalized(mut self) -> Self {
        self.path = path_key::normalize(&self.path);
        self.name = path_key::name(&self.path).to_string();
        if self.is_directory {
            self.content.clear();
        }
        self
    }

    pub(crate) fn relocate(&mut self, new_path: String) {
        self.name = path_key::name(&new_path).to_string();
        self.path = new_path;
    }
}
