use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::FileStore;

/// One item to install in an archive, at its path verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ArchiveEntry {
    Directory { path: String },
    File { path: String, content: String },
}

impl ArchiveEntry {
    pub fn path(&self) -> &str {
        match self {
            ArchiveEntry::Directory { path } | ArchiveEntry::File { path, .. } => path,
        }
    }

    /// Every record of the store, in path order.
    pub fn collect(store: &FileStore) -> Vec<ArchiveEntry> {
        store
            .iter()
            .map(|record| {
                if record.is_directory {
                    ArchiveEntry::Directory {
                        path: record.path.clone(),
                    }
                } else {
                    ArchiveEntry::File {
                        path: record.path.clone(),
                        content: record.content.clone(),
                    }
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBlob {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveError {
    #[error("nothing to archive")]
    Empty,
    #[error("archive write failed: {0}")]
    Write(String),
}

pub trait ArchiveWriter: Send + Sync {
    fn write(&self, entries: &[ArchiveEntry]) -> Result<ArchiveBlob, ArchiveError>;
}
