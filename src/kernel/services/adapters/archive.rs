use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::kernel::services::ports::{ArchiveBlob, ArchiveEntry, ArchiveError, ArchiveWriter};

pub const DEFAULT_BUNDLE_NAME: &str = "lab-bundle.json.gz";

/// Writes entries as one gzip-compressed JSON document.
#[derive(Debug, Clone)]
pub struct GzipBundleWriter {
    file_name: String,
    level: Compression,
}

impl Default for GzipBundleWriter {
    fn default() -> Self {
        Self::new(DEFAULT_BUNDLE_NAME)
    }
}

impl GzipBundleWriter {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            level: Compression::default(),
        }
    }
}

impl ArchiveWriter for GzipBundleWriter {
    fn write(&self, entries: &[ArchiveEntry]) -> Result<ArchiveBlob, ArchiveError> {
        if entries.is_empty() {
            return Err(ArchiveError::Empty);
        }
        let json = serde_json::to_vec(entries).map_err(|e| ArchiveError::Write(e.to_string()))?;

        let mut encoder = GzEncoder::new(Vec::with_capacity(json.len() / 2), self.level);
        encoder
            .write_all(&json)
            .map_err(|e| ArchiveError::Write(e.to_string()))?;
        let bytes = encoder
            .finish()
            .map_err(|e| ArchiveError::Write(e.to_string()))?;

        tracing::debug!(
            entries = entries.len(),
            raw = json.len(),
            compressed = bytes.len(),
            "bundle written"
        );
        Ok(ArchiveBlob {
            file_name: self.file_name.clone(),
            bytes,
        })
    }
}
