//! Flat, path-keyed file store.
//!
//! The authoritative collection is a single map from normalized path to
//! record. Hierarchy is implied by the keys; the display tree is derived on
//! demand (see `file_tree`). Subtree rename/move/delete rewrite every key
//! under the affected folder before returning, and every validation happens
//! before the first mutation.

use std::collections::BTreeMap;

use super::file_record::FileRecord;
use super::path_key;

pub const ALLOWED_EXTENSIONS: &[&str] = &["md", "json", "sh", "txt"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileStoreError {
    #[error("'{0}' already exists")]
    DuplicatePath(String),
    #[error("'{0}' does not exist")]
    NotFound(String),
    #[error("'{0}' is not a folder")]
    NotADirectory(String),
    #[error("'{0}' is a folder")]
    IsADirectory(String),
    #[error("invalid name '{0}' (allowed extensions: .md, .json, .sh, .txt)")]
    InvalidName(String),
    #[error("cannot move '{path}' into its own subtree '{target}'")]
    MoveIntoDescendant { path: String, target: String },
}

pub type Result<T> = std::result::Result<T, FileStoreError>;

/// Every path rewritten by a rename or move, root of the subtree first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathChange {
    pub from: String,
    pub to: String,
    pub moved: Vec<(String, String)>,
}

impl PathChange {
    /// Where `path` lives after the change, if it was part of it.
    pub fn resolve(&self, path: &str) -> Option<String> {
        path_key::rebase(path, &self.from, &self.to)
    }

    pub fn is_noop(&self) -> bool {
        self.moved.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileStore {
    records: BTreeMap<String, FileRecord>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from persisted `(path, record)` pairs. The key wins over
    /// the record's own `path`; empty keys are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, FileRecord)>) -> Self {
        let mut records = BTreeMap::new();
        for (key, mut record) in entries {
            let key = path_key::normalize(&key);
            if key.is_empty() {
                tracing::warn!("dropping persisted record with empty path");
                continue;
            }
            record.path = key.clone();
            records.insert(key, record.normalized());
        }
        Self { records }
    }

    pub fn to_entries(&self) -> Vec<(String, FileRecord)> {
        self.records
            .iter()
            .map(|(path, record)| (path.clone(), record.clone()))
            .collect()
    }

    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = (String, FileRecord)>) {
        *self = Self::from_entries(entries);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.records.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.records.contains_key(path)
    }

    pub fn is_dir(&self, path: &str) -> bool {
        path.is_empty() || self.records.get(path).is_some_and(|r| r.is_directory)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }

    pub fn files(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values().filter(|r| !r.is_directory)
    }

    /// Records strictly beneath `path`, in key order.
    pub fn descendants<'a>(&'a self, path: &str) -> impl Iterator<Item = &'a FileRecord> + 'a {
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}{}", path_key::SEPARATOR)
        };
        self.records
            .range(prefix.clone()..)
            .take_while(move |(key, _)| key.starts_with(&prefix))
            .map(|(_, record)| record)
    }

    pub fn create(&mut self, record: FileRecord) -> Result<&FileRecord> {
        let record = record.normalized();
        let path = record.path.clone();
        if path.is_empty() {
            return Err(FileStoreError::InvalidName(path));
        }
        validate_name(&record.name, record.is_directory)?;
        if self.records.contains_key(&path) {
            return Err(FileStoreError::DuplicatePath(path));
        }
        let mut ancestor = path_key::parent(&path);
        while let Some(dir) = ancestor {
            if self.records.get(dir).is_some_and(|r| !r.is_directory) {
                return Err(FileStoreError::NotADirectory(dir.to_string()));
            }
            ancestor = path_key::parent(dir);
        }

        tracing::debug!(path = %path, is_dir = record.is_directory, "create");
        Ok(self.records.entry(path).or_insert(record))
    }

    pub fn read(&self, path: &str) -> Result<&str> {
        let record = self
            .records
            .get(path)
            .ok_or_else(|| FileStoreError::NotFound(path.to_string()))?;
        if record.is_directory {
            return Err(FileStoreError::IsADirectory(path.to_string()));
        }
        Ok(&record.content)
    }

    /// Replaces a file's content. Returns whether anything changed.
    pub fn write(&mut self, path: &str, content: &str) -> Result<bool> {
        let record = self
            .records
            .get_mut(path)
            .ok_or_else(|| FileStoreError::NotFound(path.to_string()))?;
        if record.is_directory {
            return Err(FileStoreError::IsADirectory(path.to_string()));
        }
        if record.content == content {
            return Ok(false);
        }
        record.content = content.to_string();
        Ok(true)
    }

    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<PathChange> {
        let record = self
            .records
            .get(path)
            .ok_or_else(|| FileStoreError::NotFound(path.to_string()))?;
        if record.name == new_name {
            return Ok(PathChange {
                from: path.to_string(),
                to: path.to_string(),
                moved: Vec::new(),
            });
        }
        if new_name.contains(path_key::SEPARATOR) {
            return Err(FileStoreError::InvalidName(new_name.to_string()));
        }
        validate_name(new_name, record.is_directory)?;

        let new_path = path_key::child(path_key::parent(path).unwrap_or(""), new_name);
        self.relocate(path, &new_path)
    }

    pub fn move_to(&mut self, path: &str, target_dir: &str) -> Result<PathChange> {
        if !self.records.contains_key(path) {
            return Err(FileStoreError::NotFound(path.to_string()));
        }
        if !target_dir.is_empty() {
            let target = self
                .records
                .get(target_dir)
                .ok_or_else(|| FileStoreError::NotFound(target_dir.to_string()))?;
            if !target.is_directory {
                return Err(FileStoreError::NotADirectory(target_dir.to_string()));
            }
        }
        if target_dir == path || path_key::is_ancestor(path, target_dir) {
            return Err(FileStoreError::MoveIntoDescendant {
                path: path.to_string(),
                target: target_dir.to_string(),
            });
        }

        let new_path = path_key::child(target_dir, path_key::name(path));
        self.relocate(path, &new_path)
    }

    /// Removes `path` and everything beneath it. Returns the removed paths.
    /// An implicit folder (no record, only descendants) may be deleted too.
    pub fn delete(&mut self, path: &str) -> Result<Vec<String>> {
        let mut removed = Vec::new();
        if self.records.contains_key(path) {
            removed.push(path.to_string());
        }
        if !path.is_empty() {
            removed.extend(self.descendants(path).map(|r| r.path.clone()));
        }
        if removed.is_empty() {
            return Err(FileStoreError::NotFound(path.to_string()));
        }
        for key in &removed {
            self.records.remove(key);
        }
        tracing::debug!(path = %path, count = removed.len(), "delete");
        Ok(removed)
    }

    fn relocate(&mut self, from: &str, to: &str) -> Result<PathChange> {
        if self.records.contains_key(to) {
            return Err(FileStoreError::DuplicatePath(to.to_string()));
        }

        let mut moved = vec![(from.to_string(), to.to_string())];
        for record in self.descendants(from) {
            if let Some(new_path) = path_key::rebase(&record.path, from, to) {
                moved.push((record.path.clone(), new_path));
            }
        }
        // Implicit folders may already hold records at the destination.
        if let Some((_, clash)) = moved
            .iter()
            .skip(1)
            .find(|(_, new_path)| self.records.contains_key(new_path))
        {
            return Err(FileStoreError::DuplicatePath(clash.clone()));
        }

        let mut taken = Vec::with_capacity(moved.len());
        for (old_path, new_path) in &moved {
            if let Some(mut record) = self.records.remove(old_path) {
                record.relocate(new_path.clone());
                taken.push(record);
            }
        }
        for record in taken {
            self.records.insert(record.path.clone(), record);
        }

        tracing::debug!(from = %from, to = %to, count = moved.len(), "relocate");
        Ok(PathChange {
            from: from.to_string(),
            to: to.to_string(),
            moved,
        })
    }
}

fn validate_name(name: &str, is_directory: bool) -> Result<()> {
    if name.trim().is_empty() || name.contains(path_key::SEPARATOR) {
        return Err(FileStoreError::InvalidName(name.to_string()));
    }
    if is_directory {
        return Ok(());
    }
    match path_key::extension(name) {
        Some(ext)
            if !ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)) =>
        {
            Err(FileStoreError::InvalidName(name.to_string()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_store.rs"]
mod tests;
