//! Persisted workspace state over a [`KeyValueStore`].
//!
//! Loading never fails: a missing key means its default, a malformed one is
//! logged and treated as missing.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::kernel::effect::PersistKey;
use crate::kernel::services::ports::config::AppConfig;
use crate::kernel::services::ports::storage::{KeyValueStore, Result};
use crate::kernel::services::ports::UserSettings;
use crate::kernel::state::AppState;
use crate::models::{ExpansionState, FileRecord, FileStore, Submission, SubmissionHistory};

#[derive(Debug, Clone, Default)]
pub struct PersistedState {
    pub files: FileStore,
    pub current_file: Option<String>,
    pub settings: UserSettings,
    pub expansion: ExpansionState,
    /// Most recent first.
    pub history: Vec<Submission>,
}

fn read_key<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: PersistKey) -> Option<T> {
    let name = key.storage_key();
    let raw = match storage.get(name) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key = name, error = %e, "failed to read persisted key");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key = name, error = %e, "malformed persisted key, using default");
            None
        }
    }
}

fn write_key<T: Serialize + ?Sized>(
    storage: &mut dyn KeyValueStore,
    key: PersistKey,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    storage.set(key.storage_key(), &raw)
}

impl PersistedState {
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        let files = read_key::<Vec<(String, FileRecord)>>(storage, PersistKey::Files)
            .map(FileStore::from_entries)
            .unwrap_or_default();
        let current_file = read_key::<Option<String>>(storage, PersistKey::CurrentFile)
            .flatten()
            .filter(|path| {
                let live = files.read(path).is_ok();
                if !live {
                    tracing::warn!(path = %path, "persisted open file is gone, dropping it");
                }
                live
            });

        let state = Self {
            current_file,
            settings: read_key(storage, PersistKey::UserSettings).unwrap_or_default(),
            expansion: read_key(storage, PersistKey::FolderExpansionState).unwrap_or_default(),
            history: read_key(storage, PersistKey::PreviousSubmissions).unwrap_or_default(),
            files,
        };
        tracing::info!(
            files = state.files.len(),
            submissions = state.history.len(),
            "persisted state loaded"
        );
        state
    }

    pub fn into_app_state(self, config: &AppConfig) -> AppState {
        AppState {
            files: self.files,
            current_file: self.current_file,
            expansion: self.expansion,
            settings: self.settings,
            history: SubmissionHistory::from_entries(self.history, config.history_limit),
            base_branch: config.base_branch.clone(),
            ..AppState::default()
        }
    }
}

/// Writes the slot named by `key` from the live state.
pub fn save_key(storage: &mut dyn KeyValueStore, key: PersistKey, state: &AppState) -> Result<()> {
    match key {
        PersistKey::Files => write_key(storage, key, &state.files.to_entries()),
        PersistKey::CurrentFile => write_key(storage, key, &state.current_file),
        PersistKey::UserSettings => write_key(storage, key, &state.settings),
        PersistKey::FolderExpansionState => write_key(storage, key, &state.expansion),
        PersistKey::PreviousSubmissions => write_key(storage, key, &state.history.to_vec()),
    }
}

pub fn save_all(storage: &mut dyn KeyValueStore, state: &AppState) -> Result<()> {
    for key in PersistKey::ALL {
        save_key(storage, key, state)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/persist.rs"]
mod tests;
