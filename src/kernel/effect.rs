use crate::kernel::services::ports::{ArchiveEntry, DeployPlan};

/// Persisted-state slots, one per storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PersistKey {
    Files,
    CurrentFile,
    UserSettings,
    FolderExpansionState,
    PreviousSubmissions,
}

impl PersistKey {
    pub const ALL: [PersistKey; 5] = [
        PersistKey::Files,
        PersistKey::CurrentFile,
        PersistKey::UserSettings,
        PersistKey::FolderExpansionState,
        PersistKey::PreviousSubmissions,
    ];

    pub fn storage_key(self) -> &'static str {
        match self {
            PersistKey::Files => "files",
            PersistKey::CurrentFile => "currentFile",
            PersistKey::UserSettings => "userSettings",
            PersistKey::FolderExpansionState => "folderExpansionState",
            PersistKey::PreviousSubmissions => "previousSubmissions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Persist(PersistKey),
    StartDeploy(DeployPlan),
    StartArchive(Vec<ArchiveEntry>),
}
