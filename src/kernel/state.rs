use crate::kernel::services::ports::config::DEFAULT_BASE_BRANCH;
use crate::kernel::services::ports::{ArchiveBlob, UserSettings};
use crate::models::{
    build_tree, ExpansionState, FileStore, Submission, SubmissionHistory, TreeNode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeletePath { path: String, is_dir: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmDialogState {
    pub visible: bool,
    pub message: String,
    pub on_confirm: Option<PendingAction>,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub notice: Option<Notice>,
    pub confirm_dialog: ConfirmDialogState,
    pub deploy_in_flight: bool,
    /// Files as they were when the running deploy was planned.
    pub pending_submission: Option<Submission>,
    pub archive_in_flight: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub files: FileStore,
    /// Open file. Always `None` or a live, non-directory record.
    pub current_file: Option<String>,
    pub expansion: ExpansionState,
    pub settings: UserSettings,
    pub history: SubmissionHistory,
    /// Platform Markdown generated from the open file.
    pub output: String,
    pub base_branch: String,
    pub last_archive: Option<ArchiveBlob>,
    pub ui: UiState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            files: FileStore::new(),
            current_file: None,
            expansion: ExpansionState::new(),
            settings: UserSettings::default(),
            history: SubmissionHistory::default(),
            output: String::new(),
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            last_archive: None,
            ui: UiState::default(),
        }
    }
}

impl AppState {
    pub fn new(files: FileStore) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    pub fn tree(&self) -> TreeNode {
        build_tree(&self.files, &self.expansion)
    }

    pub fn current_content(&self) -> Option<&str> {
        let path = self.current_file.as_deref()?;
        self.files.read(path).ok()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
