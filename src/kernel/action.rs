use crate::kernel::markup::Template;
use crate::kernel::services::ports::{
    ArchiveBlob, ArchiveError, DeployError, DeployOutcome, Theme,
};

/// File-tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOp {
    CreateFile { path: String, content: String },
    CreateFolder { path: String },
    Rename { path: String, new_name: String },
    Move { source: String, target_dir: String },
    /// Deletion waits for `Action::Confirm`.
    RequestDelete { path: String },
    Open { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub lab_name: String,
    pub author_name: String,
    /// Paths to publish. A folder selects everything beneath it.
    pub selected: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    File(FileOp),
    Confirm,
    Cancel,
    EditCurrent { content: String },
    ToggleFolder { path: String },
    SetAutoDetect(bool),
    SetTheme(Theme),
    InsertTemplate(Template),
    Deploy(DeployRequest),
    DeployFinished(Result<DeployOutcome, DeployError>),
    ExportArchive,
    ArchiveFinished(Result<ArchiveBlob, ArchiveError>),
    RestoreSubmission { id: String },
    DismissNotice,
}
