use crate::kernel::services::ports::{
    ArchiveBlob, ArchiveError, DeployError, DeployOutcome,
};

/// Completion reports from background tasks.
#[derive(Debug)]
pub enum AppMessage {
    DeployFinished(Result<DeployOutcome, DeployError>),
    ArchiveFinished(Result<ArchiveBlob, ArchiveError>),
}
