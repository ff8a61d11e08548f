//! Service ports: traits + data contracts.

pub mod archive;
pub mod config;
pub mod deploy;
pub mod render;
pub mod settings;
pub mod storage;

pub use archive::{ArchiveBlob, ArchiveEntry, ArchiveError, ArchiveWriter};
pub use config::AppConfig;
pub use deploy::{DeployError, DeployOutcome, DeployPlan, SourceControl, TreeBlob};
pub use render::MarkdownRenderer;
pub use settings::{Theme, UserSettings};
pub use storage::{KeyValueStore, StorageError};
