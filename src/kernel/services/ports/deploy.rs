use async_trait::async_trait;
use thiserror::Error;

/// A file to commit, already namespaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeBlob {
    pub path: String,
    pub content: String,
}

/// Everything a deployment needs, computed synchronously by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPlan {
    pub lab_name: String,
    pub author_name: String,
    pub branch: String,
    pub message: String,
    pub namespace: String,
    pub blobs: Vec<TreeBlob>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub lab_name: String,
    pub author_name: String,
    pub commit: String,
    pub files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeployError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("remote rejected {step}: {message}")]
    Rejected { step: &'static str, message: String },
}

/// Minimal source-control surface used to publish a lab.
#[async_trait]
pub trait SourceControl: Send + Sync {
    /// Commit sha the branch currently points at.
    async fn branch_head(&self, branch: &str) -> Result<String, DeployError>;
    /// Creates a tree on top of the tree of `base_commit`. Returns the tree sha.
    async fn create_tree(&self, base_commit: &str, blobs: &[TreeBlob])
        -> Result<String, DeployError>;
    async fn create_commit(
        &self,
        message: &str,
        tree: &str,
        parent: &str,
    ) -> Result<String, DeployError>;
    async fn update_branch(&self, branch: &str, commit: &str) -> Result<(), DeployError>;
}
