//! Data models: the flat file store, its derived tree, and submissions.

pub mod file_record;
pub mod file_store;
pub mod file_tree;
pub mod path_key;
pub mod submission;

pub use file_record::FileRecord;
pub use file_store::{FileStore, FileStoreError, PathChange, ALLOWED_EXTENSIONS};
pub use file_tree::{build_tree, ExpansionState, TreeNode, TreeRow};
pub use submission::{Submission, SubmissionHistory, DEFAULT_HISTORY_LIMIT};
