//! Headless application core (state/action/effect).

pub mod action;
pub mod deploy;
pub mod effect;
pub mod error;
pub mod lab;
pub mod markup;
pub mod services;
pub mod state;
pub mod store;

pub use action::{Action, DeployRequest, FileOp};
pub use effect::{Effect, PersistKey};
pub use error::LabError;
pub use lab::{generate_index, scan_lab_files, IndexJson, LabFiles};
pub use state::{
    AppState, ConfirmDialogState, Notice, NoticeLevel, PendingAction, UiState,
};
pub use store::{DispatchResult, Store};
