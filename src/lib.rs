//! labmark - lab documentation editor core
//!
//! Module layout:
//! - models: flat file store, derived tree, submissions
//! - kernel: state/action/effect/store, markup pipeline, lab descriptor, deploy planning
//! - kernel::services: ports (traits) and adapters (storage, rendering, runtime)
//! - app: session host that runs effects

pub mod app;
pub mod kernel;
pub mod models;
