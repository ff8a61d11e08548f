//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod archive;
pub mod config;
pub mod paths;
pub mod persist;
pub mod render;
pub mod runtime;
pub mod storage;

pub use archive::GzipBundleWriter;
pub use config::{load_config, load_config_from, resolve_data_dir};
pub use paths::{ensure_log_dir, ensure_state_dir, get_config_path, get_log_dir, get_state_dir};
pub use persist::{save_all, save_key, PersistedState};
pub use render::CmarkRenderer;
pub use runtime::{AppMessage, AsyncRuntime};
pub use storage::{JsonFileStorage, MemoryStorage};
