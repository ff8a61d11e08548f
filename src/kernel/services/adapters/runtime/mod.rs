//! Async runtime adapter: executes task effects and sends messages back to the session.

mod async_runtime;
mod message;

pub use async_runtime::AsyncRuntime;
pub use message::AppMessage;
