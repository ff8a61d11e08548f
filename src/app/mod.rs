//! Host layer: owns the store and executes its effects.

pub mod session;

pub use session::Session;
