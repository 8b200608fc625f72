//! moleval-common — Shared errors, math helpers, and dataset utilities used across all moleval crates.

pub mod data;
pub mod error;
pub mod logging;
pub mod math;

// Re-export commonly used types
pub use error::{MolevalError, Result};
