//! Unified error types for xlstyle.
//!
//! Format values are total: only validation and table lookups report errors.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
