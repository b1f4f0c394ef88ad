//! SpreadsheetML (XLSX) style handling.
//!
//! - [`styles`]: cell formats and their attribute groups
//! - [`writer`]: the registry that collapses formats into shared tables

pub mod styles;
pub mod writer;

pub use styles::{Format, FormatKey, GroupKey};
pub use writer::{RegistryOptions, StyleRegistry};
