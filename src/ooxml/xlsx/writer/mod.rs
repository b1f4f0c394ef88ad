//! Writer-side components for XLSX.

pub mod styles;

pub use styles::{CustomNumberFormat, RegistryOptions, StyleRegistry};
