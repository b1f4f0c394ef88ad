//! Common types shared across formats.

pub mod error;
pub mod style;

pub use error::{Error, Result};
pub use style::Color;
