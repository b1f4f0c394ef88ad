//! xlstyle - Cell format values and style-table deduplication for spreadsheet writers
//!
//! Spreadsheet documents keep formatting in shared tables: every cell refers
//! to a cell format, and cell formats refer to fonts, borders, fills and
//! number formats. This crate provides the value side of that scheme and a
//! registry that builds the tables.
//!
//! # Features
//!
//! - **Canonical keys**: a [`Format`] derives a byte key from its content;
//!   equal styles produce equal keys regardless of how they were built
//! - **Index slots**: cell (`xf`) and differential (`dxf`) table indices that
//!   go stale as soon as the format changes
//! - **Consistent alignment**: setters keep indent, wrap and shrink-to-fit
//!   compatible with the horizontal alignment
//! - **Copy-on-write**: cloning a format is cheap, mutations detach
//!
//! # Example
//!
//! ```rust
//! use xlstyle::{BorderStyle, Format, StyleRegistry};
//!
//! let mut registry = StyleRegistry::new();
//!
//! let mut total = Format::new();
//! total.set_font_bold(true);
//! total.set_top_border_style(BorderStyle::Double);
//! total.set_number_format("#,##0.00");
//!
//! let index = registry.add_xf_format(&mut total);
//! assert!(total.xf_index_valid());
//! assert_eq!(total.xf_index(), Some(index));
//!
//! // Any change makes the assigned index stale
//! total.set_font_italic(true);
//! assert!(!total.xf_index_valid());
//! ```
//!
//! # Feature flags
//!
//! - `serde` (default): `Serialize`/`Deserialize` for colors and style enums

pub mod common;
pub mod ooxml;

pub use common::{Color, Error, Result};
pub use ooxml::xlsx::styles::{
    Alignment, Border, BorderEdge, BorderLine, BorderStyle, DiagonalBorderType, Fill,
    FillPattern, Font, FontScript, FontUnderline, Format, FormatKey, GroupKey,
    HorizontalAlignment, NumberFormat, Protection, VerticalAlignment,
};
pub use ooxml::xlsx::writer::{CustomNumberFormat, RegistryOptions, StyleRegistry};
