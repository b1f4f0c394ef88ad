//! Cell formats and their attribute groups.
//!
//! Spreadsheet files do not store formatting inline per cell. Cells refer to
//! a shared table of cell formats, which in turn refer to shared tables of
//! fonts, borders, fills and number formats. This module provides the value
//! side of that scheme: a [`Format`] that derives a canonical key from its
//! attributes, so that identical formats can be collapsed onto one record.
//!
//! # Architecture
//!
//! The styles module is organized into several components:
//!
//! - `format`: the [`Format`] aggregate, its key and its table indices
//! - `number_format`: Number format ids, codes and date detection
//! - `font`: Font attributes
//! - `alignment`: Cell alignment and its consistency rules
//! - `border`: Border lines per edge
//! - `fill`: Fill patterns and colors
//! - `protection`: Locked and hidden flags
//! - `key`: The canonical key encoding shared by all of the above
//!
//! # Example
//!
//! ```rust
//! use xlstyle::{Color, Format, HorizontalAlignment};
//!
//! let mut a = Format::new();
//! a.set_font_bold(true);
//! a.set_horizontal_alignment(HorizontalAlignment::Center);
//!
//! let mut b = Format::new();
//! b.set_horizontal_alignment(HorizontalAlignment::Center);
//! b.set_font_bold(true);
//!
//! assert_eq!(a.format_key(), b.format_key());
//! assert_eq!(a, b);
//!
//! b.set_pattern_foreground_color(Some(Color::rgb(255, 255, 0)));
//! assert_ne!(a, b);
//! ```

mod alignment;
mod border;
mod fill;
mod font;
mod format;
mod key;
mod number_format;
mod protection;
mod slot;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{Border, BorderEdge, BorderLine, BorderStyle, DiagonalBorderType};
pub use fill::{Fill, FillPattern};
pub use font::{Font, FontScript, FontUnderline};
pub use format::Format;
pub use key::{FormatKey, GroupKey};
pub use number_format::{
    FIRST_CUSTOM_NUMBER_FORMAT_ID, NumberFormat, builtin_format_code, builtin_format_id,
};
pub use protection::Protection;
