//! Cell alignment information.

use super::key::KeyWriter;

/// Horizontal alignment of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum HorizontalAlignment {
    #[default]
    General = 0,
    Left = 1,
    Center = 2,
    Right = 3,
    Fill = 4,
    Justify = 5,
    CenterContinuous = 6,
    Distributed = 7,
}

impl HorizontalAlignment {
    /// Value of the `horizontal` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Fill => "fill",
            Self::Justify => "justify",
            Self::CenterContinuous => "centerContinuous",
            Self::Distributed => "distributed",
        }
    }

    /// Alignments that keep a non-zero indent.
    #[inline]
    fn keeps_indent(self) -> bool {
        matches!(
            self,
            Self::General | Self::Left | Self::Right | Self::Distributed
        )
    }

    /// Alignments that `set_indent` leaves alone.
    #[inline]
    fn accepts_indent(self) -> bool {
        matches!(self, Self::General | Self::Left | Self::Right | Self::Justify)
    }

    /// Alignments that rule out shrink-to-fit.
    #[inline]
    fn excludes_shrink(self) -> bool {
        matches!(self, Self::Fill | Self::Justify | Self::Distributed)
    }
}

/// Vertical alignment of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VerticalAlignment {
    Top = 0,
    Center = 1,
    #[default]
    Bottom = 2,
    Justify = 3,
    Distributed = 4,
}

impl VerticalAlignment {
    /// Value of the `vertical` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
            Self::Justify => "justify",
            Self::Distributed => "distributed",
        }
    }
}

/// Alignment information for cell content.
///
/// Controls how text is positioned within a cell both horizontally
/// and vertically, as well as text wrapping and rotation.
///
/// The setters keep the attributes consistent with each other:
/// wrap and shrink-to-fit are mutually exclusive, an indent forces an
/// alignment that can display it, and shrink-to-fit is dropped by alignments
/// that stretch the text.
#[derive(Debug, Clone, Default)]
pub struct Alignment {
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
    wrap: bool,
    rotation: i32,
    indent: i32,
    shrink_to_fit: bool,
    dirty: bool,
}

impl Alignment {
    /// Create a new default alignment (general, bottom).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn horizontal(&self) -> HorizontalAlignment {
        self.horizontal
    }

    pub fn set_horizontal(&mut self, align: HorizontalAlignment) {
        if self.indent != 0 && !align.keeps_indent() {
            self.indent = 0;
        }
        if self.shrink_to_fit && align.excludes_shrink() {
            self.shrink_to_fit = false;
        }
        self.horizontal = align;
        self.dirty = true;
    }

    #[inline]
    pub fn vertical(&self) -> VerticalAlignment {
        self.vertical
    }

    pub fn set_vertical(&mut self, align: VerticalAlignment) {
        self.vertical = align;
        self.dirty = true;
    }

    /// Wrap text flag
    #[inline]
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        if wrap {
            self.shrink_to_fit = false;
        }
        self.wrap = wrap;
        self.dirty = true;
    }

    /// Text rotation (angle in degrees, 0-180, or 255 for vertical)
    #[inline]
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// Stored as given; see `Format::validate` for the accepted range.
    pub fn set_rotation(&mut self, rotation: i32) {
        self.rotation = rotation;
        self.dirty = true;
    }

    /// Indent level (for horizontal alignment)
    #[inline]
    pub fn indent(&self) -> i32 {
        self.indent
    }

    pub fn set_indent(&mut self, indent: i32) {
        if indent != 0 && !self.horizontal.accepts_indent() {
            self.horizontal = HorizontalAlignment::Left;
        }
        self.indent = indent;
        self.dirty = true;
    }

    /// Shrink to fit flag
    #[inline]
    pub fn shrink_to_fit(&self) -> bool {
        self.shrink_to_fit
    }

    pub fn set_shrink_to_fit(&mut self, shrink: bool) {
        if shrink {
            self.wrap = false;
            if self.horizontal.excludes_shrink() {
                self.horizontal = HorizontalAlignment::Left;
            }
        }
        self.shrink_to_fit = shrink;
        self.dirty = true;
    }

    /// Check if this alignment has any non-default settings.
    #[inline]
    pub fn has_settings(&self) -> bool {
        self.horizontal != HorizontalAlignment::General
            || self.vertical != VerticalAlignment::Bottom
            || self.indent != 0
            || self.wrap
            || self.rotation != 0
            || self.shrink_to_fit
    }

    /// Append the alignment fields in key order.
    pub(crate) fn write_key(&self, w: &mut KeyWriter) {
        w.variant(self.horizontal as u8)
            .variant(self.vertical as u8)
            .int(self.indent)
            .int(self.rotation)
            .bool(self.shrink_to_fit)
            .bool(self.wrap);
    }

    #[inline]
    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_resets_indent() {
        let mut a = Alignment::new();
        a.set_horizontal(HorizontalAlignment::Left);
        a.set_indent(5);
        a.set_horizontal(HorizontalAlignment::Center);
        assert_eq!(a.indent(), 0);
        assert_eq!(a.horizontal(), HorizontalAlignment::Center);

        a.set_horizontal(HorizontalAlignment::Right);
        a.set_indent(2);
        a.set_horizontal(HorizontalAlignment::Distributed);
        assert_eq!(a.indent(), 2);
    }

    #[test]
    fn test_indent_moves_incompatible_alignment_to_left() {
        // general already accepts an indent and is kept
        let mut a = Alignment::new();
        a.set_indent(3);
        assert_eq!(a.horizontal(), HorizontalAlignment::General);
        assert_eq!(a.indent(), 3);

        let mut a = Alignment::new();
        a.set_horizontal(HorizontalAlignment::Center);
        a.set_indent(3);
        assert_eq!(a.horizontal(), HorizontalAlignment::Left);
        assert_eq!(a.indent(), 3);

        // zero indent never changes the alignment
        let mut a = Alignment::new();
        a.set_horizontal(HorizontalAlignment::Fill);
        a.set_indent(0);
        assert_eq!(a.horizontal(), HorizontalAlignment::Fill);

        // justify is accepted by set_indent
        let mut a = Alignment::new();
        a.set_horizontal(HorizontalAlignment::Justify);
        a.set_indent(1);
        assert_eq!(a.horizontal(), HorizontalAlignment::Justify);
    }

    #[test]
    fn test_wrap_and_shrink_exclusive() {
        let mut a = Alignment::new();
        a.set_wrap(true);
        a.set_shrink_to_fit(true);
        assert!(!a.wrap());
        assert!(a.shrink_to_fit());

        a.set_wrap(true);
        assert!(a.wrap());
        assert!(!a.shrink_to_fit());

        a.set_wrap(false);
        a.set_shrink_to_fit(false);
        assert!(!a.wrap());
        assert!(!a.shrink_to_fit());
    }

    #[test]
    fn test_shrink_and_stretching_alignments() {
        let mut a = Alignment::new();
        a.set_horizontal(HorizontalAlignment::Justify);
        a.set_shrink_to_fit(true);
        assert_eq!(a.horizontal(), HorizontalAlignment::Left);

        a.set_horizontal(HorizontalAlignment::Fill);
        assert!(!a.shrink_to_fit());
    }

    #[test]
    fn test_has_settings() {
        let mut a = Alignment::new();
        assert!(!a.has_settings());
        a.set_rotation(90);
        assert!(a.has_settings());
    }
}
