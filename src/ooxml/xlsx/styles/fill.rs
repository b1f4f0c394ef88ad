//! Fill patterns and colors.

use bytes::Bytes;

use super::key::KeyWriter;
use super::slot::IndexSlot;
use crate::common::Color;

/// Cell fill pattern types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FillPattern {
    #[default]
    None = 0,
    Solid = 1,
    MediumGray = 2,
    DarkGray = 3,
    LightGray = 4,
    DarkHorizontal = 5,
    DarkVertical = 6,
    DarkDown = 7,
    DarkUp = 8,
    DarkGrid = 9,
    DarkTrellis = 10,
    LightHorizontal = 11,
    LightVertical = 12,
    LightDown = 13,
    LightUp = 14,
    LightTrellis = 15,
    Gray125 = 16,
    Gray0625 = 17,
}

impl FillPattern {
    /// Value of the `patternType` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Solid => "solid",
            Self::MediumGray => "mediumGray",
            Self::DarkGray => "darkGray",
            Self::LightGray => "lightGray",
            Self::DarkHorizontal => "darkHorizontal",
            Self::DarkVertical => "darkVertical",
            Self::DarkDown => "darkDown",
            Self::DarkUp => "darkUp",
            Self::DarkGrid => "darkGrid",
            Self::DarkTrellis => "darkTrellis",
            Self::LightHorizontal => "lightHorizontal",
            Self::LightVertical => "lightVertical",
            Self::LightDown => "lightDown",
            Self::LightUp => "lightUp",
            Self::LightTrellis => "lightTrellis",
            Self::Gray125 => "gray125",
            Self::Gray0625 => "gray0625",
        }
    }
}

/// Fill information.
///
/// Defines the background pattern of a cell and its two colors. Giving a
/// color to a fill without a pattern turns it into a solid fill.
#[derive(Debug, Clone, Default)]
pub struct Fill {
    pattern: FillPattern,
    fg_color: Option<Color>,
    bg_color: Option<Color>,
    dirty: bool,
    slot: IndexSlot,
}

impl Fill {
    /// Create a fill without pattern or colors.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fill with the given pattern and no colors.
    #[inline]
    pub fn with_pattern(pattern: FillPattern) -> Self {
        Self {
            pattern,
            ..Self::default()
        }
    }

    #[inline]
    fn touch(&mut self) {
        self.dirty = true;
        self.slot.invalidate();
    }

    #[inline]
    pub fn fill_pattern(&self) -> FillPattern {
        self.pattern
    }

    pub fn set_fill_pattern(&mut self, pattern: FillPattern) {
        self.pattern = pattern;
        self.touch();
    }

    /// Foreground (pattern) color
    #[inline]
    pub fn foreground_color(&self) -> Option<Color> {
        self.fg_color
    }

    pub fn set_foreground_color(&mut self, color: Option<Color>) {
        self.solidify(color);
        self.fg_color = color;
        self.touch();
    }

    /// Background color
    #[inline]
    pub fn background_color(&self) -> Option<Color> {
        self.bg_color
    }

    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.solidify(color);
        self.bg_color = color;
        self.touch();
    }

    #[inline]
    fn solidify(&mut self, color: Option<Color>) {
        if color.is_some() && self.pattern == FillPattern::None {
            self.pattern = FillPattern::Solid;
        }
    }

    /// Check if this is a solid fill.
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.pattern == FillPattern::Solid
    }

    /// Canonical key over pattern and both colors.
    pub fn key(&self) -> Bytes {
        let mut w = KeyWriter::with_capacity(16);
        w.variant(self.pattern as u8)
            .color(self.fg_color)
            .color(self.bg_color);
        w.finish()
    }

    /// Index in the shared fill table, if one was ever assigned.
    #[inline]
    pub fn index(&self) -> Option<u32> {
        self.slot.get()
    }

    /// Record the fill table index assigned by the style registry.
    #[inline]
    pub fn set_index(&mut self, index: u32) {
        self.slot.assign(index);
    }

    /// Whether [`Fill::index`] was assigned against the current pattern and colors.
    #[inline]
    pub fn index_valid(&self) -> bool {
        self.slot.is_assigned()
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
    fn test_color_turns_none_into_solid() {
        let mut fill = Fill::new();
        fill.set_foreground_color(Some(Color::rgb(255, 0, 0)));
        assert_eq!(fill.fill_pattern(), FillPattern::Solid);
        assert_eq!(fill.foreground_color(), Some(Color::rgb(255, 0, 0)));

        let mut fill = Fill::new();
        fill.set_background_color(Some(Color::rgb(0, 255, 0)));
        assert!(fill.is_solid());
    }

    #[test]
    fn test_with_pattern() {
        let fill = Fill::with_pattern(FillPattern::Gray125);
        assert_eq!(fill.fill_pattern(), FillPattern::Gray125);
        assert_eq!(fill.foreground_color(), None);
        assert_eq!(fill.background_color(), None);
        assert_ne!(fill.key(), Fill::new().key());
    }

    #[test]
    fn test_color_keeps_existing_pattern() {
        let mut fill = Fill::with_pattern(FillPattern::DarkGrid);
        fill.set_foreground_color(Some(Color::rgb(1, 2, 3)));
        assert_eq!(fill.fill_pattern(), FillPattern::DarkGrid);
    }

    #[test]
    fn test_clearing_color_keeps_pattern_none() {
        let mut fill = Fill::new();
        fill.set_foreground_color(None);
        assert_eq!(fill.fill_pattern(), FillPattern::None);
        assert!(fill.is_dirty());
    }

    #[test]
    fn test_key_swapped_colors_differ() {
        let red = Some(Color::rgb(255, 0, 0));
        let mut a = Fill::with_pattern(FillPattern::Solid);
        a.set_foreground_color(red);
        let mut b = Fill::with_pattern(FillPattern::Solid);
        b.set_background_color(red);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_pattern_names() {
        assert_eq!(FillPattern::Gray125.as_str(), "gray125");
        assert_eq!(FillPattern::LightTrellis.as_str(), "lightTrellis");
    }
}
