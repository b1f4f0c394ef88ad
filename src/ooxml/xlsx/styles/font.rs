//! Font attributes of a cell format.

use bytes::Bytes;

use super::key::KeyWriter;
use super::slot::IndexSlot;
use crate::common::Color;

/// Vertical position of the text relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FontScript {
    #[default]
    Normal = 0,
    Super = 1,
    Sub = 2,
}

impl FontScript {
    /// Value of the `vertAlign` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "baseline",
            Self::Super => "superscript",
            Self::Sub => "subscript",
        }
    }
}

/// Underline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FontUnderline {
    #[default]
    None = 0,
    Single = 1,
    Double = 2,
    SingleAccounting = 3,
    DoubleAccounting = 4,
}

impl FontUnderline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Double => "double",
            Self::SingleAccounting => "singleAccounting",
            Self::DoubleAccounting => "doubleAccounting",
        }
    }
}

/// Font information.
///
/// Defines the visual appearance of text in cells including
/// typeface, size, color, and text decoration. Fonts form their own shared
/// table, so a font carries the index the style registry assigned to it.
#[derive(Debug, Clone)]
pub struct Font {
    size: i32,
    italic: bool,
    strike_out: bool,
    bold: bool,
    outline: bool,
    shadow: bool,
    color: Option<Color>,
    theme_color: Option<String>,
    script: FontScript,
    underline: FontUnderline,
    name: String,
    family: i32,
    scheme: String,
    dirty: bool,
    slot: IndexSlot,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 11,
            italic: false,
            strike_out: false,
            bold: false,
            outline: false,
            shadow: false,
            color: None,
            theme_color: None,
            script: FontScript::Normal,
            underline: FontUnderline::None,
            name: "Calibri".to_string(),
            family: 2,
            scheme: "minor".to_string(),
            dirty: false,
            slot: IndexSlot::default(),
        }
    }
}

impl Font {
    /// Create the default font (Calibri 11pt, minor scheme).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn touch(&mut self) {
        self.dirty = true;
        self.slot.invalidate();
    }

    /// Font size in points
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn set_size(&mut self, size: i32) {
        self.size = size;
        self.touch();
    }

    #[inline]
    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
        self.touch();
    }

    #[inline]
    pub fn strike_out(&self) -> bool {
        self.strike_out
    }

    pub fn set_strike_out(&mut self, strike_out: bool) {
        self.strike_out = strike_out;
        self.touch();
    }

    #[inline]
    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
        self.touch();
    }

    #[inline]
    pub fn outline(&self) -> bool {
        self.outline
    }

    pub fn set_outline(&mut self, outline: bool) {
        self.outline = outline;
        self.touch();
    }

    #[inline]
    pub fn shadow(&self) -> bool {
        self.shadow
    }

    pub fn set_shadow(&mut self, shadow: bool) {
        self.shadow = shadow;
        self.touch();
    }

    /// Explicit font color. `None` means automatic or theme-defined.
    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
        self.touch();
    }

    /// Theme color token, kept verbatim (theme resolution happens elsewhere).
    #[inline]
    pub fn theme_color(&self) -> Option<&str> {
        self.theme_color.as_deref()
    }

    pub fn set_theme_color(&mut self, theme_color: Option<String>) {
        self.theme_color = theme_color;
        self.touch();
    }

    #[inline]
    pub fn script(&self) -> FontScript {
        self.script
    }

    pub fn set_script(&mut self, script: FontScript) {
        self.script = script;
        self.touch();
    }

    #[inline]
    pub fn underline(&self) -> FontUnderline {
        self.underline
    }

    pub fn set_underline(&mut self, underline: FontUnderline) {
        self.underline = underline;
        self.touch();
    }

    /// Font name/family (e.g., "Calibri", "Arial")
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        self.touch();
    }

    /// Font family (1=Roman, 2=Swiss, 3=Modern, 4=Script, 5=Decorative)
    #[inline]
    pub fn family(&self) -> i32 {
        self.family
    }

    pub fn set_family(&mut self, family: i32) {
        self.family = family;
        self.touch();
    }

    /// Font scheme (major, minor, none)
    #[inline]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn set_scheme(&mut self, scheme: &str) {
        self.scheme = scheme.to_string();
        self.touch();
    }

    /// Check if the font has any special formatting.
    #[inline]
    pub fn has_formatting(&self) -> bool {
        self.bold
            || self.italic
            || self.strike_out
            || self.outline
            || self.shadow
            || self.underline != FontUnderline::None
            || self.script != FontScript::Normal
    }

    /// Canonical key over every font attribute.
    pub fn key(&self) -> Bytes {
        let mut w = KeyWriter::with_capacity(64 + self.name.len() + self.scheme.len());
        w.int(self.size)
            .bool(self.italic)
            .bool(self.strike_out)
            .bool(self.bold)
            .bool(self.outline)
            .bool(self.shadow)
            .color(self.color)
            .opt_str(self.theme_color.as_deref())
            .variant(self.script as u8)
            .variant(self.underline as u8)
            .str(&self.name)
            .int(self.family)
            .str(&self.scheme);
        w.finish()
    }

    /// Index in the shared font table, if one was ever assigned.
    #[inline]
    pub fn index(&self) -> Option<u32> {
        self.slot.get()
    }

    /// Record the font table index assigned by the style registry.
    #[inline]
    pub fn set_index(&mut self, index: u32) {
        self.slot.assign(index);
    }

    /// Whether [`Font::index`] was assigned against the current attributes.
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
