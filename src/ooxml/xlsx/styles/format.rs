//! Cell format values.
//!
//! A [`Format`] aggregates the six attribute groups (number format, font,
//! alignment, border, fill, protection) behind a cheap, copy-on-write handle.
//! It derives a canonical [`FormatKey`] from its content and carries the
//! indices that the style registry assigned to it in the cell format (`xf`)
//! and differential format (`dxf`) tables.
//!
//! # Keys and indices
//!
//! The key is memoized. It is stale whenever the aggregate or any attribute
//! group changed since it was last derived, and [`Format::format_key`]
//! rebuilds it on demand. Rebuilding forgets both `xf` and `dxf` assignments,
//! so an index is only reported valid while it still describes the current
//! content.
//!
//! ```rust
//! use xlstyle::Format;
//!
//! let mut format = Format::new();
//! format.set_font_bold(true);
//! format.format_key();
//! format.set_xf_index(1);
//! assert!(format.xf_index_valid());
//!
//! format.set_font_italic(true);
//! assert!(!format.xf_index_valid());
//! assert_eq!(format.xf_index(), Some(1));
//! ```

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
use super::border::{Border, BorderEdge, BorderStyle, DiagonalBorderType};
use super::fill::{Fill, FillPattern};
use super::font::{Font, FontScript, FontUnderline};
use super::key::{FormatKey, GroupKey, KeyWriter};
use super::number_format::NumberFormat;
use super::protection::Protection;
use super::slot::IndexSlot;
use crate::common::{Color, Error, Result};

/// Shared record behind a [`Format`] handle.
#[derive(Debug, Clone)]
struct FormatData {
    number: NumberFormat,
    font: Font,
    alignment: Alignment,
    border: Border,
    fill: Fill,
    protection: Protection,

    dirty: bool,
    key: FormatKey,
    xf: IndexSlot,
    dxf: IndexSlot,

    is_dxf: bool,
    theme: i32,
}

impl Default for FormatData {
    fn default() -> Self {
        Self {
            number: NumberFormat::default(),
            font: Font::default(),
            alignment: Alignment::default(),
            border: Border::default(),
            fill: Fill::default(),
            protection: Protection::default(),
            dirty: true,
            key: FormatKey::default(),
            xf: IndexSlot::default(),
            dxf: IndexSlot::default(),
            is_dxf: false,
            theme: 0,
        }
    }
}

impl FormatData {
    /// Single staleness predicate over the aggregate and all six groups.
    #[inline]
    fn is_key_stale(&self) -> bool {
        self.dirty
            || self.number.is_dirty()
            || self.font.is_dirty()
            || self.alignment.is_dirty()
            || self.border.is_dirty()
            || self.fill.is_dirty()
            || self.protection.is_dirty()
    }

    fn compute_key(&self) -> FormatKey {
        let font = self.font.key();
        let border = self.border.key();
        let fill = self.fill.key();
        let number = self.number.key();

        let mut w = KeyWriter::with_capacity(
            font.len() + border.len() + fill.len() + number.len() + 64,
        );
        w.nested(&font).nested(&border).nested(&fill).nested(&number);
        self.alignment.write_key(&mut w);
        self.protection.write_key(&mut w);
        FormatKey::new(w.finish())
    }

    fn refresh_key(&mut self) {
        if !self.is_key_stale() {
            return;
        }
        self.key = self.compute_key();
        log::trace!("recomputed format key ({} bytes)", self.key.as_bytes().len());

        self.dirty = false;
        self.number.mark_clean();
        self.font.mark_clean();
        self.alignment.mark_clean();
        self.border.mark_clean();
        self.fill.mark_clean();
        self.protection.mark_clean();

        self.xf.invalidate();
        self.dxf.invalidate();
    }
}

/// Formatting attributes of a cell.
///
/// Cloning a `Format` is cheap: clones share one record until either of them
/// is mutated, at which point the mutated handle detaches onto its own copy.
/// Earlier clones never observe later mutations.
///
/// Equality compares the canonical keys, so two formats are equal exactly
/// when all of their attributes are equal. Assigned indices, the
/// differential-format flag and the theme are not part of the comparison.
///
/// Setters accept any value: out-of-range rotations or indents are stored
/// and keyed verbatim. Use [`Format::validate`] to check ranges before
/// emitting a format.
#[derive(Debug, Clone, Default)]
pub struct Format {
    d: Arc<FormatData>,
}

impl Format {
    /// Creates a new format with default attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new format destined for the differential format table.
    pub fn new_dxf() -> Self {
        let mut format = Self::new();
        format.data_mut().is_dxf = true;
        format
    }

    /// Exclusive access to the record, detaching from other handles first.
    fn data_mut(&mut self) -> &mut FormatData {
        if Arc::get_mut(&mut self.d).is_none() {
            log::trace!("detaching shared format record");
        }
        Arc::make_mut(&mut self.d)
    }

    /// Mutable number format group; marks the aggregate dirty.
    #[inline]
    fn number_mut(&mut self) -> &mut NumberFormat {
        let d = self.data_mut();
        d.dirty = true;
        &mut d.number
    }

    #[inline]
    fn font_mut(&mut self) -> &mut Font {
        let d = self.data_mut();
        d.dirty = true;
        &mut d.font
    }

    #[inline]
    fn alignment_mut(&mut self) -> &mut Alignment {
        let d = self.data_mut();
        d.dirty = true;
        &mut d.alignment
    }

    #[inline]
    fn border_mut(&mut self) -> &mut Border {
        let d = self.data_mut();
        d.dirty = true;
        &mut d.border
    }

    #[inline]
    fn fill_mut(&mut self) -> &mut Fill {
        let d = self.data_mut();
        d.dirty = true;
        &mut d.fill
    }

    #[inline]
    fn protection_mut(&mut self) -> &mut Protection {
        let d = self.data_mut();
        d.dirty = true;
        &mut d.protection
    }

    // Attribute groups, read-only.

    /// Number format attributes.
    #[inline]
    pub fn number(&self) -> &NumberFormat {
        &self.d.number
    }

    /// Font attributes.
    #[inline]
    pub fn font(&self) -> &Font {
        &self.d.font
    }

    /// Alignment attributes.
    #[inline]
    pub fn alignment(&self) -> &Alignment {
        &self.d.alignment
    }

    /// Border attributes.
    #[inline]
    pub fn border(&self) -> &Border {
        &self.d.border
    }

    /// Fill attributes.
    #[inline]
    pub fn fill(&self) -> &Fill {
        &self.d.fill
    }

    /// Protection attributes.
    #[inline]
    pub fn protection(&self) -> &Protection {
        &self.d.protection
    }

    // Number format

    /// Returns the number format identifier.
    #[inline]
    pub fn number_format_index(&self) -> i32 {
        self.d.number.index()
    }

    /// Set the number format identifier. The `index` must be a valid
    /// built-in number format identifier or the identifier of a custom
    /// number format.
    pub fn set_number_format_index(&mut self, index: i32) {
        self.number_mut().set_index(index);
    }

    /// Returns the number format code.
    ///
    /// For built-in number formats selected by id this may be empty.
    #[inline]
    pub fn number_format(&self) -> &str {
        self.d.number.code()
    }

    /// Set the number format code.
    ///
    /// An empty code is ignored and leaves the format (and its key)
    /// untouched. Otherwise the number format id must be regenerated by the
    /// style registry.
    pub fn set_number_format(&mut self, code: &str) {
        if code.is_empty() {
            return;
        }
        self.number_mut().set_code(code);
    }

    /// Returns whether the number format probably displays a date or time.
    #[inline]
    pub fn is_date_time_format(&self) -> bool {
        self.d.number.is_date_time()
    }

    /// Whether [`Format::number_format_index`] identifies the current number
    /// format.
    #[inline]
    pub fn num_fmt_index_valid(&self) -> bool {
        self.d.number.is_index_authoritative()
    }

    /// Record the number format id resolved by the style registry.
    pub fn set_num_fmt(&mut self, index: i32, code: &str) {
        self.number_mut().resolve(index, code);
    }

    // Font

    /// Return the size of the font in points.
    #[inline]
    pub fn font_size(&self) -> i32 {
        self.d.font.size()
    }

    pub fn set_font_size(&mut self, size: i32) {
        self.font_mut().set_size(size);
    }

    #[inline]
    pub fn font_italic(&self) -> bool {
        self.d.font.italic()
    }

    pub fn set_font_italic(&mut self, italic: bool) {
        self.font_mut().set_italic(italic);
    }

    #[inline]
    pub fn font_strike_out(&self) -> bool {
        self.d.font.strike_out()
    }

    pub fn set_font_strike_out(&mut self, strike_out: bool) {
        self.font_mut().set_strike_out(strike_out);
    }

    /// Return the explicit color of the font.
    ///
    /// A font colored through the theme reports `None` here; see
    /// [`Format::font_theme_color`].
    #[inline]
    pub fn font_color(&self) -> Option<Color> {
        self.d.font.color()
    }

    pub fn set_font_color(&mut self, color: Option<Color>) {
        self.font_mut().set_color(color);
    }

    #[inline]
    pub fn font_theme_color(&self) -> Option<&str> {
        self.d.font.theme_color()
    }

    pub fn set_font_theme_color(&mut self, theme_color: Option<String>) {
        self.font_mut().set_theme_color(theme_color);
    }

    #[inline]
    pub fn font_bold(&self) -> bool {
        self.d.font.bold()
    }

    pub fn set_font_bold(&mut self, bold: bool) {
        self.font_mut().set_bold(bold);
    }

    #[inline]
    pub fn font_script(&self) -> FontScript {
        self.d.font.script()
    }

    pub fn set_font_script(&mut self, script: FontScript) {
        self.font_mut().set_script(script);
    }

    #[inline]
    pub fn font_underline(&self) -> FontUnderline {
        self.d.font.underline()
    }

    pub fn set_font_underline(&mut self, underline: FontUnderline) {
        self.font_mut().set_underline(underline);
    }

    #[inline]
    pub fn font_outline(&self) -> bool {
        self.d.font.outline()
    }

    pub fn set_font_outline(&mut self, outline: bool) {
        self.font_mut().set_outline(outline);
    }

    #[inline]
    pub fn font_shadow(&self) -> bool {
        self.d.font.shadow()
    }

    pub fn set_font_shadow(&mut self, shadow: bool) {
        self.font_mut().set_shadow(shadow);
    }

    #[inline]
    pub fn font_name(&self) -> &str {
        self.d.font.name()
    }

    pub fn set_font_name(&mut self, name: &str) {
        self.font_mut().set_name(name);
    }

    #[inline]
    pub fn font_family(&self) -> i32 {
        self.d.font.family()
    }

    pub fn set_font_family(&mut self, family: i32) {
        self.font_mut().set_family(family);
    }

    #[inline]
    pub fn font_scheme(&self) -> &str {
        self.d.font.scheme()
    }

    pub fn set_font_scheme(&mut self, scheme: &str) {
        self.font_mut().set_scheme(scheme);
    }

    #[inline]
    pub fn font_index(&self) -> Option<u32> {
        self.d.font.index()
    }

    /// Record the font table index assigned by the style registry.
    ///
    /// Does not affect the format key.
    pub fn set_font_index(&mut self, index: u32) {
        self.data_mut().font.set_index(index);
    }

    #[inline]
    pub fn font_index_valid(&self) -> bool {
        self.d.font.index_valid()
    }

    /// Canonical key of the font alone, for the shared font table.
    pub fn font_key(&self) -> GroupKey {
        GroupKey::new(self.d.font.key())
    }

    // Alignment

    #[inline]
    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.d.alignment.horizontal()
    }

    /// Set the horizontal alignment.
    ///
    /// Drops an indent the new alignment cannot display, and drops
    /// shrink-to-fit for fill, justify and distributed alignments.
    pub fn set_horizontal_alignment(&mut self, align: HorizontalAlignment) {
        self.alignment_mut().set_horizontal(align);
    }

    #[inline]
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.d.alignment.vertical()
    }

    pub fn set_vertical_alignment(&mut self, align: VerticalAlignment) {
        self.alignment_mut().set_vertical(align);
    }

    /// Return whether the cell text is wrapped.
    #[inline]
    pub fn text_wrap(&self) -> bool {
        self.d.alignment.wrap()
    }

    /// Enable or disable text wrapping. Enabling it turns off shrink-to-fit.
    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.alignment_mut().set_wrap(wrap);
    }

    #[inline]
    pub fn rotation(&self) -> i32 {
        self.d.alignment.rotation()
    }

    /// Set the text rotation. Expected in `[0, 180]` or `255`.
    pub fn set_rotation(&mut self, rotation: i32) {
        self.alignment_mut().set_rotation(rotation);
    }

    #[inline]
    pub fn indent(&self) -> i32 {
        self.d.alignment.indent()
    }

    /// Set the text indentation level. Expected to be at most 15.
    ///
    /// A non-zero indent switches the horizontal alignment to left unless it
    /// is already general, left, right or justify.
    pub fn set_indent(&mut self, indent: i32) {
        self.alignment_mut().set_indent(indent);
    }

    #[inline]
    pub fn shrink_to_fit(&self) -> bool {
        self.d.alignment.shrink_to_fit()
    }

    /// Turn shrink-to-fit on or off. Turning it on disables text wrapping and
    /// replaces fill, justify and distributed alignments with left.
    pub fn set_shrink_to_fit(&mut self, shrink: bool) {
        self.alignment_mut().set_shrink_to_fit(shrink);
    }

    /// Whether any alignment attribute differs from the defaults.
    #[inline]
    pub fn alignment_changed(&self) -> bool {
        self.d.alignment.has_settings()
    }

    /// `horizontal` attribute value, `None` for the default (general).
    pub fn horizontal_alignment_str(&self) -> Option<&'static str> {
        match self.horizontal_alignment() {
            HorizontalAlignment::General => None,
            align => Some(align.as_str()),
        }
    }

    /// `vertical` attribute value, `None` for the default (bottom).
    pub fn vertical_alignment_str(&self) -> Option<&'static str> {
        match self.vertical_alignment() {
            VerticalAlignment::Bottom => None,
            align => Some(align.as_str()),
        }
    }

    // Border

    /// Set the line style of the four outer edges.
    pub fn set_border_style(&mut self, style: BorderStyle) {
        let border = self.border_mut();
        for edge in BorderEdge::OUTER {
            border.set_style(edge, style);
        }
    }

    /// Set the line color of the four outer edges.
    pub fn set_border_color(&mut self, color: Option<Color>) {
        let border = self.border_mut();
        for edge in BorderEdge::OUTER {
            border.set_color(edge, color);
        }
    }

    #[inline]
    pub fn left_border_style(&self) -> BorderStyle {
        self.d.border.style(BorderEdge::Left)
    }

    pub fn set_left_border_style(&mut self, style: BorderStyle) {
        self.border_mut().set_style(BorderEdge::Left, style);
    }

    #[inline]
    pub fn left_border_color(&self) -> Option<Color> {
        self.d.border.color(BorderEdge::Left)
    }

    pub fn set_left_border_color(&mut self, color: Option<Color>) {
        self.border_mut().set_color(BorderEdge::Left, color);
    }

    #[inline]
    pub fn right_border_style(&self) -> BorderStyle {
        self.d.border.style(BorderEdge::Right)
    }

    pub fn set_right_border_style(&mut self, style: BorderStyle) {
        self.border_mut().set_style(BorderEdge::Right, style);
    }

    #[inline]
    pub fn right_border_color(&self) -> Option<Color> {
        self.d.border.color(BorderEdge::Right)
    }

    pub fn set_right_border_color(&mut self, color: Option<Color>) {
        self.border_mut().set_color(BorderEdge::Right, color);
    }

    #[inline]
    pub fn top_border_style(&self) -> BorderStyle {
        self.d.border.style(BorderEdge::Top)
    }

    pub fn set_top_border_style(&mut self, style: BorderStyle) {
        self.border_mut().set_style(BorderEdge::Top, style);
    }

    #[inline]
    pub fn top_border_color(&self) -> Option<Color> {
        self.d.border.color(BorderEdge::Top)
    }

    pub fn set_top_border_color(&mut self, color: Option<Color>) {
        self.border_mut().set_color(BorderEdge::Top, color);
    }

    #[inline]
    pub fn bottom_border_style(&self) -> BorderStyle {
        self.d.border.style(BorderEdge::Bottom)
    }

    pub fn set_bottom_border_style(&mut self, style: BorderStyle) {
        self.border_mut().set_style(BorderEdge::Bottom, style);
    }

    #[inline]
    pub fn bottom_border_color(&self) -> Option<Color> {
        self.d.border.color(BorderEdge::Bottom)
    }

    pub fn set_bottom_border_color(&mut self, color: Option<Color>) {
        self.border_mut().set_color(BorderEdge::Bottom, color);
    }

    #[inline]
    pub fn diagonal_border_style(&self) -> BorderStyle {
        self.d.border.style(BorderEdge::Diagonal)
    }

    pub fn set_diagonal_border_style(&mut self, style: BorderStyle) {
        self.border_mut().set_style(BorderEdge::Diagonal, style);
    }

    #[inline]
    pub fn diagonal_border_color(&self) -> Option<Color> {
        self.d.border.color(BorderEdge::Diagonal)
    }

    pub fn set_diagonal_border_color(&mut self, color: Option<Color>) {
        self.border_mut().set_color(BorderEdge::Diagonal, color);
    }

    #[inline]
    pub fn diagonal_border_type(&self) -> DiagonalBorderType {
        self.d.border.diagonal_type()
    }

    pub fn set_diagonal_border_type(&mut self, diagonal_type: DiagonalBorderType) {
        self.border_mut().set_diagonal_type(diagonal_type);
    }

    #[inline]
    pub fn border_index(&self) -> Option<u32> {
        self.d.border.index()
    }

    /// Record the border table index assigned by the style registry.
    pub fn set_border_index(&mut self, index: u32) {
        self.data_mut().border.set_index(index);
    }

    #[inline]
    pub fn border_index_valid(&self) -> bool {
        self.d.border.index_valid()
    }

    /// Canonical key of the border alone, for the shared border table.
    pub fn border_key(&self) -> GroupKey {
        GroupKey::new(self.d.border.key())
    }

    // Fill

    #[inline]
    pub fn fill_pattern(&self) -> FillPattern {
        self.d.fill.fill_pattern()
    }

    pub fn set_fill_pattern(&mut self, pattern: FillPattern) {
        self.fill_mut().set_fill_pattern(pattern);
    }

    #[inline]
    pub fn pattern_foreground_color(&self) -> Option<Color> {
        self.d.fill.foreground_color()
    }

    /// Set the pattern foreground color. A color on a fill without pattern
    /// makes the fill solid.
    pub fn set_pattern_foreground_color(&mut self, color: Option<Color>) {
        self.fill_mut().set_foreground_color(color);
    }

    #[inline]
    pub fn pattern_background_color(&self) -> Option<Color> {
        self.d.fill.background_color()
    }

    /// Set the pattern background color. A color on a fill without pattern
    /// makes the fill solid.
    pub fn set_pattern_background_color(&mut self, color: Option<Color>) {
        self.fill_mut().set_background_color(color);
    }

    #[inline]
    pub fn fill_index(&self) -> Option<u32> {
        self.d.fill.index()
    }

    /// Record the fill table index assigned by the style registry.
    pub fn set_fill_index(&mut self, index: u32) {
        self.data_mut().fill.set_index(index);
    }

    #[inline]
    pub fn fill_index_valid(&self) -> bool {
        self.d.fill.index_valid()
    }

    /// Canonical key of the fill alone, for the shared fill table.
    pub fn fill_key(&self) -> GroupKey {
        GroupKey::new(self.d.fill.key())
    }

    // Protection

    #[inline]
    pub fn hidden(&self) -> bool {
        self.d.protection.hidden()
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.protection_mut().set_hidden(hidden);
    }

    #[inline]
    pub fn locked(&self) -> bool {
        self.d.protection.locked()
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.protection_mut().set_locked(locked);
    }

    // Key and indices

    /// Whether the memoized key no longer describes the current attributes.
    #[inline]
    pub fn is_key_stale(&self) -> bool {
        self.d.is_key_stale()
    }

    /// Canonical key of the whole format.
    ///
    /// Rebuilds the memoized key when stale, which also forgets the `xf` and
    /// `dxf` assignments. Repeated calls without mutation return the same key
    /// without recomputing it.
    pub fn format_key(&mut self) -> &FormatKey {
        if self.d.is_key_stale() {
            self.data_mut().refresh_key();
        }
        &self.d.key
    }

    /// Canonical key of the whole format without touching the memo.
    ///
    /// Returns the memoized key when fresh and computes a temporary one
    /// otherwise.
    pub fn key(&self) -> FormatKey {
        if self.d.is_key_stale() {
            self.d.compute_key()
        } else {
            self.d.key.clone()
        }
    }

    /// Record the cell format table index assigned by the style registry.
    pub fn set_xf_index(&mut self, index: u32) {
        self.data_mut().xf.assign(index);
    }

    /// Last assigned cell format index, valid or not.
    #[inline]
    pub fn xf_index(&self) -> Option<u32> {
        self.d.xf.get()
    }

    /// Whether [`Format::xf_index`] was assigned against the current key.
    #[inline]
    pub fn xf_index_valid(&self) -> bool {
        !self.d.is_key_stale() && self.d.xf.is_assigned()
    }

    /// Record the differential format table index assigned by the style
    /// registry.
    pub fn set_dxf_index(&mut self, index: u32) {
        self.data_mut().dxf.assign(index);
    }

    /// Last assigned differential format index, valid or not.
    #[inline]
    pub fn dxf_index(&self) -> Option<u32> {
        self.d.dxf.get()
    }

    /// Whether [`Format::dxf_index`] was assigned against the current key.
    #[inline]
    pub fn dxf_index_valid(&self) -> bool {
        !self.d.is_key_stale() && self.d.dxf.is_assigned()
    }

    /// Whether this format belongs to the differential format table.
    #[inline]
    pub fn is_dxf_format(&self) -> bool {
        self.d.is_dxf
    }

    /// Classify the format as differential. Not part of the key.
    pub fn set_dxf_format(&mut self, is_dxf: bool) {
        self.data_mut().is_dxf = is_dxf;
    }

    /// Theme the colors of this format refer to.
    #[inline]
    pub fn theme(&self) -> i32 {
        self.d.theme
    }

    /// Set the theme id. Not part of the key.
    pub fn set_theme(&mut self, theme: i32) {
        self.data_mut().theme = theme;
    }

    /// Check the attributes against the ranges the file format accepts.
    ///
    /// Setters are permissive; this is the explicit opt-in check. Rotation
    /// must be within `[0, 180]` or equal `255`, indent within `[0, 15]`, and
    /// the font size positive.
    pub fn validate(&self) -> Result<()> {
        let rotation = self.rotation();
        if !(0..=180).contains(&rotation) && rotation != 255 {
            return Err(Error::InvalidAttributeRange {
                attribute: "rotation",
                value: rotation.into(),
            });
        }
        let indent = self.indent();
        if !(0..=15).contains(&indent) {
            return Err(Error::InvalidAttributeRange {
                attribute: "indent",
                value: indent.into(),
            });
        }
        let size = self.font_size();
        if size <= 0 {
            return Err(Error::InvalidAttributeRange {
                attribute: "font size",
                value: size.into(),
            });
        }
        Ok(())
    }
}

impl PartialEq for Format {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.d, &other.d) || self.key() == other.key()
    }
}

impl Eq for Format {}

impl Hash for Format {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Option<Color> {
        Some(Color::rgb(255, 0, 0))
    }

    #[test]
    fn test_new_format_is_stale() {
        let format = Format::new();
        assert!(format.is_key_stale());
        assert!(!format.xf_index_valid());
        assert!(!format.dxf_index_valid());
        assert_eq!(format.xf_index(), None);
        assert!(!format.is_dxf_format());
        assert!(Format::new_dxf().is_dxf_format());
    }

    #[test]
    fn test_format_key_idempotent() {
        let mut format = Format::new();
        format.set_font_bold(true);
        let first = format.format_key().clone();
        assert!(!format.is_key_stale());
        let second = format.format_key().clone();
        assert!(!format.is_key_stale());
        assert_eq!(first, second);
        assert_eq!(first, format.key());
    }

    #[test]
    fn test_key_without_memo_matches() {
        let mut format = Format::new();
        format.set_indent(2);
        let temporary = format.key();
        assert!(format.is_key_stale());
        assert_eq!(&temporary, format.format_key());
    }

    #[test]
    fn test_mutation_invalidates_indices() {
        let mut format = Format::new();
        format.format_key();
        format.set_xf_index(7);
        format.set_dxf_index(2);
        assert!(format.xf_index_valid());
        assert!(format.dxf_index_valid());

        format.set_font_bold(true);
        assert!(!format.xf_index_valid());
        assert!(!format.dxf_index_valid());

        // recomputing the key alone does not bring them back
        format.format_key();
        assert!(!format.xf_index_valid());
        assert!(!format.dxf_index_valid());
        assert_eq!(format.xf_index(), Some(7));

        format.set_xf_index(8);
        assert!(format.xf_index_valid());
        assert!(!format.dxf_index_valid());
        format.set_dxf_index(3);
        assert!(format.dxf_index_valid());
    }

    #[test]
    fn test_every_group_invalidates_indices() {
        let mutations: &[fn(&mut Format)] = &[
            |f: &mut Format| f.set_number_format_index(3),
            |f: &mut Format| f.set_font_size(20),
            |f: &mut Format| f.set_rotation(45),
            |f: &mut Format| f.set_bottom_border_style(BorderStyle::Thin),
            |f: &mut Format| f.set_fill_pattern(FillPattern::DarkGrid),
            |f: &mut Format| f.set_locked(false),
        ];
        for (i, mutate) in mutations.iter().enumerate() {
            let mut format = Format::new();
            format.format_key();
            format.set_xf_index(1);
            format.set_dxf_index(1);
            mutate(&mut format);
            assert!(!format.xf_index_valid(), "mutation {i} kept xf valid");
            assert!(!format.dxf_index_valid(), "mutation {i} kept dxf valid");
        }
    }

    #[test]
    fn test_sub_index_survives_unrelated_changes() {
        let mut format = Format::new();
        format.set_font_bold(true);
        format.format_key();
        format.set_font_index(4);
        format.set_fill_index(2);

        format.set_text_wrap(true);
        format.format_key();
        assert!(format.font_index_valid());
        assert!(format.fill_index_valid());

        format.set_pattern_foreground_color(red());
        assert!(format.font_index_valid());
        assert!(!format.fill_index_valid());
    }

    #[test]
    fn test_index_assignment_does_not_change_key() {
        let mut format = Format::new();
        let before = format.format_key().clone();
        format.set_font_index(1);
        format.set_border_index(1);
        format.set_fill_index(1);
        format.set_xf_index(1);
        format.set_theme(3);
        format.set_dxf_format(true);
        assert!(!format.is_key_stale());
        assert_eq!(&before, format.format_key());
    }

    #[test]
    fn test_alignment_coupling() {
        let mut format = Format::new();
        format.set_horizontal_alignment(HorizontalAlignment::Left);
        format.set_indent(5);
        format.set_horizontal_alignment(HorizontalAlignment::Center);
        assert_eq!(format.indent(), 0);

        let mut format = Format::new();
        assert_eq!(format.horizontal_alignment(), HorizontalAlignment::General);
        format.set_indent(3);
        assert_eq!(format.indent(), 3);

        let mut format = Format::new();
        format.set_horizontal_alignment(HorizontalAlignment::CenterContinuous);
        format.set_indent(3);
        assert_eq!(format.horizontal_alignment(), HorizontalAlignment::Left);
        assert_eq!(format.indent(), 3);
    }

    #[test]
    fn test_shrink_wrap_exclusive() {
        let mut format = Format::new();
        format.set_text_wrap(true);
        format.set_shrink_to_fit(true);
        assert!(!format.text_wrap());
        assert!(format.shrink_to_fit());
    }

    #[test]
    fn test_date_time_classification() {
        let mut format = Format::new();
        format.set_number_format_index(16);
        assert!(format.is_date_time_format());

        let mut format = Format::new();
        format.set_number_format("[Red]hh:mm");
        assert!(format.is_date_time_format());

        let mut format = Format::new();
        format.set_number_format("0.00");
        assert!(!format.is_date_time_format());
    }

    #[test]
    fn test_fill_side_effect() {
        let mut format = Format::new();
        assert_eq!(format.fill_pattern(), FillPattern::None);
        format.set_pattern_foreground_color(red());
        assert_eq!(format.fill_pattern(), FillPattern::Solid);
        assert_eq!(format.pattern_foreground_color(), red());
    }

    #[test]
    fn test_empty_number_format_is_noop() {
        let mut format = Format::new();
        format.set_number_format("0.0%");
        let before = format.format_key().clone();
        format.set_xf_index(9);

        format.set_number_format("");
        assert!(!format.is_key_stale());
        assert!(format.xf_index_valid());
        assert_eq!(&before, format.format_key());
        assert_eq!(format.number_format(), "0.0%");
    }

    #[test]
    fn test_number_format_resolution() {
        let mut format = Format::new();
        assert!(format.num_fmt_index_valid());
        format.set_number_format("0.000");
        assert!(!format.num_fmt_index_valid());
        format.set_num_fmt(164, "0.000");
        assert!(format.num_fmt_index_valid());
        assert_eq!(format.number_format_index(), 164);
        assert_eq!(format.number_format(), "0.000");
    }

    #[test]
    fn test_single_field_perturbation() {
        let perturbations: &[(&str, fn(&mut Format))] = &[
            ("number index", |f: &mut Format| f.set_number_format_index(10)),
            ("number code", |f: &mut Format| f.set_number_format("0.0")),
            ("font size", |f: &mut Format| f.set_font_size(12)),
            ("font italic", |f: &mut Format| f.set_font_italic(true)),
            ("font strike", |f: &mut Format| f.set_font_strike_out(true)),
            ("font color", |f: &mut Format| f.set_font_color(Some(Color::rgb(1, 2, 3)))),
            ("font theme", |f: &mut Format| f.set_font_theme_color(Some("4".into()))),
            ("font bold", |f: &mut Format| f.set_font_bold(true)),
            ("font script", |f: &mut Format| f.set_font_script(FontScript::Sub)),
            ("font underline", |f: &mut Format| f.set_font_underline(FontUnderline::Single)),
            ("font outline", |f: &mut Format| f.set_font_outline(true)),
            ("font shadow", |f: &mut Format| f.set_font_shadow(true)),
            ("font name", |f: &mut Format| f.set_font_name("Arial")),
            ("font family", |f: &mut Format| f.set_font_family(1)),
            ("font scheme", |f: &mut Format| f.set_font_scheme("major")),
            ("horizontal", |f: &mut Format| f.set_horizontal_alignment(HorizontalAlignment::Right)),
            ("vertical", |f: &mut Format| f.set_vertical_alignment(VerticalAlignment::Top)),
            ("wrap", |f: &mut Format| f.set_text_wrap(true)),
            ("rotation", |f: &mut Format| f.set_rotation(90)),
            ("indent", |f: &mut Format| f.set_indent(1)),
            ("shrink", |f: &mut Format| f.set_shrink_to_fit(true)),
            ("left style", |f: &mut Format| f.set_left_border_style(BorderStyle::Thin)),
            ("left color", |f: &mut Format| f.set_left_border_color(red())),
            ("right style", |f: &mut Format| f.set_right_border_style(BorderStyle::Thin)),
            ("right color", |f: &mut Format| f.set_right_border_color(red())),
            ("top style", |f: &mut Format| f.set_top_border_style(BorderStyle::Thin)),
            ("top color", |f: &mut Format| f.set_top_border_color(red())),
            ("bottom style", |f: &mut Format| f.set_bottom_border_style(BorderStyle::Thin)),
            ("bottom color", |f: &mut Format| f.set_bottom_border_color(red())),
            ("diagonal style", |f: &mut Format| f.set_diagonal_border_style(BorderStyle::Thin)),
            ("diagonal color", |f: &mut Format| f.set_diagonal_border_color(red())),
            ("diagonal type", |f: &mut Format| f.set_diagonal_border_type(DiagonalBorderType::Up)),
            ("fill pattern", |f: &mut Format| f.set_fill_pattern(FillPattern::Gray125)),
            ("fill foreground", |f: &mut Format| {
                f.set_fill_pattern(FillPattern::Solid);
                f.set_pattern_foreground_color(red())
            }),
            ("fill background", |f: &mut Format| {
                f.set_fill_pattern(FillPattern::Solid);
                f.set_pattern_background_color(red())
            }),
            ("hidden", |f: &mut Format| f.set_hidden(true)),
            ("locked", |f: &mut Format| f.set_locked(false)),
        ];

        let mut base = Format::new();
        let base_key = base.format_key().clone();

        let mut seen: Vec<(&str, FormatKey)> = Vec::new();
        for &(name, perturb) in perturbations {
            let mut format = Format::new();
            perturb(&mut format);
            let key = format.format_key().clone();
            assert_ne!(key, base_key, "{name} did not change the key");
            assert_ne!(format, base, "{name} compares equal to the default");

            let mut twin = Format::new();
            perturb(&mut twin);
            assert_eq!(format, twin, "{name} is not deterministic");

            for (other, other_key) in &seen {
                assert_ne!(&key, other_key, "{name} collides with {other}");
            }
            seen.push((name, key));
        }
    }

    #[test]
    fn test_equality_ignores_indices() {
        let mut a = Format::new();
        a.set_font_bold(true);
        a.format_key();
        a.set_xf_index(3);
        a.set_theme(1);

        let mut b = Format::new();
        b.set_font_bold(true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_copy_on_write() {
        let mut original = Format::new();
        original.set_font_bold(true);
        original.format_key();
        original.set_xf_index(5);

        let mut copy = original.clone();
        assert!(Arc::ptr_eq(&original.d, &copy.d));

        copy.set_font_italic(true);
        assert!(!Arc::ptr_eq(&original.d, &copy.d));
        assert!(!original.font_italic());
        assert!(original.xf_index_valid());
        assert!(!original.is_key_stale());
        assert!(copy.font_italic());
        assert!(copy.font_bold());
        assert_ne!(original, copy);
    }

    #[test]
    fn test_validate() {
        let mut format = Format::new();
        assert!(format.validate().is_ok());

        format.set_rotation(255);
        assert!(format.validate().is_ok());

        format.set_rotation(200);
        assert_eq!(
            format.validate(),
            Err(Error::InvalidAttributeRange {
                attribute: "rotation",
                value: 200
            })
        );
        // permissive setters keep the value and key it
        assert_eq!(format.rotation(), 200);

        let mut format = Format::new();
        format.set_indent(16);
        assert!(matches!(
            format.validate(),
            Err(Error::InvalidAttributeRange { attribute: "indent", .. })
        ));
    }

    #[test]
    fn test_alignment_strings() {
        let mut format = Format::new();
        assert_eq!(format.horizontal_alignment_str(), None);
        assert_eq!(format.vertical_alignment_str(), None);
        assert!(!format.alignment_changed());

        format.set_horizontal_alignment(HorizontalAlignment::CenterContinuous);
        format.set_vertical_alignment(VerticalAlignment::Center);
        assert_eq!(format.horizontal_alignment_str(), Some("centerContinuous"));
        assert_eq!(format.vertical_alignment_str(), Some("center"));
        assert!(format.alignment_changed());
    }

    #[test]
    fn test_border_shorthands() {
        let mut format = Format::new();
        format.set_border_style(BorderStyle::Medium);
        format.set_border_color(red());
        for edge in BorderEdge::OUTER {
            assert_eq!(format.border().style(edge), BorderStyle::Medium);
            assert_eq!(format.border().color(edge), red());
        }
        assert_eq!(format.diagonal_border_style(), BorderStyle::None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Bold(bool),
            Size(i32),
            Name(String),
            Color(Option<u32>),
            Horizontal(u8),
            Indent(i32),
            Wrap(bool),
            Shrink(bool),
            Rotation(i32),
            Border(u8),
            Foreground(Option<u32>),
            NumberIndex(i32),
            NumberCode(String),
            Locked(bool),
        }

        const HORIZONTAL: [HorizontalAlignment; 8] = [
            HorizontalAlignment::General,
            HorizontalAlignment::Left,
            HorizontalAlignment::Center,
            HorizontalAlignment::Right,
            HorizontalAlignment::Fill,
            HorizontalAlignment::Justify,
            HorizontalAlignment::CenterContinuous,
            HorizontalAlignment::Distributed,
        ];

        const BORDERS: [BorderStyle; 4] = [
            BorderStyle::None,
            BorderStyle::Thin,
            BorderStyle::Double,
            BorderStyle::SlantDashDot,
        ];

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                any::<bool>().prop_map(Op::Bold),
                (1i32..72).prop_map(Op::Size),
                "[A-Za-z ]{0,8}".prop_map(Op::Name),
                proptest::option::of(any::<u32>()).prop_map(Op::Color),
                (0u8..8).prop_map(Op::Horizontal),
                (0i32..16).prop_map(Op::Indent),
                any::<bool>().prop_map(Op::Wrap),
                any::<bool>().prop_map(Op::Shrink),
                (0i32..=180).prop_map(Op::Rotation),
                (0u8..4).prop_map(Op::Border),
                proptest::option::of(any::<u32>()).prop_map(Op::Foreground),
                (0i32..50).prop_map(Op::NumberIndex),
                "[0#.,dmhys]{0,6}".prop_map(Op::NumberCode),
                any::<bool>().prop_map(Op::Locked),
            ]
        }

        fn apply(format: &mut Format, op: &Op) {
            match op {
                Op::Bold(v) => format.set_font_bold(*v),
                Op::Size(v) => format.set_font_size(*v),
                Op::Name(v) => format.set_font_name(v),
                Op::Color(v) => format.set_font_color(v.map(Color::from_argb)),
                Op::Horizontal(i) => format.set_horizontal_alignment(HORIZONTAL[*i as usize]),
                Op::Indent(v) => format.set_indent(*v),
                Op::Wrap(v) => format.set_text_wrap(*v),
                Op::Shrink(v) => format.set_shrink_to_fit(*v),
                Op::Rotation(v) => format.set_rotation(*v),
                Op::Border(i) => format.set_border_style(BORDERS[*i as usize]),
                Op::Foreground(v) => {
                    format.set_pattern_foreground_color(v.map(Color::from_argb))
                },
                Op::NumberIndex(v) => format.set_number_format_index(*v),
                Op::NumberCode(v) => format.set_number_format(v),
                Op::Locked(v) => format.set_locked(*v),
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_same_ops_same_key(ops in prop::collection::vec(op_strategy(), 0..24)) {
                let mut a = Format::new();
                let mut b = Format::new();
                for op in &ops {
                    apply(&mut a, op);
                    apply(&mut b, op);
                }
                prop_assert_eq!(a.format_key().clone(), b.format_key().clone());
                prop_assert!(a == b);
            }

            #[test]
            fn prop_alignment_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..24)) {
                let mut format = Format::new();
                for op in &ops {
                    apply(&mut format, op);
                    prop_assert!(!(format.text_wrap() && format.shrink_to_fit()));
                    if format.shrink_to_fit() {
                        prop_assert!(!matches!(
                            format.horizontal_alignment(),
                            HorizontalAlignment::Fill
                                | HorizontalAlignment::Justify
                                | HorizontalAlignment::Distributed
                        ));
                    }
                }
            }

            #[test]
            fn prop_key_idempotent(ops in prop::collection::vec(op_strategy(), 0..24)) {
                let mut format = Format::new();
                for op in &ops {
                    apply(&mut format, op);
                }
                let first = format.format_key().clone();
                prop_assert!(!format.is_key_stale());
                prop_assert_eq!(&first, format.format_key());
                prop_assert_eq!(first, format.key());
            }

            #[test]
            fn prop_clone_isolated(
                before in prop::collection::vec(op_strategy(), 0..12),
                after in prop::collection::vec(op_strategy(), 1..12),
            ) {
                let mut original = Format::new();
                for op in &before {
                    apply(&mut original, op);
                }
                let snapshot = original.key();

                let mut copy = original.clone();
                for op in &after {
                    apply(&mut copy, op);
                }
                prop_assert_eq!(original.key(), snapshot);
            }
        }
    }
}
