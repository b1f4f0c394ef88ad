//! Style tables for XLSX writers.
//!
//! This module collects the formats used by a workbook into the shared tables
//! that `styles.xml` is made of: number formats, fonts, fills, borders, cell
//! formats (`cellXfs`) and differential formats (`dxfs`). Identical records
//! are collapsed by comparing their canonical keys, and the resulting indices
//! are written back into the [`Format`] values.

use std::collections::HashMap;

use crate::common::{Error, Result};
use crate::ooxml::xlsx::styles::{
    Border, FIRST_CUSTOM_NUMBER_FORMAT_ID, Fill, FillPattern, Font, Format, FormatKey, GroupKey,
    builtin_format_id,
};

/// Registry configuration.
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Id given to the first custom number format.
    pub first_custom_number_format_id: u32,
    /// Seed the records Excel requires at fixed positions: font 0, fills 0
    /// (none) and 1 (gray125), border 0 and cell format 0.
    pub seed_defaults: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            first_custom_number_format_id: FIRST_CUSTOM_NUMBER_FORMAT_ID,
            seed_defaults: true,
        }
    }
}

/// A custom number format record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomNumberFormat {
    pub id: u32,
    pub code: String,
}

/// Deduplicating registry of style records.
///
/// This struct collects all unique fonts, fills, borders, number formats and
/// cell formats, assigns indices to them, and exposes the resulting tables to
/// a serializer.
///
/// # Examples
///
/// ```rust
/// use xlstyle::{Format, StyleRegistry};
///
/// let mut registry = StyleRegistry::new();
///
/// let mut header = Format::new();
/// header.set_font_bold(true);
/// let mut same = header.clone();
/// same.set_font_bold(true);
///
/// let a = registry.add_xf_format(&mut header);
/// let b = registry.add_xf_format(&mut same);
/// assert_eq!(a, 1);
/// assert_eq!(a, b);
/// assert!(same.xf_index_valid());
/// ```
#[derive(Debug)]
pub struct StyleRegistry {
    options: RegistryOptions,
    /// Unique fonts (index -> font)
    fonts: Vec<Font>,
    /// Font lookup (font key -> index)
    font_map: HashMap<GroupKey, u32>,
    /// Unique fills (index -> fill)
    fills: Vec<Fill>,
    /// Fill lookup (fill key -> index)
    fill_map: HashMap<GroupKey, u32>,
    /// Unique borders (index -> border)
    borders: Vec<Border>,
    /// Border lookup (border key -> index)
    border_map: HashMap<GroupKey, u32>,
    /// Custom number formats, in registration order
    number_formats: Vec<CustomNumberFormat>,
    /// Number format lookup (format code -> id)
    number_format_map: HashMap<String, u32>,
    /// Cell formats (XF records)
    xf_formats: Vec<Format>,
    /// Cell format lookup (format key -> index)
    xf_map: HashMap<FormatKey, u32>,
    /// Differential formats (DXF records)
    dxf_formats: Vec<Format>,
    /// Differential format lookup (format key -> index)
    dxf_map: HashMap<FormatKey, u32>,
}

impl StyleRegistry {
    /// Create a registry seeded with the default records.
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        let seed = options.seed_defaults;
        let mut registry = Self {
            options,
            fonts: Vec::new(),
            font_map: HashMap::new(),
            fills: Vec::new(),
            fill_map: HashMap::new(),
            borders: Vec::new(),
            border_map: HashMap::new(),
            number_formats: Vec::new(),
            number_format_map: HashMap::new(),
            xf_formats: Vec::new(),
            xf_map: HashMap::new(),
            dxf_formats: Vec::new(),
            dxf_map: HashMap::new(),
        };

        if seed {
            // Default font, fill "none", border and cell format 0
            registry.add_xf_format(&mut Format::new());

            // Fill 1: gray125 (Excel default)
            let mut gray = Format::new();
            gray.set_fill_pattern(FillPattern::Gray125);
            registry.add_fill(&mut gray);
        }

        registry
    }

    /// Resolve the number format of `format` to an id and write it back.
    ///
    /// Codes of built-in formats map to their built-in id; other codes get a
    /// custom id, shared by every format using the same code. A custom id
    /// chosen by the caller is kept unless it already belongs to another code
    /// or the code is already registered under another id, in which case the
    /// format is remapped to the registered id.
    pub fn add_number_format(&mut self, format: &mut Format) -> i32 {
        if format.num_fmt_index_valid() {
            let index = format.number_format_index();
            let code = format.number_format();
            let first = self.options.first_custom_number_format_id;
            if code.is_empty() || !u32::try_from(index).is_ok_and(|id| id >= first) {
                return index;
            }

            let id = index as u32;
            match self.number_format_map.get(code) {
                Some(&known) if known == id => return index,
                Some(&known) => {
                    log::debug!("number format {code:?} already registered as {known}, not {id}");
                },
                None if !self.is_custom_id_taken(id) => {
                    self.record_number_format(id, code);
                    return index;
                },
                None => {
                    log::debug!("number format id {id} already taken, remapping {code:?}");
                },
            }
        }

        let code = format.number_format().to_string();
        let id = match builtin_format_id(&code) {
            Some(id) => id,
            None => match self.number_format_map.get(&code) {
                Some(&id) => id,
                None => {
                    let id = self.next_custom_number_format_id();
                    self.record_number_format(id, &code);
                    id
                },
            },
        };
        format.set_num_fmt(id as i32, &code);
        id as i32
    }

    fn is_custom_id_taken(&self, id: u32) -> bool {
        self.number_formats.iter().any(|f| f.id == id)
    }

    fn next_custom_number_format_id(&self) -> u32 {
        self.number_formats
            .iter()
            .map(|f| f.id + 1)
            .max()
            .unwrap_or(self.options.first_custom_number_format_id)
            .max(self.options.first_custom_number_format_id)
    }

    fn record_number_format(&mut self, id: u32, code: &str) {
        log::debug!("registered number format {id}: {code:?}");
        self.number_formats.push(CustomNumberFormat {
            id,
            code: code.to_string(),
        });
        self.number_format_map.insert(code.to_string(), id);
    }

    /// Add the font of `format` to the font table and return its index.
    pub fn add_font(&mut self, format: &mut Format) -> u32 {
        if let (true, Some(index)) = (format.font_index_valid(), format.font_index()) {
            return index;
        }

        let key = format.font_key();
        let index = match self.font_map.get(&key) {
            Some(&index) => index,
            None => {
                let index = self.fonts.len() as u32;
                let mut font = format.font().clone();
                font.set_index(index);
                self.fonts.push(font);
                self.font_map.insert(key, index);
                log::debug!("registered font {index}");
                index
            },
        };
        format.set_font_index(index);
        index
    }

    /// Add the border of `format` to the border table and return its index.
    pub fn add_border(&mut self, format: &mut Format) -> u32 {
        if let (true, Some(index)) = (format.border_index_valid(), format.border_index()) {
            return index;
        }

        let key = format.border_key();
        let index = match self.border_map.get(&key) {
            Some(&index) => index,
            None => {
                let index = self.borders.len() as u32;
                let mut border = format.border().clone();
                border.set_index(index);
                self.borders.push(border);
                self.border_map.insert(key, index);
                log::debug!("registered border {index}");
                index
            },
        };
        format.set_border_index(index);
        index
    }

    /// Add the fill of `format` to the fill table and return its index.
    pub fn add_fill(&mut self, format: &mut Format) -> u32 {
        if let (true, Some(index)) = (format.fill_index_valid(), format.fill_index()) {
            return index;
        }

        let key = format.fill_key();
        let index = match self.fill_map.get(&key) {
            Some(&index) => index,
            None => {
                let index = self.fills.len() as u32;
                let mut fill = format.fill().clone();
                fill.set_index(index);
                self.fills.push(fill);
                self.fill_map.insert(key, index);
                log::debug!("registered fill {index}");
                index
            },
        };
        format.set_fill_index(index);
        index
    }

    /// Add a cell format and return its index in the cell format table.
    ///
    /// A format that already carries a valid index is returned as is. A
    /// format equal to one registered before gets that record's index; its
    /// other attributes (theme, differential index and flag) are left alone.
    pub fn add_xf_format(&mut self, format: &mut Format) -> u32 {
        if let (true, Some(index)) = (format.xf_index_valid(), format.xf_index()) {
            return index;
        }

        self.add_number_format(format);
        self.add_font(format);
        self.add_border(format);
        self.add_fill(format);

        let key = format.format_key().clone();
        if let Some(&index) = self.xf_map.get(&key) {
            format.set_xf_index(index);
            return index;
        }

        let index = self.xf_formats.len() as u32;
        format.set_xf_index(index);
        self.xf_formats.push(format.clone());
        self.xf_map.insert(key, index);
        log::debug!("registered cell format {index}");
        index
    }

    /// Add a differential format and return its index in the dxf table.
    ///
    /// Differential records embed their font, border and fill, so only the
    /// number format is resolved against the shared tables.
    pub fn add_dxf_format(&mut self, format: &mut Format) -> u32 {
        if let (true, Some(index)) = (format.dxf_index_valid(), format.dxf_index()) {
            return index;
        }

        self.add_number_format(format);
        if !format.is_dxf_format() {
            format.set_dxf_format(true);
        }

        let key = format.format_key().clone();
        if let Some(&index) = self.dxf_map.get(&key) {
            format.set_dxf_index(index);
            return index;
        }

        let index = self.dxf_formats.len() as u32;
        format.set_dxf_index(index);
        self.dxf_formats.push(format.clone());
        self.dxf_map.insert(key, index);
        log::debug!("registered differential format {index}");
        index
    }

    #[inline]
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    #[inline]
    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    #[inline]
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    #[inline]
    pub fn borders(&self) -> &[Border] {
        &self.borders
    }

    /// Custom number formats, in registration order.
    #[inline]
    pub fn number_formats(&self) -> &[CustomNumberFormat] {
        &self.number_formats
    }

    #[inline]
    pub fn xf_formats(&self) -> &[Format] {
        &self.xf_formats
    }

    #[inline]
    pub fn dxf_formats(&self) -> &[Format] {
        &self.dxf_formats
    }

    /// Get a font by index.
    pub fn font(&self, index: u32) -> Result<&Font> {
        self.fonts.get(index as usize).ok_or(Error::IndexOutOfRange {
            table: "font",
            index,
        })
    }

    /// Get a fill by index.
    pub fn fill(&self, index: u32) -> Result<&Fill> {
        self.fills.get(index as usize).ok_or(Error::IndexOutOfRange {
            table: "fill",
            index,
        })
    }

    /// Get a border by index.
    pub fn border(&self, index: u32) -> Result<&Border> {
        self.borders.get(index as usize).ok_or(Error::IndexOutOfRange {
            table: "border",
            index,
        })
    }

    /// Get a cell format by index.
    pub fn xf(&self, index: u32) -> Result<&Format> {
        self.xf_formats
            .get(index as usize)
            .ok_or(Error::IndexOutOfRange { table: "xf", index })
    }

    /// Get a differential format by index.
    pub fn dxf(&self, index: u32) -> Result<&Format> {
        self.dxf_formats
            .get(index as usize)
            .ok_or(Error::IndexOutOfRange {
                table: "dxf",
                index,
            })
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
