//! Number format definitions and utilities.

use aho_corasick::AhoCorasick;
use bytes::Bytes;
use once_cell::sync::Lazy;

use super::key::KeyWriter;

// Built only once; color directives never carry date semantics
static COLOR_TAGS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build([
            "[Green]", "[White]", "[Blue]", "[Magenta]", "[Yellow]", "[Cyan]", "[Red]",
        ])
        .expect("Failed to build color tag matcher")
});

/// First id available for custom number formats.
pub const FIRST_CUSTOM_NUMBER_FORMAT_ID: u32 = 164;

/// Number format attributes of a cell format.
///
/// A number format is identified either by its id (built-in formats 0-163 or a
/// custom id assigned by the style registry) or by its format code. Setting a
/// code makes the id non-authoritative until the registry resolves it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    index: i32,
    code: String,
    index_authoritative: bool,
    dirty: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            index: 0,
            code: String::new(),
            index_authoritative: true,
            dirty: false,
        }
    }
}

impl NumberFormat {
    /// Create the "General" number format.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number format id.
    #[inline]
    pub fn index(&self) -> i32 {
        self.index
    }

    /// Format code. Empty for built-in formats selected by id.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Whether [`NumberFormat::index`] identifies the current format.
    #[inline]
    pub fn is_index_authoritative(&self) -> bool {
        self.index_authoritative
    }

    /// Select a format by id.
    pub fn set_index(&mut self, index: i32) {
        self.index = index;
        self.index_authoritative = true;
        self.dirty = true;
    }

    /// Select a format by code.
    ///
    /// Empty codes are ignored and leave the format untouched. Returns whether
    /// the format changed.
    pub fn set_code(&mut self, code: &str) -> bool {
        if code.is_empty() {
            return false;
        }
        self.code = code.to_string();
        self.index_authoritative = false;
        self.dirty = true;
        true
    }

    /// Record the id resolved for `code` by the style registry.
    pub(crate) fn resolve(&mut self, index: i32, code: &str) {
        self.index = index;
        self.code = code.to_string();
        self.index_authoritative = true;
        self.dirty = true;
    }

    /// Whether the format probably displays dates or times.
    ///
    /// Built-in ids are classified by their known ranges. Format codes are
    /// classified heuristically: after removing color directives such as
    /// `[Red]`, any of `d`, `m`, `h`, `y` or `s` marks a date/time format.
    pub fn is_date_time(&self) -> bool {
        if self.index_authoritative && self.code.is_empty() {
            return matches!(self.index, 15..=22 | 45..=47);
        }
        let stripped = COLOR_TAGS.replace_all(&self.code, &[""; 7]);
        stripped.contains(['d', 'm', 'h', 'y', 's'])
    }

    /// Canonical key: the id when authoritative, the code otherwise.
    pub fn key(&self) -> Bytes {
        let mut w = KeyWriter::with_capacity(8 + self.code.len());
        if self.index_authoritative {
            w.int(self.index);
        } else {
            w.str(&self.code);
        }
        w.finish()
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

/// Get the format code for a built-in number format ID.
///
/// Returns `None` if the ID is not a recognized built-in format.
/// Built-in formats are Excel's standard formats (0-163).
pub fn builtin_format_code(id: u32) -> Option<&'static str> {
    match id {
        0 => Some("General"),
        1 => Some("0"),
        2 => Some("0.00"),
        3 => Some("#,##0"),
        4 => Some("#,##0.00"),
        9 => Some("0%"),
        10 => Some("0.00%"),
        11 => Some("0.00E+00"),
        12 => Some("# ?/?"),
        13 => Some("# ??/??"),
        14 => Some("mm-dd-yy"),
        15 => Some("d-mmm-yy"),
        16 => Some("d-mmm"),
        17 => Some("mmm-yy"),
        18 => Some("h:mm AM/PM"),
        19 => Some("h:mm:ss AM/PM"),
        20 => Some("h:mm"),
        21 => Some("h:mm:ss"),
        22 => Some("m/d/yy h:mm"),
        37 => Some("#,##0 ;(#,##0)"),
        38 => Some("#,##0 ;[Red](#,##0)"),
        39 => Some("#,##0.00;(#,##0.00)"),
        40 => Some("#,##0.00;[Red](#,##0.00)"),
        45 => Some("mm:ss"),
        46 => Some("[h]:mm:ss"),
        47 => Some("mmss.0"),
        48 => Some("##0.0E+0"),
        49 => Some("@"),
        _ => None,
    }
}

/// Reverse lookup of [`builtin_format_code`].
pub fn builtin_format_id(code: &str) -> Option<u32> {
    (0..=49).find(|&id| builtin_format_code(id) == Some(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_code(code: &str) -> NumberFormat {
        let mut fmt = NumberFormat::new();
        fmt.set_code(code);
        fmt
    }

    #[test]
    fn test_builtin_ids_classification() {
        let mut fmt = NumberFormat::new();
        assert!(!fmt.is_date_time());

        for id in [15, 16, 22, 45, 47] {
            fmt.set_index(id);
            assert!(fmt.is_date_time(), "id {id} should be a date/time format");
        }
        for id in [0, 2, 14, 23, 44, 48] {
            fmt.set_index(id);
            assert!(!fmt.is_date_time(), "id {id} should not be a date/time format");
        }
    }

    #[test]
    fn test_code_classification() {
        assert!(with_code("[Red]hh:mm").is_date_time());
        assert!(with_code("yyyy-mm-dd").is_date_time());
        assert!(!with_code("0.00").is_date_time());
        assert!(!with_code("[Red]0.00").is_date_time());
        assert!(!with_code("[Green]#,##0;[Magenta]-#,##0").is_date_time());
        // case-sensitive token match
        assert!(!with_code("0.00 \"DMHYS\"").is_date_time());
    }

    #[test]
    fn test_empty_code_is_noop() {
        let mut fmt = NumberFormat::new();
        assert!(!fmt.set_code(""));
        assert!(!fmt.is_dirty());
        assert!(fmt.is_index_authoritative());
    }

    #[test]
    fn test_code_makes_index_stale() {
        let mut fmt = NumberFormat::new();
        fmt.set_index(2);
        assert!(fmt.set_code("0.000"));
        assert!(!fmt.is_index_authoritative());
        assert_eq!(fmt.index(), 2);

        fmt.resolve(164, "0.000");
        assert!(fmt.is_index_authoritative());
        assert_eq!(fmt.index(), 164);
    }

    #[test]
    fn test_key_ignores_stale_index() {
        let mut a = NumberFormat::new();
        a.set_index(4);
        a.set_code("0.0");

        let b = with_code("0.0");
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), NumberFormat::new().key());
    }

    #[test]
    fn test_builtin_format_code() {
        assert_eq!(builtin_format_code(0), Some("General"));
        assert_eq!(builtin_format_code(14), Some("mm-dd-yy"));
        assert_eq!(builtin_format_code(22), Some("m/d/yy h:mm"));
        assert_eq!(builtin_format_code(999), None);

        assert_eq!(builtin_format_id("0.00"), Some(2));
        assert_eq!(builtin_format_id("@"), Some(49));
        assert_eq!(builtin_format_id("0.000"), None);
    }
}
