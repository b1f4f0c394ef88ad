use std::fmt;

/// ARGB color representation.
///
/// Represents a color using alpha, red, green, and blue components, each in the
/// range 0-255. Spreadsheet styles store colors as `AARRGGBB`; an absent color
/// is modelled as `Option<Color>::None` by the style types.
///
/// # Examples
///
/// ```rust
/// use xlstyle::common::Color;
///
/// // Create an opaque red color
/// let red = Color::rgb(255, 0, 0);
/// assert_eq!(red.to_hex(), "FFFF0000");
///
/// // Create from hex string
/// let blue = Color::from_hex("0000FF").unwrap();
/// assert_eq!(blue.a, 0xFF);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Alpha component (0-255, 255 is opaque)
    pub a: u8,
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Color {
    /// Create a new color from all four components.
    #[inline]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Create an opaque color.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use xlstyle::common::Color;
    ///
    /// let color = Color::rgb(255, 128, 0); // Orange
    /// assert_eq!(color.argb(), 0xFFFF8000);
    /// ```
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(0xFF, r, g, b)
    }

    /// Create a color from a packed `0xAARRGGBB` value.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self::new(
            (argb >> 24) as u8,
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
        )
    }

    /// Packed `0xAARRGGBB` value.
    #[inline]
    pub const fn argb(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Create a color from a hex string.
    ///
    /// Accepts `RRGGBB` (opaque) or `AARRGGBB`, with an optional `#` prefix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use xlstyle::common::Color;
    ///
    /// let red = Color::from_hex("FF0000").unwrap();
    /// let translucent = Color::from_hex("#80FF0000").unwrap();
    /// assert_eq!(red.a, 0xFF);
    /// assert_eq!(translucent.a, 0x80);
    /// assert!(Color::from_hex("F00").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => u32::from_str_radix(hex, 16)
                .ok()
                .map(|rgb| Self::from_argb(0xFF00_0000 | rgb)),
            8 => u32::from_str_radix(hex, 16).ok().map(Self::from_argb),
            _ => None,
        }
    }

    /// Convert to an `AARRGGBB` hex string (without # prefix).
    pub fn to_hex(&self) -> String {
        format!("{:08X}", self.argb())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_packing() {
        let color = Color::new(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color.argb(), 0x1234_5678);
        assert_eq!(Color::from_argb(0x1234_5678), color);
    }

    #[test]
    fn test_hex() {
        assert_eq!(Color::from_hex("00FF00"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(Color::from_hex("zzzzzz"), None);
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#FF010203");
    }
}
