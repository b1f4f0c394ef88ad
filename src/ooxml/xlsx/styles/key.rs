//! Canonical encoding for style keys.
//!
//! Every field is written with a one-byte type tag, and variable-length
//! payloads (strings, nested group keys) carry a length prefix. Two different
//! field sequences therefore never encode to the same bytes, which is what
//! lets the style tables use the encoded key as a deduplication identity.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::common::Color;

const TAG_BOOL: u8 = 0x01;
const TAG_INT: u8 = 0x02;
const TAG_ENUM: u8 = 0x03;
const TAG_STR: u8 = 0x04;
const TAG_NONE: u8 = 0x05;
const TAG_COLOR: u8 = 0x06;
const TAG_NESTED: u8 = 0x07;

/// Append-only writer for canonical keys.
pub(crate) struct KeyWriter {
    buf: BytesMut,
}

impl KeyWriter {
    #[inline]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn bool(&mut self, value: bool) -> &mut Self {
        self.buf.put_u8(TAG_BOOL);
        self.buf.put_u8(value as u8);
        self
    }

    #[inline]
    pub(crate) fn int(&mut self, value: i32) -> &mut Self {
        self.buf.put_u8(TAG_INT);
        self.buf.put_i32(value);
        self
    }

    /// Write an enum discriminant.
    #[inline]
    pub(crate) fn variant(&mut self, discriminant: u8) -> &mut Self {
        self.buf.put_u8(TAG_ENUM);
        self.buf.put_u8(discriminant);
        self
    }

    pub(crate) fn str(&mut self, value: &str) -> &mut Self {
        self.buf.put_u8(TAG_STR);
        self.buf.put_u32(value.len() as u32);
        self.buf.put_slice(value.as_bytes());
        self
    }

    pub(crate) fn opt_str(&mut self, value: Option<&str>) -> &mut Self {
        match value {
            Some(s) => self.str(s),
            None => {
                self.buf.put_u8(TAG_NONE);
                self
            },
        }
    }

    pub(crate) fn color(&mut self, value: Option<Color>) -> &mut Self {
        match value {
            Some(color) => {
                self.buf.put_u8(TAG_COLOR);
                self.buf.put_u32(color.argb());
            },
            None => self.buf.put_u8(TAG_NONE),
        }
        self
    }

    /// Embed another key as a length-prefixed block.
    pub(crate) fn nested(&mut self, key: &[u8]) -> &mut Self {
        self.buf.put_u8(TAG_NESTED);
        self.buf.put_u32(key.len() as u32);
        self.buf.put_slice(key);
        self
    }

    #[inline]
    pub(crate) fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Canonical key of a single attribute group (font, border, fill, ...).
///
/// Used by the style registry to deduplicate the shared sub-tables.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(Bytes);

impl GroupKey {
    #[inline]
    pub(crate) fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for GroupKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupKey({} bytes)", self.0.len())
    }
}

/// Canonical key of a complete cell format.
///
/// Two formats have equal keys exactly when every attribute is equal.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatKey(Bytes);

impl FormatKey {
    #[inline]
    pub(crate) fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the key was never derived.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for FormatKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for FormatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormatKey({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(f: impl FnOnce(&mut KeyWriter)) -> Bytes {
        let mut w = KeyWriter::with_capacity(16);
        f(&mut w);
        w.finish()
    }

    #[test]
    fn test_strings_are_length_delimited() {
        let a = encode(|w| {
            w.str("ab").str("c");
        });
        let b = encode(|w| {
            w.str("a").str("bc");
        });
        assert_ne!(a, b);
    }

    #[test]
    fn test_type_tags_distinguish_values() {
        let as_bool = encode(|w| {
            w.bool(true);
        });
        let as_enum = encode(|w| {
            w.variant(1);
        });
        assert_ne!(as_bool, as_enum);

        let none = encode(|w| {
            w.color(None);
        });
        let empty = encode(|w| {
            w.opt_str(Some(""));
        });
        assert_ne!(none, empty);
    }

    #[test]
    fn test_nested_blocks() {
        let inner = encode(|w| {
            w.int(11);
        });
        let outer = encode(|w| {
            w.nested(&inner).int(0);
        });
        assert_eq!(outer.len(), 1 + 4 + inner.len() + 5);
        assert_eq!(outer[0], TAG_NESTED);
    }

    #[test]
    fn test_color_encoding() {
        let key = encode(|w| {
            w.color(Some(Color::rgb(255, 0, 0)));
        });
        assert_eq!(&key[..], &[TAG_COLOR, 0xFF, 0xFF, 0x00, 0x00]);
    }
}
