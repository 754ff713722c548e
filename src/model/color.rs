//! RGBA color values as used in WordprocessingML attributes.

use serde::{Deserialize, Serialize};

/// An RGBA color parsed from a `RRGGBB` or `RRGGBBAA` hex string.
///
/// The default value `(0, 0, 0, 255)` doubles as the "no explicit color"
/// marker during style merging; see [`Color::is_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }
    }
}

impl Color {
    /// Create a color from explicit components.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string.
    ///
    /// Six digits are read as `RRGGBB` with full alpha, eight digits as
    /// `RRGGBBAA`. Any other length, or a non-hex digit, yields the default
    /// color.
    pub fn from_hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        let parsed = match bytes.len() {
            6 => Self::from_digits(bytes, false),
            8 => Self::from_digits(bytes, true),
            _ => None,
        };
        parsed.unwrap_or_default()
    }

    fn from_digits(bytes: &[u8], with_alpha: bool) -> Option<Self> {
        Some(Self {
            r: hex_pair(bytes, 0)?,
            g: hex_pair(bytes, 2)?,
            b: hex_pair(bytes, 4)?,
            a: if with_alpha { hex_pair(bytes, 6)? } else { 255 },
        })
    }

    /// True when the color equals the default, i.e. no explicit color is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn hex_pair(bytes: &[u8], at: usize) -> Option<u8> {
    let hi = (bytes[at] as char).to_digit(16)?;
    let lo = (bytes[at + 1] as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        let color = Color::from_hex("FF8000");
        assert_eq!((color.r, color.g, color.b, color.a), (255, 128, 0, 255));
    }

    #[test]
    fn test_rgba_hex() {
        let color = Color::from_hex("FF800080");
        assert_eq!((color.r, color.g, color.b, color.a), (255, 128, 0, 128));
    }

    #[test]
    fn test_lowercase_hex() {
        assert_eq!(Color::from_hex("ff8000"), Color::new(255, 128, 0, 255));
    }

    #[test]
    fn test_bad_input_yields_default() {
        // "auto" is a common WordprocessingML value and has the wrong length
        assert_eq!(Color::from_hex("auto"), Color::default());
        assert_eq!(Color::from_hex(""), Color::default());
        assert_eq!(Color::from_hex("FF80"), Color::default());
        assert_eq!(Color::from_hex("GGGGGG"), Color::default());
        // multi-byte characters must not panic the digit scanner
        assert_eq!(Color::from_hex("aaaéa"), Color::default());
    }

    #[test]
    fn test_empty_marker() {
        assert!(Color::default().is_empty());
        assert!(Color::from_hex("000000").is_empty());
        assert!(!Color::from_hex("000001").is_empty());
        assert!(!Color::from_hex("00000080").is_empty());
    }
}
