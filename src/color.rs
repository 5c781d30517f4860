//! Color types and the per-sex level palettes.
//!
//! Segment fills come from two ordered palettes, one per recognized sex
//! category, indexed by the position of a school level in the level order.

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Half-opaque black, overlaid on a hovered segment.
    pub const HOVER_OVERLAY: Self = Self::new(0, 0, 0, 128);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` hex string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for malformed input.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 && digits.len() != 8 {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        // get() rather than indexing: multi-byte input must error, not panic.
        let byte = |i: usize| -> Result<u8> {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| Error::InvalidColor(hex.to_string()))
        };

        let a = if digits.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, a))
    }

    /// Format as a `#rrggbb` hex string (alpha omitted when opaque).
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Ordered palette for male-coded (`MF`) stacks.
pub const MALE_PALETTE: [Rgba; 3] =
    [Rgba::rgb(0x00, 0xff, 0xff), Rgba::rgb(0x00, 0xcc, 0xff), Rgba::rgb(0x00, 0x99, 0xff)];

/// Ordered palette for female-coded (`F`) stacks.
pub const FEMALE_PALETTE: [Rgba; 3] =
    [Rgba::rgb(0xff, 0xff, 0x00), Rgba::rgb(0xff, 0x88, 0x00), Rgba::rgb(0xff, 0x00, 0x00)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("#00ccff").unwrap(), Rgba::rgb(0, 0xcc, 0xff));
        assert_eq!(Rgba::from_hex("ff8800").unwrap(), Rgba::rgb(0xff, 0x88, 0));
        assert_eq!(Rgba::from_hex("#00000080").unwrap(), Rgba::new(0, 0, 0, 128));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Rgba::from_hex("#12345").is_err());
        assert!(Rgba::from_hex("#zzzzzz").is_err());
        assert!(Rgba::from_hex("").is_err());
    }

    #[test]
    fn test_from_hex_multibyte_input_errors() {
        // Six bytes but not six hex digits; must not panic on slicing.
        assert_eq!(
            Rgba::from_hex("αβγ").unwrap_err(),
            Error::InvalidColor("αβγ".to_string())
        );
        assert!(Rgba::from_hex("0αβ4").is_err());
    }

    #[test]
    fn test_to_hex_round_trip() {
        let c = Rgba::rgb(0x00, 0x99, 0xff);
        assert_eq!(Rgba::from_hex(&c.to_hex()).unwrap(), c);
        assert_eq!(Rgba::HOVER_OVERLAY.to_hex(), "#00000080");
    }

    #[test]
    fn test_palettes_match_reference_colors() {
        assert_eq!(MALE_PALETTE[0], Rgba::from_hex("#00ffff").unwrap());
        assert_eq!(FEMALE_PALETTE[2], Rgba::from_hex("#ff0000").unwrap());
    }
}
