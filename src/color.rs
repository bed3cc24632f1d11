//! # Color Codec
//!
//! Colors are written in configuration as up to four whitespace-separated
//! unsigned integers: `"R G B A"`. Missing trailing channels read as `0`,
//! so an empty string is color `0` (fully transparent black).
//!
//! ```
//! use easel::color::{self, Color};
//!
//! let red = color::decode("255 0 0 255");
//! assert_eq!(red, Color::from_rgba(255, 0, 0, 255));
//! assert_eq!(color::decode("255 0 0"), color::decode("255 0 0 0"));
//! ```

use std::fmt;

/// A packed 32-bit color, big-endian R, G, B, A.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent black; also what an empty string decodes to.
    pub const NONE: Color = Color(0);

    /// Pack four channels into a color.
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// True for color `0`, which shapes treat as "not set".
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.r(), self.g(), self.b(), self.a())
    }
}

/// Decode a textual color into a packed color.
///
/// Never fails: unparsable channels read as `0`, values above 255 keep
/// their low 8 bits, and fields beyond the fourth are ignored.
pub fn decode(text: &str) -> Color {
    let mut fields: Vec<&str> = text.split_whitespace().collect();

    // make sure we have four fields
    while fields.len() < 4 {
        fields.push("0");
    }

    let packed = fields
        .iter()
        .take(4)
        .fold(0u32, |acc, field| (acc << 8) | (field.parse::<u32>().unwrap_or(0) & 0xFF));

    Color(packed)
}
