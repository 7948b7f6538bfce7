//! Display colors and the host's packed color layout.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit-per-channel display color.
///
/// Colors produced by resolution are always fully opaque. The only
/// non-opaque value handed to callers is [`Color::TRANSPARENT`], which
/// marks a side that cannot be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    /// Fully transparent white, matching the usual UI toolkit constant.
    pub const TRANSPARENT: Self = Self {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
        a: 0x00,
    };

    /// Opaque color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Whether two colors carry the same RGB channels, ignoring alpha.
    pub const fn same_rgb(self, other: Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Channels as normalized `[0, 1]` values.
    pub fn to_unit_rgb(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

/// Foreground used when neither an item nor its defaults resolve.
pub const PLAIN_TEXT_FOREGROUND: Color = Color::BLACK;
/// Background used when neither an item nor its defaults resolve.
pub const PLAIN_TEXT_BACKGROUND: Color = Color::WHITE;

/// A color in the host's packed layout: `0xAABBGGRR`.
///
/// The high byte holds alpha or flag bits depending on where the value
/// came from; it never survives conversion to a [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const RGB_MASK: u32 = 0x00FF_FFFF;
    pub const OPAQUE_BITS: u32 = 0xFF00_0000;

    /// Pack RGB channels with a zero high byte.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r as u32 | (g as u32) << 8 | (b as u32) << 16)
    }

    pub const fn from_color(color: Color) -> Self {
        Self::from_rgb(color.r, color.g, color.b)
    }

    pub const fn red(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// The high byte (alpha or flag bits).
    pub const fn high_byte(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Keep only the low 24 RGB bits.
    pub const fn without_high_byte(self) -> Self {
        Self(self.0 & Self::RGB_MASK)
    }

    /// Force the high byte to full opacity.
    pub const fn opaque(self) -> Self {
        Self(self.0 | Self::OPAQUE_BITS)
    }

    /// Convert to an opaque display color, discarding the high byte.
    pub const fn to_color(self) -> Color {
        Color::rgb(self.red(), self.green(), self.blue())
    }
}

impl From<Color> for PackedColor {
    fn from(color: Color) -> Self {
        Self::from_color(color)
    }
}

impl From<PackedColor> for Color {
    fn from(packed: PackedColor) -> Self {
        packed.to_color()
    }
}
