//! Encoded color references and their classification.
//!
//! A [`ColorRef`] is an opaque value owned by the host store. Its meaning is
//! only known after probing it through [`ColorUtilities`], which yields a
//! [`ColorClass`]. Callers match on the class once instead of re-probing.
//!
//! [`ColorUtilities`]: crate::services::ColorUtilities

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::PackedColor;

/// An opaque, host-encoded color reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorRef(pub u32);

impl ColorRef {
    /// "Use the default color". Same value as Win32 `CLR_INVALID`.
    pub const INVALID: Self = Self(0xFFFF_FFFF);

    /// A raw reference carrying the packed RGB with a zero high byte.
    pub const fn raw(packed: PackedColor) -> Self {
        Self(packed.without_high_byte().0)
    }

    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }
}

impl Default for ColorRef {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// The encoding variant reported by the host's classification probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorType {
    Invalid,
    Raw,
    Indexed,
    SystemColor,
    ThemeColor,
}

/// A palette index understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorIndex(pub i32);

impl ColorIndex {
    pub const USER_TEXT_FOREGROUND: Self = Self(0);
    /// Its palette value carries flag bits that must be masked off.
    pub const USER_TEXT_BACKGROUND: Self = Self(1);
}

/// Identifier of a themeable shell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThemeColorId(pub i32);

/// A probed color reference with its variant payload decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorClass {
    /// Use the caller's default.
    Invalid,
    /// A literal packed color.
    Raw(PackedColor),
    /// An entry of the host palette.
    Indexed(ColorIndex),
    /// A system color, already decoded to its packed value.
    SystemColor(PackedColor),
    /// A theme color that still needs the theme service.
    ThemeColor(ThemeColorId),
}

impl ColorClass {
    pub const fn color_type(&self) -> ColorType {
        match self {
            Self::Invalid => ColorType::Invalid,
            Self::Raw(_) => ColorType::Raw,
            Self::Indexed(_) => ColorType::Indexed,
            Self::SystemColor(_) => ColorType::SystemColor,
            Self::ThemeColor(_) => ColorType::ThemeColor,
        }
    }
}
