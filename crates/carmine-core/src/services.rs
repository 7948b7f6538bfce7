//! Host collaborators consumed by color resolution.
//!
//! These mirror the host's color utility and shell theme interfaces. Every
//! call can fail with the host's status code; resolution treats any failure
//! as "this reference does not resolve".

use crate::color::PackedColor;
use crate::reference::{ColorIndex, ColorRef, ColorType, ThemeColorId};

/// A failed host call, carrying the host status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("host call failed with status 0x{code:08X}")]
pub struct ProviderError {
    pub code: i32,
}

impl ProviderError {
    /// Generic failure (`E_FAIL`).
    pub const FAIL: Self = Self::new(0x8000_4005_u32 as i32);
    /// The requested element does not exist.
    pub const NOT_FOUND: Self = Self::new(0x8002_802B_u32 as i32);

    pub const fn new(code: i32) -> Self {
        Self { code }
    }
}

/// Classification and decoding of encoded color references.
pub trait ColorUtilities {
    /// Probe which encoding variant `cref` uses.
    fn color_type(&self, cref: ColorRef) -> Result<ColorType, ProviderError>;

    /// Palette index of an indexed reference.
    fn decode_indexed(&self, cref: ColorRef) -> Result<ColorIndex, ProviderError>;

    /// Packed color of a palette entry.
    fn index_to_rgb(&self, index: ColorIndex) -> Result<PackedColor, ProviderError>;

    /// Packed color of a system-color reference.
    fn decode_system_color(&self, cref: ColorRef) -> Result<PackedColor, ProviderError>;

    /// Theme color identifier of a theme-color reference.
    fn decode_theme_color_id(&self, cref: ColorRef) -> Result<ThemeColorId, ProviderError>;
}

/// The shell service that knows the active theme's colors.
pub trait ThemeColorService {
    fn theme_id_to_rgb(&self, id: ThemeColorId) -> Result<PackedColor, ProviderError>;
}
