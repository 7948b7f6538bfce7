//! Resolution of encoded color references into display colors.
//!
//! # Algorithm
//! 1. Probe the reference once into a [`ColorClass`]. A failed probe or a
//!    failed payload decode means the reference does not resolve.
//! 2. `Invalid` yields the caller's fallback (which may itself be absent).
//! 3. Every other class is decoded to a [`PackedColor`]:
//!    - `Raw` is used as is,
//!    - `Indexed` goes through the host palette; the user-text background
//!      entry is masked to its low 24 bits, every other entry is forced
//!      opaque,
//!    - `SystemColor` was already decoded by the probe,
//!    - `ThemeColor` goes through the theme service.
//! 4. The packed value is converted to an opaque [`Color`].
//!
//! Nothing here returns an error: failures are logged and collapse to
//! `None`, and callers substitute their defaults.

use crate::color::{Color, PackedColor};
use crate::reference::{ColorClass, ColorIndex, ColorRef, ColorType};
use crate::services::{ColorUtilities, ThemeColorService};

/// Resolves color references against the host's decoding services.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    utilities: &'a dyn ColorUtilities,
    theme: &'a dyn ThemeColorService,
}

impl std::fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

impl<'a> Resolver<'a> {
    pub fn new(utilities: &'a dyn ColorUtilities, theme: &'a dyn ThemeColorService) -> Self {
        Self { utilities, theme }
    }

    /// Probe `cref` and decode its variant payload.
    pub fn classify(&self, cref: ColorRef) -> Option<ColorClass> {
        let color_type = match self.utilities.color_type(cref) {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!("cannot classify color reference {cref}: {e}");
                return None;
            }
        };

        let class = match color_type {
            ColorType::Invalid => Ok(ColorClass::Invalid),
            ColorType::Raw => Ok(ColorClass::Raw(PackedColor(cref.0))),
            ColorType::Indexed => self.utilities.decode_indexed(cref).map(ColorClass::Indexed),
            ColorType::SystemColor => self
                .utilities
                .decode_system_color(cref)
                .map(ColorClass::SystemColor),
            ColorType::ThemeColor => self
                .utilities
                .decode_theme_color_id(cref)
                .map(ColorClass::ThemeColor),
        };

        class
            .inspect_err(|e| {
                tracing::debug!("cannot decode {color_type:?} color reference {cref}: {e}");
            })
            .ok()
    }

    /// Packed color for a classified reference. `Invalid` has none.
    pub fn decode(&self, class: ColorClass) -> Option<PackedColor> {
        let decoded = match class {
            ColorClass::Invalid => return None,
            ColorClass::Raw(packed) | ColorClass::SystemColor(packed) => Ok(packed),
            ColorClass::Indexed(index) => self.utilities.index_to_rgb(index).map(|packed| {
                if index == ColorIndex::USER_TEXT_BACKGROUND {
                    packed.without_high_byte()
                } else {
                    packed.opaque()
                }
            }),
            ColorClass::ThemeColor(id) => self.theme.theme_id_to_rgb(id),
        };

        decoded
            .inspect_err(|e| tracing::debug!("cannot decode {class:?}: {e}"))
            .ok()
    }

    /// Resolve `cref` to a display color, using `fallback` for "use default".
    pub fn resolve(&self, cref: ColorRef, fallback: Option<Color>) -> Option<Color> {
        match self.classify(cref)? {
            ColorClass::Invalid => fallback,
            class => self.decode(class).map(PackedColor::to_color),
        }
    }
}

/// Encode `color` for storage relative to the default it would fall back to.
///
/// A color equal to the default becomes [`ColorRef::INVALID`] so the stored
/// item keeps following the default; anything else becomes a raw reference.
pub fn encode(color: Color, default: Color) -> ColorRef {
    if color.same_rgb(default) {
        ColorRef::INVALID
    } else {
        ColorRef::raw(PackedColor::from_color(color))
    }
}
