//! Carmine Core — color reference resolution and the editable color item.
//!
//! This crate turns host-encoded color references into display colors,
//! encodes edited colors back, and keeps each item's contrast ratio in
//! step with its colors. No storage access lives here; the host's decoding
//! services come in through the traits in [`services`].

pub mod color;
pub mod contrast;
pub mod item;
pub mod reference;
pub mod resolver;
pub mod services;
pub mod transfer;

// Re-exports for convenience.
pub use color::{Color, PLAIN_TEXT_BACKGROUND, PLAIN_TEXT_FOREGROUND, PackedColor};
pub use contrast::contrast_ratio;
pub use item::{Changes, ColorItem, ColorRefs, Editability, ItemError, ItemField, ItemNames};
pub use reference::{ColorClass, ColorIndex, ColorRef, ColorType, ThemeColorId};
pub use resolver::{Resolver, encode};
pub use services::{ColorUtilities, ProviderError, ThemeColorService};
