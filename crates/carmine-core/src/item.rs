//! The editable color item for one named classification.
//!
//! Stored inputs are the four color references, the bold flag and the
//! three editability flags. Derived values are the effective foreground,
//! background and their contrast ratio:
//!
//! ```text
//! foreground_ref ─┐                       ┌─ foreground ─┐
//! auto_fg_ref ────┴─ (resolve + fallback) ┤              ├─ contrast_ratio
//! background_ref ─┐                       ├─ background ─┘
//! auto_bg_ref ────┴─ (resolve + fallback) ┘
//! ```
//!
//! Effective colors are resolved on demand. The contrast ratio is stored
//! and recomputed by every mutator before it returns.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::color::{Color, PLAIN_TEXT_BACKGROUND, PLAIN_TEXT_FOREGROUND};
use crate::contrast::contrast_ratio;
use crate::reference::ColorRef;
use crate::resolver::{Resolver, encode};

/// The two lookup keys of an item, tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemNames {
    /// Classification type name.
    pub primary: String,
    /// Format definition name.
    pub secondary: String,
}

impl ItemNames {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Both names, with `preferred` first when it is one of them.
    pub fn lookup_order<'a>(&'a self, preferred: Option<&str>) -> [&'a str; 2] {
        if preferred == Some(self.secondary.as_str()) {
            [self.secondary.as_str(), self.primary.as_str()]
        } else {
            [self.primary.as_str(), self.secondary.as_str()]
        }
    }
}

impl std::fmt::Display for ItemNames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.primary, self.secondary)
    }
}

/// Which stored fields the user may change. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Editability {
    pub foreground: bool,
    pub background: bool,
    pub bold: bool,
}

impl Editability {
    pub const ALL: Self = Self {
        foreground: true,
        background: true,
        bold: true,
    };
}

impl Default for Editability {
    fn default() -> Self {
        Self::ALL
    }
}

/// The four color references an item is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorRefs {
    pub foreground: ColorRef,
    pub background: ColorRef,
    pub auto_foreground: ColorRef,
    pub auto_background: ColorRef,
}

/// An editable field of a [`ColorItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Foreground,
    Background,
    Bold,
}

impl std::fmt::Display for ItemField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Foreground => "foreground",
            Self::Background => "background",
            Self::Bold => "bold",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("{0} is not editable for this item")]
    NotEditable(ItemField),
}

bitflags! {
    /// Values a mutation changed, for hosts that refresh bound views.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Changes: u8 {
        const FOREGROUND = 1 << 0;
        const BACKGROUND = 1 << 1;
        const DEFAULT_FOREGROUND = 1 << 2;
        const DEFAULT_BACKGROUND = 1 << 3;
        const BOLD = 1 << 4;
        const CONTRAST = 1 << 5;
    }
}

/// One classification's colors, as loaded from the store and edited by
/// the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorItem {
    names: ItemNames,
    read_name: Option<String>,
    refs: ColorRefs,
    is_bold: bool,
    editable: Editability,
    contrast_ratio: f64,
}

impl ColorItem {
    pub fn new(
        names: ItemNames,
        refs: ColorRefs,
        is_bold: bool,
        editable: Editability,
        resolver: &Resolver<'_>,
    ) -> Self {
        let mut item = Self {
            names,
            read_name: None,
            refs,
            is_bold,
            editable,
            contrast_ratio: 0.0,
        };
        item.recompute_contrast(resolver);
        item
    }

    /// Remember which of the two names the store answered to.
    pub fn with_read_name(mut self, name: impl Into<String>) -> Self {
        self.read_name = Some(name.into());
        self
    }

    pub fn names(&self) -> &ItemNames {
        &self.names
    }

    /// The name that succeeded when the item was read, if known.
    pub fn read_name(&self) -> Option<&str> {
        self.read_name.as_deref()
    }

    pub fn refs(&self) -> ColorRefs {
        self.refs
    }

    pub fn foreground_ref(&self) -> ColorRef {
        self.refs.foreground
    }

    pub fn background_ref(&self) -> ColorRef {
        self.refs.background
    }

    pub fn editability(&self) -> Editability {
        self.editable
    }

    pub fn is_foreground_editable(&self) -> bool {
        self.editable.foreground
    }

    pub fn is_background_editable(&self) -> bool {
        self.editable.background
    }

    pub fn is_bold_editable(&self) -> bool {
        self.editable.bold
    }

    pub fn is_bold(&self) -> bool {
        self.is_bold
    }

    /// Ratio between the effective colors; `0.0` if either side is locked.
    pub fn contrast_ratio(&self) -> f64 {
        self.contrast_ratio
    }

    /// Whether both color references follow the defaults.
    pub fn uses_default_colors(&self) -> bool {
        self.refs.foreground.is_invalid() && self.refs.background.is_invalid()
    }

    // ── Derived colors ───────────────────────────────────────────

    pub fn default_foreground(&self, resolver: &Resolver<'_>) -> Color {
        resolver
            .resolve(self.refs.auto_foreground, None)
            .unwrap_or(PLAIN_TEXT_FOREGROUND)
    }

    pub fn default_background(&self, resolver: &Resolver<'_>) -> Color {
        resolver
            .resolve(self.refs.auto_background, None)
            .unwrap_or(PLAIN_TEXT_BACKGROUND)
    }

    /// Effective foreground, or [`Color::TRANSPARENT`] when not editable.
    pub fn foreground(&self, resolver: &Resolver<'_>) -> Color {
        if !self.editable.foreground {
            return Color::TRANSPARENT;
        }
        let default = self.default_foreground(resolver);
        resolver
            .resolve(self.refs.foreground, Some(default))
            .unwrap_or(default)
    }

    /// Effective background, or [`Color::TRANSPARENT`] when not editable.
    pub fn background(&self, resolver: &Resolver<'_>) -> Color {
        if !self.editable.background {
            return Color::TRANSPARENT;
        }
        let default = self.default_background(resolver);
        resolver
            .resolve(self.refs.background, Some(default))
            .unwrap_or(default)
    }

    // ── Mutators ─────────────────────────────────────────────────

    pub fn set_foreground(
        &mut self,
        color: Color,
        resolver: &Resolver<'_>,
    ) -> Result<Changes, ItemError> {
        self.ensure_editable(ItemField::Foreground)?;
        let cref = encode(color, self.default_foreground(resolver));
        Ok(self.store_foreground_ref(cref, resolver))
    }

    pub fn set_background(
        &mut self,
        color: Color,
        resolver: &Resolver<'_>,
    ) -> Result<Changes, ItemError> {
        self.ensure_editable(ItemField::Background)?;
        let cref = encode(color, self.default_background(resolver));
        Ok(self.store_background_ref(cref, resolver))
    }

    pub fn set_foreground_ref(
        &mut self,
        cref: ColorRef,
        resolver: &Resolver<'_>,
    ) -> Result<Changes, ItemError> {
        self.ensure_editable(ItemField::Foreground)?;
        Ok(self.store_foreground_ref(cref, resolver))
    }

    pub fn set_background_ref(
        &mut self,
        cref: ColorRef,
        resolver: &Resolver<'_>,
    ) -> Result<Changes, ItemError> {
        self.ensure_editable(ItemField::Background)?;
        Ok(self.store_background_ref(cref, resolver))
    }

    /// Replace the theme/system defaults, e.g. after a theme switch.
    pub fn set_auto_refs(
        &mut self,
        auto_foreground: ColorRef,
        auto_background: ColorRef,
        resolver: &Resolver<'_>,
    ) -> Changes {
        let before = self.snapshot(resolver);
        self.refs.auto_foreground = auto_foreground;
        self.refs.auto_background = auto_background;
        self.finish(before, resolver)
    }

    pub fn set_bold(&mut self, is_bold: bool) -> Result<Changes, ItemError> {
        self.ensure_editable(ItemField::Bold)?;
        if self.is_bold == is_bold {
            return Ok(Changes::empty());
        }
        self.is_bold = is_bold;
        Ok(Changes::BOLD)
    }

    /// Point every editable field back at its default.
    pub fn reset_to_defaults(&mut self, resolver: &Resolver<'_>) -> Changes {
        let before = self.snapshot(resolver);
        if self.editable.foreground {
            self.refs.foreground = ColorRef::INVALID;
        }
        if self.editable.background {
            self.refs.background = ColorRef::INVALID;
        }
        let mut changes = self.finish(before, resolver);
        if self.editable.bold && self.is_bold {
            self.is_bold = false;
            changes |= Changes::BOLD;
        }
        changes
    }

    // ── Recomputation ────────────────────────────────────────────

    fn ensure_editable(&self, field: ItemField) -> Result<(), ItemError> {
        let editable = match field {
            ItemField::Foreground => self.editable.foreground,
            ItemField::Background => self.editable.background,
            ItemField::Bold => self.editable.bold,
        };
        if editable {
            Ok(())
        } else {
            Err(ItemError::NotEditable(field))
        }
    }

    fn store_foreground_ref(&mut self, cref: ColorRef, resolver: &Resolver<'_>) -> Changes {
        let before = self.snapshot(resolver);
        self.refs.foreground = cref;
        self.finish(before, resolver)
    }

    fn store_background_ref(&mut self, cref: ColorRef, resolver: &Resolver<'_>) -> Changes {
        let before = self.snapshot(resolver);
        self.refs.background = cref;
        self.finish(before, resolver)
    }

    fn snapshot(&self, resolver: &Resolver<'_>) -> Snapshot {
        Snapshot {
            foreground: self.foreground(resolver),
            background: self.background(resolver),
            default_foreground: self.default_foreground(resolver),
            default_background: self.default_background(resolver),
            contrast_ratio: self.contrast_ratio,
        }
    }

    /// Recompute the contrast and report what differs from `before`.
    fn finish(&mut self, before: Snapshot, resolver: &Resolver<'_>) -> Changes {
        self.recompute_contrast(resolver);
        let after = self.snapshot(resolver);

        let mut changes = Changes::empty();
        changes.set(Changes::FOREGROUND, before.foreground != after.foreground);
        changes.set(Changes::BACKGROUND, before.background != after.background);
        changes.set(
            Changes::DEFAULT_FOREGROUND,
            before.default_foreground != after.default_foreground,
        );
        changes.set(
            Changes::DEFAULT_BACKGROUND,
            before.default_background != after.default_background,
        );
        changes.set(
            Changes::CONTRAST,
            before.contrast_ratio.to_bits() != after.contrast_ratio.to_bits(),
        );
        changes
    }

    fn recompute_contrast(&mut self, resolver: &Resolver<'_>) {
        self.contrast_ratio = if self.editable.foreground && self.editable.background {
            contrast_ratio(self.foreground(resolver), self.background(resolver))
        } else {
            0.0
        };
        tracing::trace!(
            "contrast for {} recomputed: {:.3}",
            self.names.primary,
            self.contrast_ratio
        );
    }
}

struct Snapshot {
    foreground: Color,
    background: Color,
    default_foreground: Color,
    default_background: Color,
    contrast_ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PackedColor;
    use crate::reference::{ColorIndex, ColorType, ThemeColorId};
    use crate::services::{ColorUtilities, ProviderError, ThemeColorService};

    /// Raw references and the invalid sentinel only; `0x7F......` fails.
    struct RawOnly;

    impl ColorUtilities for RawOnly {
        fn color_type(&self, cref: ColorRef) -> Result<ColorType, ProviderError> {
            match cref {
                ColorRef::INVALID => Ok(ColorType::Invalid),
                ColorRef(v) if v >> 24 == 0x7F => Err(ProviderError::FAIL),
                _ => Ok(ColorType::Raw),
            }
        }

        fn decode_indexed(&self, _: ColorRef) -> Result<ColorIndex, ProviderError> {
            Err(ProviderError::FAIL)
        }

        fn index_to_rgb(&self, _: ColorIndex) -> Result<PackedColor, ProviderError> {
            Err(ProviderError::FAIL)
        }

        fn decode_system_color(&self, _: ColorRef) -> Result<PackedColor, ProviderError> {
            Err(ProviderError::FAIL)
        }

        fn decode_theme_color_id(&self, _: ColorRef) -> Result<ThemeColorId, ProviderError> {
            Err(ProviderError::FAIL)
        }
    }

    impl ThemeColorService for RawOnly {
        fn theme_id_to_rgb(&self, _: ThemeColorId) -> Result<PackedColor, ProviderError> {
            Err(ProviderError::FAIL)
        }
    }

    static RAW_ONLY: RawOnly = RawOnly;

    fn resolver() -> Resolver<'static> {
        Resolver::new(&RAW_ONLY, &RAW_ONLY)
    }

    fn raw(color: Color) -> ColorRef {
        ColorRef::raw(PackedColor::from_color(color))
    }

    fn item(refs: ColorRefs, editable: Editability) -> ColorItem {
        ColorItem::new(
            ItemNames::new("keyword", "Keyword"),
            refs,
            false,
            editable,
            &resolver(),
        )
    }

    fn black_on_white() -> ColorRefs {
        ColorRefs {
            foreground: raw(Color::BLACK),
            background: raw(Color::WHITE),
            ..ColorRefs::default()
        }
    }

    #[test]
    fn test_black_on_white_contrast() {
        let item = item(black_on_white(), Editability::ALL);
        assert!((item.contrast_ratio() - 21.0).abs() < 1e-6);
    }

    #[test]
    fn test_locked_foreground_is_transparent() {
        let locked = Editability {
            foreground: false,
            ..Editability::ALL
        };
        let item = item(black_on_white(), locked);
        let r = resolver();
        assert_eq!(item.foreground(&r), Color::TRANSPARENT);
        assert_eq!(item.background(&r), Color::WHITE);
        assert_eq!(item.contrast_ratio(), 0.0);
    }

    #[test]
    fn test_locked_background_zeroes_contrast() {
        let locked = Editability {
            background: false,
            ..Editability::ALL
        };
        let item = item(black_on_white(), locked);
        assert_eq!(item.background(&resolver()), Color::TRANSPARENT);
        assert_eq!(item.contrast_ratio(), 0.0);
    }

    #[test]
    fn test_fallback_chain() {
        let r = resolver();
        let auto_fg = Color::rgb(0x20, 0x40, 0x60);
        let refs = ColorRefs {
            foreground: ColorRef::INVALID,
            background: ColorRef(0x7F00_0000),
            auto_foreground: raw(auto_fg),
            auto_background: ColorRef::INVALID,
        };
        let item = item(refs, Editability::ALL);
        // Invalid ref → auto default.
        assert_eq!(item.foreground(&r), auto_fg);
        // Undecodable ref and unresolvable default → plain text constant.
        assert_eq!(item.background(&r), PLAIN_TEXT_BACKGROUND);
    }

    #[test]
    fn test_set_foreground_recomputes_contrast() {
        let r = resolver();
        let mut item = item(black_on_white(), Editability::ALL);
        let changes = item.set_foreground(Color::WHITE, &r).unwrap();
        assert!(changes.contains(Changes::FOREGROUND | Changes::CONTRAST));
        assert!((item.contrast_ratio() - 1.0).abs() < 1e-9);
        assert_eq!(item.foreground(&r), Color::WHITE);
    }

    #[test]
    fn test_set_background_recomputes_contrast() {
        let r = resolver();
        let mut item = item(black_on_white(), Editability::ALL);
        let changes = item.set_background(Color::BLACK, &r).unwrap();
        assert_eq!(changes, Changes::BACKGROUND | Changes::CONTRAST);
        assert!((item.contrast_ratio() - 1.0).abs() < 1e-9);
        assert_eq!(item.background(&r), Color::BLACK);
    }

    #[test]
    fn test_set_foreground_to_default_stores_sentinel() {
        let r = resolver();
        let mut item = item(black_on_white(), Editability::ALL);
        item.set_foreground(PLAIN_TEXT_FOREGROUND, &r).unwrap();
        assert_eq!(item.foreground_ref(), ColorRef::INVALID);
        assert_eq!(item.foreground(&r), PLAIN_TEXT_FOREGROUND);
    }

    #[test]
    fn test_set_locked_field_is_rejected() {
        let r = resolver();
        let locked = Editability {
            foreground: false,
            background: true,
            bold: false,
        };
        let mut item = item(black_on_white(), locked);
        assert_eq!(
            item.set_foreground(Color::WHITE, &r),
            Err(ItemError::NotEditable(ItemField::Foreground))
        );
        assert_eq!(
            item.set_foreground_ref(ColorRef::INVALID, &r),
            Err(ItemError::NotEditable(ItemField::Foreground))
        );
        assert_eq!(
            item.set_bold(true),
            Err(ItemError::NotEditable(ItemField::Bold))
        );
        assert_eq!(item.foreground_ref(), raw(Color::BLACK));
        assert!(!item.is_bold());
    }

    #[test]
    fn test_auto_refs_change_defaults_and_contrast() {
        let r = resolver();
        let refs = ColorRefs {
            foreground: ColorRef::INVALID,
            background: raw(Color::WHITE),
            ..ColorRefs::default()
        };
        let mut item = item(refs, Editability::ALL);
        assert!((item.contrast_ratio() - 21.0).abs() < 1e-6);

        let changes = item.set_auto_refs(raw(Color::WHITE), ColorRef::INVALID, &r);
        assert!(changes.contains(
            Changes::DEFAULT_FOREGROUND | Changes::FOREGROUND | Changes::CONTRAST
        ));
        assert!(!changes.contains(Changes::BACKGROUND));
        assert!((item.contrast_ratio() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_auto_background_change_recomputes_contrast() {
        let r = resolver();
        let refs = ColorRefs {
            foreground: raw(Color::BLACK),
            background: ColorRef::INVALID,
            ..ColorRefs::default()
        };
        let mut item = item(refs, Editability::ALL);
        assert!((item.contrast_ratio() - 21.0).abs() < 1e-6);

        let changes = item.set_auto_refs(ColorRef::INVALID, raw(Color::BLACK), &r);
        assert_eq!(
            changes,
            Changes::DEFAULT_BACKGROUND | Changes::BACKGROUND | Changes::CONTRAST
        );
        assert_eq!(item.background(&r), Color::BLACK);
        assert!((item.contrast_ratio() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unchanged_write_reports_nothing() {
        let r = resolver();
        let mut item = item(black_on_white(), Editability::ALL);
        let changes = item.set_background_ref(raw(Color::WHITE), &r).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_reset_to_defaults() {
        let r = resolver();
        let mut item = item(black_on_white(), Editability::ALL);
        item.set_bold(true).unwrap();
        item.set_foreground(Color::rgb(0x80, 0, 0), &r).unwrap();

        let changes = item.reset_to_defaults(&r);
        assert!(changes.contains(Changes::BOLD | Changes::FOREGROUND));
        assert!(item.uses_default_colors());
        assert!(!item.is_bold());
        assert_eq!(item.foreground(&r), PLAIN_TEXT_FOREGROUND);
        assert_eq!(item.background(&r), PLAIN_TEXT_BACKGROUND);
        assert!((item.contrast_ratio() - 21.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_leaves_locked_fields() {
        let r = resolver();
        let locked = Editability {
            foreground: true,
            background: false,
            bold: true,
        };
        let mut item = item(black_on_white(), locked);
        item.reset_to_defaults(&r);
        assert_eq!(item.background_ref(), raw(Color::WHITE));
        assert!(!item.uses_default_colors());
    }

    #[test]
    fn test_lookup_order_prefers_read_name() {
        let names = ItemNames::new("keyword", "Keyword");
        assert_eq!(names.lookup_order(None), ["keyword", "Keyword"]);
        assert_eq!(names.lookup_order(Some("Keyword")), ["Keyword", "keyword"]);
        assert_eq!(names.lookup_order(Some("other")), ["keyword", "Keyword"]);
    }
}
