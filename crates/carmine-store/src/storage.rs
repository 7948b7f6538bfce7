//! The host's font-and-color storage interface.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use carmine_core::{ColorRef, ProviderError};

/// Identifier of a storage category (a GUID string on the host).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    /// Text editor colors contributed by editor classification formats.
    pub const TEXT_EDITOR_MEF_ITEMS: &'static str = "75a05685-00a8-4ded-bae5-e7a50bfa929a";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn text_editor_mef_items() -> Self {
        Self::new(Self::TEXT_EDITOR_MEF_ITEMS)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0)
    }
}

bitflags! {
    /// How a category is opened.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategoryFlags: u32 {
        const LOAD_DEFAULTS = 0x01;
        const NO_AUTO_COLORS = 0x02;
        const PROPAGATE_CHANGES = 0x04;
        const READONLY = 0x08;
    }
}

impl CategoryFlags {
    /// Read paths: defaults filled in, auto colors left unresolved.
    pub const READ: Self = Self::READONLY
        .union(Self::LOAD_DEFAULTS)
        .union(Self::NO_AUTO_COLORS);
    /// Write paths: defaults loaded so they can be overwritten too.
    pub const WRITE: Self = Self::PROPAGATE_CHANGES.union(Self::LOAD_DEFAULTS);
}

bitflags! {
    /// Font style bits stored with a color record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontFlags: u32 {
        const BOLD = 0x01;
    }
}

/// A stored color record, as the host hands it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorRecord {
    pub foreground: ColorRef,
    pub background: ColorRef,
    pub font_flags: FontFlags,
}

impl ColorRecord {
    pub fn is_bold(&self) -> bool {
        self.font_flags.contains(FontFlags::BOLD)
    }
}

/// Font data of the open category. Absent fields were not valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawFontInfo {
    pub face_name: Option<String>,
    /// Font height in the host's logical units; may be negative.
    pub height: Option<i32>,
}

/// Scoped access to the host's color store.
///
/// A category must be opened before any get/set and closed afterwards.
/// Only one category is open at a time.
pub trait ColorStorage {
    fn open_category(&self, category: &CategoryId, flags: CategoryFlags)
    -> Result<(), ProviderError>;

    fn get_item(&self, name: &str) -> Result<ColorRecord, ProviderError>;

    fn set_item(&self, name: &str, record: &ColorRecord) -> Result<(), ProviderError>;

    fn get_font(&self) -> Result<RawFontInfo, ProviderError>;

    fn close_category(&self);
}
