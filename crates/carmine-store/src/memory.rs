//! An in-process color store implementing every host interface.
//!
//! Useful for hosts without a native store and for tests. References use
//! a fixed encoding:
//!
//! ```text
//! 0xFFFFFFFF       invalid ("use default")
//! 0x00BBGGRR       raw color
//! 0x01nnnnnn       palette index n
//! 0x02nnnnnn       system color n
//! 0x03nnnnnn       theme color n
//! ```
//!
//! Any other high byte fails classification.

use std::collections::HashMap;

use parking_lot::Mutex;

use carmine_core::{
    ColorIndex, ColorRef, ColorType, ColorUtilities, PackedColor, ProviderError, ThemeColorId,
    ThemeColorService,
};

use crate::storage::{CategoryFlags, CategoryId, ColorRecord, ColorStorage, RawFontInfo};

const PAYLOAD_MASK: u32 = 0x00FF_FFFF;
const TAG_RAW: u32 = 0x00;
const TAG_INDEXED: u32 = 0x01;
const TAG_SYSTEM: u32 = 0x02;
const TAG_THEME: u32 = 0x03;

/// Reference to palette entry `index`.
///
/// The payload is 24 bits unsigned; `index` must lie in `0..=0xFFFFFF`.
pub fn indexed_ref(index: ColorIndex) -> ColorRef {
    ColorRef(TAG_INDEXED << 24 | payload(index.0))
}

/// Reference to system color `id`. Bits above the 24-bit payload are
/// dropped.
pub fn system_ref(id: u32) -> ColorRef {
    ColorRef(TAG_SYSTEM << 24 | (id & PAYLOAD_MASK))
}

/// Reference to theme color `id`, with the same payload range as
/// [`indexed_ref`].
pub fn theme_ref(id: ThemeColorId) -> ColorRef {
    ColorRef(TAG_THEME << 24 | payload(id.0))
}

fn payload(id: i32) -> u32 {
    debug_assert!(
        (0..=PAYLOAD_MASK as i32).contains(&id),
        "reference payload {id} out of range"
    );
    id as u32 & PAYLOAD_MASK
}

/// A storage call, recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Open(CategoryId, CategoryFlags),
    Get(String),
    Set(String),
    GetFont,
    Close,
}

#[derive(Debug, Default)]
struct Category {
    items: HashMap<String, ColorRecord>,
    font: Option<RawFontInfo>,
}

#[derive(Debug, Default)]
struct State {
    categories: HashMap<CategoryId, Category>,
    open: Option<CategoryId>,
    journal: Vec<StoreCall>,
    fail_open: bool,
    fail_set: Vec<String>,
}

impl State {
    fn current(&self) -> Result<&Category, ProviderError> {
        self.open
            .as_ref()
            .and_then(|id| self.categories.get(id))
            .ok_or(ProviderError::FAIL)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    palette: HashMap<ColorIndex, PackedColor>,
    system: HashMap<u32, PackedColor>,
    theme: HashMap<ThemeColorId, PackedColor>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette_entry(mut self, index: ColorIndex, packed: PackedColor) -> Self {
        self.palette.insert(index, packed);
        self
    }

    pub fn with_system_color(mut self, id: u32, packed: PackedColor) -> Self {
        self.system.insert(id, packed);
        self
    }

    pub fn with_theme_color(mut self, id: ThemeColorId, packed: PackedColor) -> Self {
        self.theme.insert(id, packed);
        self
    }

    pub fn with_item(self, category: &CategoryId, name: &str, record: ColorRecord) -> Self {
        self.insert_item(category, name, record);
        self
    }

    pub fn with_font(self, category: &CategoryId, font: RawFontInfo) -> Self {
        self.state
            .lock()
            .categories
            .entry(category.clone())
            .or_default()
            .font = Some(font);
        self
    }

    /// Add an empty category so it can be opened.
    pub fn with_category(self, category: &CategoryId) -> Self {
        self.state
            .lock()
            .categories
            .entry(category.clone())
            .or_default();
        self
    }

    pub fn insert_item(&self, category: &CategoryId, name: &str, record: ColorRecord) {
        self.state
            .lock()
            .categories
            .entry(category.clone())
            .or_default()
            .items
            .insert(name.to_string(), record);
    }

    pub fn item(&self, category: &CategoryId, name: &str) -> Option<ColorRecord> {
        self.state
            .lock()
            .categories
            .get(category)
            .and_then(|c| c.items.get(name).copied())
    }

    /// Make every subsequent `open_category` fail.
    pub fn fail_open(&self, fail: bool) {
        self.state.lock().fail_open = fail;
    }

    /// Make `set_item` fail for `name`.
    pub fn fail_set(&self, name: &str) {
        self.state.lock().fail_set.push(name.to_string());
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().open.is_some()
    }

    /// Calls made so far, oldest first.
    pub fn journal(&self) -> Vec<StoreCall> {
        self.state.lock().journal.clone()
    }

    pub fn clear_journal(&self) {
        self.state.lock().journal.clear();
    }
}

impl ColorStorage for InMemoryStore {
    fn open_category(
        &self,
        category: &CategoryId,
        flags: CategoryFlags,
    ) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        state.journal.push(StoreCall::Open(category.clone(), flags));
        if state.fail_open || state.open.is_some() || !state.categories.contains_key(category) {
            return Err(ProviderError::FAIL);
        }
        state.open = Some(category.clone());
        Ok(())
    }

    fn get_item(&self, name: &str) -> Result<ColorRecord, ProviderError> {
        let mut state = self.state.lock();
        state.journal.push(StoreCall::Get(name.to_string()));
        state
            .current()?
            .items
            .get(name)
            .copied()
            .ok_or(ProviderError::NOT_FOUND)
    }

    fn set_item(&self, name: &str, record: &ColorRecord) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        state.journal.push(StoreCall::Set(name.to_string()));
        if state.fail_set.iter().any(|n| n == name) {
            return Err(ProviderError::FAIL);
        }
        let id = state.open.clone().ok_or(ProviderError::FAIL)?;
        state
            .categories
            .get_mut(&id)
            .ok_or(ProviderError::FAIL)?
            .items
            .insert(name.to_string(), *record);
        Ok(())
    }

    fn get_font(&self) -> Result<RawFontInfo, ProviderError> {
        let mut state = self.state.lock();
        state.journal.push(StoreCall::GetFont);
        state
            .current()?
            .font
            .clone()
            .ok_or(ProviderError::NOT_FOUND)
    }

    fn close_category(&self) {
        let mut state = self.state.lock();
        state.journal.push(StoreCall::Close);
        state.open = None;
    }
}

impl ColorUtilities for InMemoryStore {
    fn color_type(&self, cref: ColorRef) -> Result<ColorType, ProviderError> {
        if cref.is_invalid() {
            return Ok(ColorType::Invalid);
        }
        match cref.0 >> 24 {
            TAG_RAW => Ok(ColorType::Raw),
            TAG_INDEXED => Ok(ColorType::Indexed),
            TAG_SYSTEM => Ok(ColorType::SystemColor),
            TAG_THEME => Ok(ColorType::ThemeColor),
            _ => Err(ProviderError::FAIL),
        }
    }

    fn decode_indexed(&self, cref: ColorRef) -> Result<ColorIndex, ProviderError> {
        expect_tag(cref, TAG_INDEXED).map(|payload| ColorIndex(payload as i32))
    }

    fn index_to_rgb(&self, index: ColorIndex) -> Result<PackedColor, ProviderError> {
        self.palette
            .get(&index)
            .copied()
            .ok_or(ProviderError::NOT_FOUND)
    }

    fn decode_system_color(&self, cref: ColorRef) -> Result<PackedColor, ProviderError> {
        let id = expect_tag(cref, TAG_SYSTEM)?;
        self.system.get(&id).copied().ok_or(ProviderError::NOT_FOUND)
    }

    fn decode_theme_color_id(&self, cref: ColorRef) -> Result<ThemeColorId, ProviderError> {
        expect_tag(cref, TAG_THEME).map(|payload| ThemeColorId(payload as i32))
    }
}

impl ThemeColorService for InMemoryStore {
    fn theme_id_to_rgb(&self, id: ThemeColorId) -> Result<PackedColor, ProviderError> {
        self.theme.get(&id).copied().ok_or(ProviderError::NOT_FOUND)
    }
}

fn expect_tag(cref: ColorRef, tag: u32) -> Result<u32, ProviderError> {
    if !cref.is_invalid() && cref.0 >> 24 == tag {
        Ok(cref.0 & PAYLOAD_MASK)
    } else {
        Err(ProviderError::FAIL)
    }
}
