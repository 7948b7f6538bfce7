//! Loading and saving color items through the host store.
//!
//! Every operation opens the configured category, does its reads or
//! writes, and lets the [`OpenCategory`] guard close it again, including
//! on early returns. Read-side failures degrade to "absent" or to the
//! configured defaults; write-side failures are returned to the caller.

use carmine_core::{ColorItem, ColorRef, ColorRefs, Editability, ItemNames, Resolver, encode};

use crate::category::OpenCategory;
use crate::config::StoreConfig;
use crate::context::ColorContext;
use crate::error::{SaveBatchError, StoreError};
use crate::storage::{CategoryFlags, ColorRecord, FontFlags};

/// A record read from the store and the name it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedItem {
    pub name: String,
    pub record: ColorRecord,
}

/// What the caller knows about an item that the store does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemDefaults {
    pub auto_foreground: ColorRef,
    pub auto_background: ColorRef,
    pub editable: Editability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written under this name.
    Saved { name: String },
    /// Neither name exists in the store; nothing was written.
    NotFound,
}

/// Result of a batch save that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub saved: Vec<String>,
    pub not_found: Vec<ItemNames>,
}

/// Editor font as reported by the store, or the configured fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct FontInfo {
    pub family: String,
    pub size: f64,
}

pub struct ColorStorageGateway<'a> {
    context: ColorContext<'a>,
    config: StoreConfig,
}

impl<'a> ColorStorageGateway<'a> {
    pub fn new(context: ColorContext<'a>, config: StoreConfig) -> Self {
        Self { context, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn resolver(&self) -> Resolver<'a> {
        self.context.resolver()
    }

    fn open(&self, flags: CategoryFlags) -> Result<OpenCategory<'_>, StoreError> {
        OpenCategory::open(self.context.storage, &self.config.category, flags)
    }

    /// Read the record stored for `names`, primary name first.
    pub fn load_item(&self, names: &ItemNames) -> Option<LoadedItem> {
        let category = self.open(CategoryFlags::READ).ok()?;
        let (name, record) = category.find_item(names.lookup_order(None))?;
        Some(LoadedItem {
            name: name.to_string(),
            record,
        })
    }

    /// Read `names` and build an editable item from it.
    pub fn load_color_item(&self, names: ItemNames, defaults: ItemDefaults) -> Option<ColorItem> {
        let loaded = self.load_item(&names)?;
        let refs = ColorRefs {
            foreground: loaded.record.foreground,
            background: loaded.record.background,
            auto_foreground: defaults.auto_foreground,
            auto_background: defaults.auto_background,
        };
        let item = ColorItem::new(
            names,
            refs,
            loaded.record.is_bold(),
            defaults.editable,
            &self.resolver(),
        );
        Some(item.with_read_name(loaded.name))
    }

    /// Write `item`'s current colors and bold flag back to the store.
    ///
    /// The name the item was read under is tried first. Editable sides
    /// are written as [`encode`]`(effective, default)`, so a color equal to
    /// its default is stored as "use default" ([`ColorRef::INVALID`]) and
    /// follows later theme changes. Locked color sides keep whatever the
    /// store already has.
    pub fn save_item(&self, item: &ColorItem) -> Result<SaveOutcome, StoreError> {
        let category = self.open(CategoryFlags::WRITE)?;
        let order = item.names().lookup_order(item.read_name());
        let Some((name, mut record)) = category.find_item(order) else {
            tracing::debug!("color item {} not in store, skipping save", item.names());
            return Ok(SaveOutcome::NotFound);
        };

        let resolver = self.resolver();
        if item.is_foreground_editable() {
            record.foreground = encode(
                item.foreground(&resolver),
                item.default_foreground(&resolver),
            );
        }
        if item.is_background_editable() {
            record.background = encode(
                item.background(&resolver),
                item.default_background(&resolver),
            );
        }
        record.font_flags = if item.is_bold() {
            FontFlags::BOLD
        } else {
            FontFlags::empty()
        };

        category.set_item(name, &record).map_err(|source| {
            tracing::warn!("failed to persist color item {name:?}: {source}");
            StoreError::PersistFailed {
                name: name.to_string(),
                source,
            }
        })?;
        Ok(SaveOutcome::Saved {
            name: name.to_string(),
        })
    }

    /// Save `items` in order, stopping at the first failure.
    ///
    /// Each item gets its own open/close of the category. Items missing
    /// from the store are skipped and listed in the report.
    pub fn save_all<'i>(
        &self,
        items: impl IntoIterator<Item = &'i ColorItem>,
    ) -> Result<SaveReport, SaveBatchError> {
        let mut report = SaveReport::default();
        for item in items {
            match self.save_item(item) {
                Ok(SaveOutcome::Saved { name }) => report.saved.push(name),
                Ok(SaveOutcome::NotFound) => report.not_found.push(item.names().clone()),
                Err(source) => {
                    return Err(SaveBatchError {
                        failed: item.names().clone(),
                        saved: report.saved.len(),
                        source,
                    });
                }
            }
        }
        tracing::info!(
            "saved {} color item(s), {} not found",
            report.saved.len(),
            report.not_found.len()
        );
        Ok(report)
    }

    /// The editor font, falling back to the configured family and size.
    pub fn font_info(&self) -> FontInfo {
        let fallback = || FontInfo {
            family: self.config.default_font_family.clone(),
            size: self.config.default_font_size,
        };

        let Ok(category) = self.open(CategoryFlags::READ) else {
            return fallback();
        };
        let raw = match category.get_font() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("no font info in {}: {e}", self.config.category);
                return fallback();
            }
        };

        FontInfo {
            family: raw
                .face_name
                .unwrap_or_else(|| self.config.default_font_family.clone()),
            size: raw
                .height
                .map_or(self.config.default_font_size, |h| f64::from(h.unsigned_abs())),
        }
    }
}

impl std::fmt::Debug for ColorStorageGateway<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorStorageGateway")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
