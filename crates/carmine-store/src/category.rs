//! Scoped category acquisition.

use carmine_core::ProviderError;

use crate::error::StoreError;
use crate::storage::{CategoryFlags, CategoryId, ColorRecord, ColorStorage, RawFontInfo};

/// An open storage category, closed when dropped.
///
/// A failed open never produces a guard, so a category that was not
/// opened is never closed.
pub struct OpenCategory<'s> {
    storage: &'s dyn ColorStorage,
    category: &'s CategoryId,
}

impl<'s> OpenCategory<'s> {
    pub fn open(
        storage: &'s dyn ColorStorage,
        category: &'s CategoryId,
        flags: CategoryFlags,
    ) -> Result<Self, StoreError> {
        storage.open_category(category, flags).map_err(|e| {
            tracing::warn!("cannot open color category {category}: {e}");
            StoreError::CategoryUnavailable(e)
        })?;
        Ok(Self { storage, category })
    }

    pub fn get_item(&self, name: &str) -> Result<ColorRecord, ProviderError> {
        self.storage.get_item(name)
    }

    /// First name in `names` the category knows, with its record.
    pub fn find_item<'n>(&self, names: [&'n str; 2]) -> Option<(&'n str, ColorRecord)> {
        names.into_iter().find_map(|name| match self.get_item(name) {
            Ok(record) => Some((name, record)),
            Err(e) => {
                tracing::debug!("no color item {name:?} in {}: {e}", self.category);
                None
            }
        })
    }

    pub fn set_item(&self, name: &str, record: &ColorRecord) -> Result<(), ProviderError> {
        self.storage.set_item(name, record)
    }

    pub fn get_font(&self) -> Result<RawFontInfo, ProviderError> {
        self.storage.get_font()
    }
}

impl Drop for OpenCategory<'_> {
    fn drop(&mut self) {
        self.storage.close_category();
    }
}

impl std::fmt::Debug for OpenCategory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenCategory")
            .field("category", self.category)
            .finish_non_exhaustive()
    }
}
