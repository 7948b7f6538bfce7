//! Carmine Store — scoped access to the host's font-and-color store.
//!
//! Defines the [`ColorStorage`] trait the host implements, the
//! [`OpenCategory`] guard that brackets every read and write burst, and
//! [`ColorStorageGateway`], which loads [`ColorItem`]s by name and writes
//! them back.
//!
//! [`ColorItem`]: carmine_core::ColorItem

pub mod category;
pub mod config;
pub mod context;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod storage;

pub use category::OpenCategory;
pub use config::StoreConfig;
pub use context::ColorContext;
pub use error::{ConfigError, SaveBatchError, StoreError};
pub use gateway::{
    ColorStorageGateway, FontInfo, ItemDefaults, LoadedItem, SaveOutcome, SaveReport,
};
pub use memory::InMemoryStore;
pub use storage::{CategoryFlags, CategoryId, ColorRecord, ColorStorage, FontFlags, RawFontInfo};
