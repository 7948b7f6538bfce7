use carmine_core::{ItemNames, ProviderError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("color category unavailable: {0}")]
    CategoryUnavailable(ProviderError),
    #[error("failed to persist color item {name:?}: {source}")]
    PersistFailed {
        name: String,
        source: ProviderError,
    },
}

/// A batch save stopped at `failed`; the items before it were written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("saving {failed} failed after {saved} item(s): {source}")]
pub struct SaveBatchError {
    pub failed: ItemNames,
    pub saved: usize,
    pub source: StoreError,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid store config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },
    #[error("invalid {field}: {value}")]
    Invalid { field: &'static str, value: String },
}
