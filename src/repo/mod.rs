//! Record persistence.
//!
//! Records form an ordered, append-only sequence addressed by 0-based
//! position. Names are unique case-insensitively after trimming; the
//! controller checks that before appending.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};
use crate::domain::CircuitRecord;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileRecordStore;
pub use memory::InMemoryRecordStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("record store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no record at position {0}")]
    NotFound(usize),

    #[error("record \"{name}\" cannot be stored: {field} is not finite")]
    NonFinite { name: String, field: &'static str },
}

/// Ordered sequence of sized circuits
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self) -> Result<Vec<CircuitRecord>, StoreError>;

    async fn get(&self, position: usize) -> Result<Option<CircuitRecord>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;

    /// Case-insensitive match on the trimmed name
    async fn contains_name(&self, name: &str) -> Result<bool, StoreError>;

    async fn append(&self, record: CircuitRecord) -> Result<(), StoreError>;

    async fn remove(&self, position: usize) -> Result<CircuitRecord, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}

pub(crate) fn ensure_storable(record: &CircuitRecord) -> Result<(), StoreError> {
    match record.first_non_finite() {
        Some(field) => Err(StoreError::NonFinite {
            name: record.name.clone(),
            field,
        }),
        None => Ok(()),
    }
}

pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

pub struct Repositories {
    pub circuits: Arc<dyn RecordStore>,
}

impl Repositories {
    pub async fn new(cfg: &StoreConfig) -> anyhow::Result<Self> {
        let circuits: Arc<dyn RecordStore> = match cfg.backend {
            StoreBackend::Memory => Arc::new(InMemoryRecordStore::new()),
            StoreBackend::JsonFile => Arc::new(JsonFileRecordStore::open(&cfg.path).await?),
        };
        Ok(Self { circuits })
    }
}
