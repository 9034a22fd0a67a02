use async_trait::async_trait;
use parking_lot::RwLock;

use super::{ensure_storable, same_name, RecordStore, StoreError};
use crate::domain::CircuitRecord;

/// Process-local record store
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<CircuitRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CircuitRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self) -> Result<Vec<CircuitRecord>, StoreError> {
        Ok(self.records.read().clone())
    }

    async fn get(&self, position: usize) -> Result<Option<CircuitRecord>, StoreError> {
        Ok(self.records.read().get(position).cloned())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().len())
    }

    async fn contains_name(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.records.read().iter().any(|r| same_name(&r.name, name)))
    }

    async fn append(&self, record: CircuitRecord) -> Result<(), StoreError> {
        ensure_storable(&record)?;
        self.records.write().push(record);
        Ok(())
    }

    async fn remove(&self, position: usize) -> Result<CircuitRecord, StoreError> {
        let mut records = self.records.write();
        if position >= records.len() {
            return Err(StoreError::NotFound(position));
        }
        Ok(records.remove(position))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.records.write().clear();
        Ok(())
    }
}
