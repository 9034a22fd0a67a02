use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use super::{ensure_storable, same_name, RecordStore, StoreError};
use crate::domain::CircuitRecord;

/// Record store persisted as a single JSON array
///
/// The array is loaded once on open and rewritten in full after every
/// mutation, through a temporary file renamed over the target.
#[derive(Debug)]
pub struct JsonFileRecordStore {
    path: PathBuf,
    records: RwLock<Vec<CircuitRecord>>,
}

impl JsonFileRecordStore {
    /// Open the store; a missing file is an empty sequence
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records = load(&path).await?;
        info!(path = %path.display(), records = records.len(), "record store opened");
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, records: &[CircuitRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), records = records.len(), "record store written");
        Ok(())
    }
}

async fn load(path: &Path) -> Result<Vec<CircuitRecord>, StoreError> {
    match fs::read(path).await {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl RecordStore for JsonFileRecordStore {
    async fn list(&self) -> Result<Vec<CircuitRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, position: usize) -> Result<Option<CircuitRecord>, StoreError> {
        Ok(self.records.read().await.get(position).cloned())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().await.len())
    }

    async fn contains_name(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .any(|r| same_name(&r.name, name)))
    }

    async fn append(&self, record: CircuitRecord) -> Result<(), StoreError> {
        ensure_storable(&record)?;
        let mut records = self.records.write().await;
        records.push(record);
        if let Err(e) = self.persist(&records).await {
            records.pop();
            return Err(e);
        }
        Ok(())
    }

    async fn remove(&self, position: usize) -> Result<CircuitRecord, StoreError> {
        let mut records = self.records.write().await;
        if position >= records.len() {
            return Err(StoreError::NotFound(position));
        }
        let removed = records.remove(position);
        if let Err(e) = self.persist(&records).await {
            records.insert(position, removed);
            return Err(e);
        }
        Ok(removed)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        self.persist(&[]).await?;
        records.clear();
        Ok(())
    }
}
