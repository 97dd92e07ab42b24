use async_trait::async_trait;
use nc_core::{AnalysisRequest, AnalysisResult, AnalysisStore, RecordId, Result, StoredRecord};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const MEMORY_URL: &str = "memory://";

#[derive(Default)]
pub struct MemoryStore {
    records: Vec<StoredRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: StoredRecord) -> RecordId {
        let id = record.id.clone();
        self.records.push(record);
        id
    }

    pub fn recent(&self, limit: usize) -> Vec<StoredRecord> {
        // later inserts win ties on created_at
        let mut records = self.records.iter().rev().cloned().collect::<Vec<_>>();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        records
    }

    pub fn remove(&mut self, id: &str) -> bool {
        match self.records.iter().position(|record| record.id == id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Process-local store; contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prebuilt record, keeping its id and timestamp
    pub async fn insert(&self, record: StoredRecord) -> RecordId {
        self.store.write().await.insert(record)
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl AnalysisStore for MemoryStorage {
    async fn save(&self, request: &AnalysisRequest, result: &AnalysisResult) -> Result<RecordId> {
        let record = StoredRecord::new(request, result);
        Ok(self.store.write().await.insert(record))
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<StoredRecord>> {
        Ok(self.store.read().await.recent(limit))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.store.write().await.remove(id))
    }
}
