use async_trait::async_trait;
use crate::types::{AnalysisRequest, AnalysisResult, RecordId, StoredRecord};
use crate::Result;

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Persist a finished analysis together with the article it describes
    async fn save(&self, request: &AnalysisRequest, result: &AnalysisResult) -> Result<RecordId>;

    /// Most recent records first, at most `limit` of them
    async fn list_recent(&self, limit: usize) -> Result<Vec<StoredRecord>>;

    /// Returns whether a record with this id existed
    async fn delete_by_id(&self, id: &str) -> Result<bool>;
}
