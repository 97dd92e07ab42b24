use nc_core::{AnalysisRequest, AnalysisResult, AnalysisStore, Error, RecordId, Result, StoredRecord};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

pub mod backends;

pub use backends::*;

/// Number of records served by the history listing.
pub const HISTORY_LIMIT: usize = 10;

/// Open the store named by a connection URL.
///
/// Supported schemes: `memory://` and, with the `sqlite` feature, `sqlite:<path>`.
pub async fn create_storage(url: &str) -> Result<Arc<dyn AnalysisStore>> {
    if url == memory::MEMORY_URL {
        return Ok(Arc::new(MemoryStorage::new()));
    }

    if url.starts_with("sqlite:") {
        #[cfg(feature = "sqlite")]
        {
            return Ok(Arc::new(SQLiteStorage::connect(url).await?));
        }
        #[cfg(not(feature = "sqlite"))]
        {
            return Err(Error::Config(
                "SQLite support is not enabled in this build".to_string(),
            ));
        }
    }

    Err(Error::Config(format!(
        "Unsupported database URL '{}'. Use {} or sqlite:<path>",
        url,
        memory::MEMORY_URL
    )))
}

/// The process-wide store, decided once at startup.
///
/// A disconnected handle keeps the service running: listings come back
/// empty and writes fail.
#[derive(Clone)]
pub enum StoreHandle {
    Disconnected,
    Connected(Arc<dyn AnalysisStore>),
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreHandle::Disconnected => f.write_str("StoreHandle::Disconnected"),
            StoreHandle::Connected(_) => f.write_str("StoreHandle::Connected(<dyn AnalysisStore>)"),
        }
    }
}

impl StoreHandle {
    /// Connect to `url` if one is configured. Never fails.
    pub async fn connect(url: Option<&str>) -> Self {
        let Some(url) = url else {
            warn!("⚠️ No database URL configured, history will not be recorded");
            return StoreHandle::Disconnected;
        };

        match create_storage(url).await {
            Ok(store) => {
                info!("💾 Connected to analysis store");
                StoreHandle::Connected(store)
            }
            Err(e) => {
                warn!("⚠️ Failed to connect to analysis store, running without history: {}", e);
                StoreHandle::Disconnected
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, StoreHandle::Connected(_))
    }

    pub async fn save(&self, request: &AnalysisRequest, result: &AnalysisResult) -> Result<RecordId> {
        match self {
            StoreHandle::Connected(store) => store.save(request, result).await,
            StoreHandle::Disconnected => Err(Error::Storage("Store is not connected".to_string())),
        }
    }

    /// Newest first. Empty when the store is unavailable.
    pub async fn list_recent(&self, limit: usize) -> Vec<StoredRecord> {
        match self {
            StoreHandle::Connected(store) => match store.list_recent(limit).await {
                Ok(records) => records,
                Err(e) => {
                    warn!("Failed to list analyses: {}", e);
                    Vec::new()
                }
            },
            StoreHandle::Disconnected => Vec::new(),
        }
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<bool> {
        match self {
            StoreHandle::Connected(store) => store.delete_by_id(id).await,
            StoreHandle::Disconnected => Err(Error::Storage("Store is not connected".to_string())),
        }
    }
}

impl From<Arc<dyn AnalysisStore>> for StoreHandle {
    fn from(store: Arc<dyn AnalysisStore>) -> Self {
        StoreHandle::Connected(store)
    }
}

pub mod prelude {
    pub use super::{create_storage, StoreHandle, HISTORY_LIMIT};
    pub use super::backends::*;
}
