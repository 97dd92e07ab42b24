pub mod models;
pub mod error;
pub mod storage;
pub mod types;

pub use error::{Error, InputError};
pub use models::CompletionModel;
pub use storage::AnalysisStore;
pub use types::{
    AnalysisRequest, AnalysisResult, RecordId, StoredRecord, DEGRADED_FEATURE, MIN_CONTENT_CHARS,
};

pub type Result<T> = std::result::Result<T, Error>;
