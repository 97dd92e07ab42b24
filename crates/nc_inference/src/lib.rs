use std::fmt;
use std::time::Duration;

pub mod analysis;
pub mod models;
pub mod prompt;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct Config {
    /// Adapter name, see [`models::create_model`]
    pub model: String,
    pub api_key: Option<String>,
    pub model_url: Option<String>,
    pub model_name: Option<String>,
    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_url", &self.model_url)
            .field("model_name", &self.model_name)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: models::DEEPSEEK.to_string(),
            api_key: None,
            model_url: None,
            model_name: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::analysis::{Analysis, AnalysisFailure, AnalysisService};
    pub use super::models::create_model;
    pub use nc_core::{AnalysisRequest, AnalysisResult, Error, Result};
}

pub use analysis::{Analysis, AnalysisFailure, AnalysisService, FALLBACK_EXPLANATION};
pub use models::create_model;
