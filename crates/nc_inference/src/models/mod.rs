use std::sync::Arc;
use nc_core::{Error, Result};
use crate::Config;

pub mod deepseek;
pub mod dummy;

pub use deepseek::DeepSeekModel;
pub use dummy::DummyModel;
pub use nc_core::CompletionModel;

pub const DEEPSEEK: &str = "deepseek";
pub const DUMMY: &str = "dummy";

/// Whether the named adapter talks to a remote provider and needs an API key.
pub fn requires_api_key(model: &str) -> bool {
    !model.eq_ignore_ascii_case(DUMMY)
}

pub fn create_model(config: &Config) -> Result<Arc<dyn CompletionModel>> {
    match config.model.to_ascii_lowercase().as_str() {
        DEEPSEEK => Ok(Arc::new(DeepSeekModel::new(config)?)),
        DUMMY => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model '{}'. Available models: {}, {}",
            other, DEEPSEEK, DUMMY
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dummy_model() {
        let config = Config {
            model: "dummy".to_string(),
            ..Config::default()
        };
        let model = create_model(&config).unwrap();
        assert_eq!(model.name(), "Dummy");
    }

    #[test]
    fn test_create_deepseek_model() {
        let config = Config {
            model: "DeepSeek".to_string(),
            api_key: Some("test-key".to_string()),
            ..Config::default()
        };
        let model = create_model(&config).unwrap();
        assert_eq!(model.name(), "DeepSeek");
    }

    #[test]
    fn test_create_model_rejects_unknown_name() {
        let config = Config {
            model: "gpt-2".to_string(),
            ..Config::default()
        };
        let err = create_model(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_requires_api_key() {
        assert!(requires_api_key("deepseek"));
        assert!(!requires_api_key("dummy"));
        assert!(!requires_api_key("Dummy"));
    }
}
