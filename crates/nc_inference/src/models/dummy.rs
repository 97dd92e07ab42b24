use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use nc_core::{Error, Result};
use super::CompletionModel;

const CANNED_REPLY: &str = r#"{"isFake": false, "confidence": 50, "features": ["Offline analysis: no model was consulted"], "explanation": "The dummy model does not inspect the article; configure a real model for genuine results."}"#;

/// Offline model replying with a fixed completion.
///
/// Clones share the call counter and the last prompt seen.
#[derive(Clone)]
pub struct DummyModel {
    reply: Option<String>,
    calls: Arc<AtomicUsize>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel")
            .field("reply", &self.reply)
            .field("calls", &self.calls())
            .finish()
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self::with_reply(CANNED_REPLY)
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// A model whose every call fails like an unreachable provider.
    pub fn failing() -> Self {
        Self {
            reply: None,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|prompt| prompt.clone())
    }
}

#[async_trait]
impl CompletionModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }

        self.reply
            .clone()
            .ok_or_else(|| Error::Inference("Dummy model is configured to fail".to_string()))
    }
}
