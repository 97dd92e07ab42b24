use async_trait::async_trait;
use std::fmt;
use crate::Result;

/// A text-completion backend. One call is one attempt; no retries happen here.
#[async_trait]
pub trait CompletionModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Send a prompt and return the raw completion text
    async fn complete(&self, prompt: &str) -> Result<String>;
}
