use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Shortest article body, in characters, worth sending to the model.
pub const MIN_CONTENT_CHARS: usize = 50;

/// Feature string carried by the degraded result on the wire.
pub const DEGRADED_FEATURE: &str = "Error: Content analysis failed";

const DEGRADED_PREFIX: &str = "Error:";

pub type RecordId = String;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub title: String,
    pub content: String,
}

impl AnalysisRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Trims both fields and checks them against the submission policy.
    pub fn validate(&self) -> std::result::Result<AnalysisRequest, InputError> {
        let title = self.title.trim();
        let content = self.content.trim();

        if title.is_empty() || content.is_empty() {
            return Err(InputError::MissingFields);
        }
        if content.chars().count() < MIN_CONTENT_CHARS {
            return Err(InputError::ContentTooShort {
                min: MIN_CONTENT_CHARS,
            });
        }

        Ok(AnalysisRequest::new(title, content))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_fake: bool,
    pub confidence: u8,
    pub features: Vec<String>,
    pub explanation: String,
}

impl AnalysisResult {
    /// The fixed sentinel returned when the pipeline could not produce an analysis.
    pub fn degraded(explanation: impl Into<String>) -> Self {
        Self {
            is_fake: false,
            confidence: 0,
            features: vec![DEGRADED_FEATURE.to_string()],
            explanation: explanation.into(),
        }
    }

    /// Sentinel check for consumers that only see the wire shape.
    pub fn is_degraded(&self) -> bool {
        self.features
            .first()
            .map(|f| f.starts_with(DEGRADED_PREFIX))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub is_fake: bool,
    pub confidence: u8,
    pub features: Vec<String>,
    pub explanation: String,
    pub created_at: DateTime<Utc>,
}

impl StoredRecord {
    pub fn new(request: &AnalysisRequest, result: &AnalysisResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: request.title.clone(),
            content: request.content.clone(),
            is_fake: result.is_fake,
            confidence: result.confidence,
            features: result.features.clone(),
            explanation: result.explanation.clone(),
            created_at: Utc::now(),
        }
    }

    pub fn result(&self) -> AnalysisResult {
        AnalysisResult {
            is_fake: self.is_fake,
            confidence: self.confidence,
            features: self.features.clone(),
            explanation: self.explanation.clone(),
        }
    }
}
