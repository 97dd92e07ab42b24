//! Turn a free-text model reply into a validated [`AnalysisResult`].

use nc_core::AnalysisResult;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No JSON object found in model reply")]
    NoPayload,

    #[error("Malformed JSON in model reply: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid analysis: {0}")]
    Validation(String),
}

fn invalid(message: &str) -> ExtractError {
    ExtractError::Validation(message.to_string())
}

/// Parse and validate a raw model reply.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, ExtractError> {
    let payload = extract_payload(raw)?;
    let object = payload
        .as_object()
        .ok_or_else(|| invalid("payload is not a JSON object"))?;
    validate(object)
}

/// Locate the JSON payload in the reply.
///
/// The whole trimmed reply is tried first; failing that, the span from the
/// first `{` to the last `}` is parsed.
fn extract_payload(raw: &str) -> Result<Value, ExtractError> {
    let trimmed = raw.trim();

    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    let start = trimmed.find('{').ok_or(ExtractError::NoPayload)?;
    let end = trimmed.rfind('}').ok_or(ExtractError::NoPayload)?;
    if end < start {
        return Err(ExtractError::NoPayload);
    }

    Ok(serde_json::from_str(&trimmed[start..=end])?)
}

fn validate(object: &Map<String, Value>) -> Result<AnalysisResult, ExtractError> {
    let is_fake = object
        .get("isFake")
        .and_then(Value::as_bool)
        .ok_or_else(|| invalid("isFake must be a boolean"))?;

    let confidence = object
        .get("confidence")
        .and_then(Value::as_f64)
        .filter(|c| (0.0..=100.0).contains(c))
        .ok_or_else(|| invalid("confidence must be a number between 0 and 100"))?;

    let features = object
        .get("features")
        .and_then(Value::as_array)
        .filter(|features| !features.is_empty())
        .ok_or_else(|| invalid("features must be a non-empty array"))?;

    let explanation = object
        .get("explanation")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| invalid("explanation must be a non-empty string"))?;

    let features = features
        .iter()
        .map(|feature| {
            feature
                .as_str()
                .map(str::trim)
                .ok_or_else(|| invalid("features must contain only strings"))
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|feature| !feature.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();

    // trimming can empty a list that passed the check above
    if features.is_empty() {
        return Err(invalid("features must contain at least one non-blank entry"));
    }

    Ok(AnalysisResult {
        is_fake,
        confidence: confidence.round() as u8,
        features,
        explanation: explanation.to_string(),
    })
}
