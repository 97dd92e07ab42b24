use std::fmt;
use std::sync::Arc;
use nc_core::{AnalysisRequest, AnalysisResult, CompletionModel};
use thiserror::Error;
use tracing::{debug, warn};
use crate::prompt::build_analysis_prompt;

pub mod extract;

pub use extract::{parse_analysis, ExtractError};

/// Explanation returned to callers whenever an analysis could not be produced.
pub const FALLBACK_EXPLANATION: &str =
    "The analysis service is currently experiencing issues. Please wait a moment and try again.";

/// Pipeline stages of a single analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Building,
    Calling,
    Extracting,
    Validating,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Building => "building",
            Stage::Calling => "calling",
            Stage::Extracting => "extracting",
            Stage::Validating => "validating",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Why an analysis degraded. Logged, never sent to callers.
#[derive(Error, Debug)]
pub enum AnalysisFailure {
    #[error("Model call failed: {0}")]
    Model(#[source] nc_core::Error),

    #[error("Unusable model reply: {0}")]
    Reply(#[from] ExtractError),
}

impl AnalysisFailure {
    /// The stage the pipeline was in when it failed
    pub fn stage(&self) -> Stage {
        match self {
            AnalysisFailure::Model(_) => Stage::Calling,
            AnalysisFailure::Reply(ExtractError::Validation(_)) => Stage::Validating,
            AnalysisFailure::Reply(_) => Stage::Extracting,
        }
    }
}

#[derive(Debug)]
pub enum Analysis {
    Genuine(AnalysisResult),
    Degraded(AnalysisFailure),
}

impl Analysis {
    pub fn is_genuine(&self) -> bool {
        matches!(self, Analysis::Genuine(_))
    }

    /// Wire representation: degraded analyses become the fixed sentinel result.
    pub fn into_result(self) -> AnalysisResult {
        match self {
            Analysis::Genuine(result) => result,
            Analysis::Degraded(_) => AnalysisResult::degraded(FALLBACK_EXPLANATION),
        }
    }
}

#[derive(Clone)]
pub struct AnalysisService {
    model: Arc<dyn CompletionModel>,
}

impl fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisService")
            .field("model", &self.model.name())
            .finish()
    }
}

impl AnalysisService {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Analyze an already validated article. Never fails: any error
    /// collapses into [`Analysis::Degraded`].
    pub async fn analyze(&self, request: &AnalysisRequest) -> Analysis {
        match self.run(request).await {
            Ok(result) => {
                debug!(stage = %Stage::Done, confidence = result.confidence, "analysis complete");
                Analysis::Genuine(result)
            }
            Err(failure) => {
                warn!(
                    stage = %failure.stage(),
                    model = self.model.name(),
                    "analysis degraded: {}",
                    failure
                );
                Analysis::Degraded(failure)
            }
        }
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisFailure> {
        debug!(stage = %Stage::Building, title = %request.title, "building prompt");
        let prompt = build_analysis_prompt(&request.title, &request.content);

        debug!(stage = %Stage::Calling, model = self.model.name(), "requesting completion");
        let reply = self
            .model
            .complete(&prompt)
            .await
            .map_err(AnalysisFailure::Model)?;

        debug!(stage = %Stage::Extracting, "parsing {} chars of model reply", reply.len());
        Ok(parse_analysis(&reply)?)
    }
}
