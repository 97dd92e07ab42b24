use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;
use nc_core::{AnalysisRequest, AnalysisResult, StoredRecord};
use nc_inference::Analysis;
use nc_storage::HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use crate::error::ApiError;
use crate::AppState;

/// Body of `POST /api/analyze`. Missing fields are reported as input errors,
/// not as malformed JSON.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub store: String,
}

pub async fn analyze_article(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(body) = payload.map_err(|e| {
        debug!("Rejected analyze body: {}", e);
        ApiError::InvalidBody
    })?;

    let request = AnalysisRequest::new(
        body.title.unwrap_or_default(),
        body.content.unwrap_or_default(),
    )
    .validate()?;

    info!("🔎 Analyzing \"{}\"", request.title);
    match state.service.analyze(&request).await {
        Analysis::Genuine(result) => {
            match state.store.save(&request, &result).await {
                Ok(id) => debug!("Stored analysis {}", id),
                Err(e) => warn!("Analysis not stored: {}", e),
            }
            Ok(Json(result))
        }
        degraded @ Analysis::Degraded(_) => {
            Err(ApiError::AnalysisFailed(degraded.into_result().explanation))
        }
    }
}

pub async fn list_history(State(state): State<Arc<AppState>>) -> Json<Vec<StoredRecord>> {
    Json(state.store.list_recent(HISTORY_LIMIT).await)
}

pub async fn delete_history_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    match state.store.delete_by_id(&id).await {
        Ok(true) => {
            info!("🗑️ Deleted analysis {}", id);
            Ok(Json(DeleteResponse {
                success: true,
                message: "Item deleted successfully".to_string(),
            }))
        }
        Ok(false) => Err(ApiError::NotFound),
        Err(e) => {
            error!("Failed to delete analysis {}: {}", id, e);
            Err(ApiError::DeleteFailed)
        }
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store = if state.store.is_connected() {
        "connected"
    } else {
        "disconnected"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.service.model_name().to_string(),
        store: store.to_string(),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::NoRoute
}
