use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nc_core::InputError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Every failure a handler can answer with. Bodies never carry internal error text.
#[derive(Debug)]
pub enum ApiError {
    InvalidBody,
    Input(InputError),
    AnalysisFailed(String),
    NotFound,
    NoRoute,
    DeleteFailed,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidBody => (StatusCode::BAD_REQUEST, "Invalid request body".to_string()),
            ApiError::Input(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::AnalysisFailed(explanation) => (StatusCode::INTERNAL_SERVER_ERROR, explanation),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Item not found".to_string()),
            ApiError::NoRoute => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::DeleteFailed => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete item".to_string()),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<InputError> for ApiError {
    fn from(e: InputError) -> Self {
        ApiError::Input(e)
    }
}
