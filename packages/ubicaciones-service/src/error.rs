use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::ValidationError;
use crate::services::StoreError;

/// Route-boundary failure. Every variant is reported as a 500 carrying the
/// underlying message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    InvalidBody(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Store(e) => tracing::error!("Store error: {:?}", e),
            AppError::Validation(e) => tracing::warn!("Rejected usuario payload: {}", e),
            AppError::InvalidBody(e) => tracing::warn!("Unreadable request body: {}", e),
        }

        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
