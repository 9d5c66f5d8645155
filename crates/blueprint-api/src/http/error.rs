//! Application error type mapping to HTTP status codes.
//!
//! Every error body has the shape `{ "success": false, "error": "..." }`;
//! dispatch errors also carry the failing `moduleId`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use blueprint_core::execution::dispatcher::DispatchError;
use blueprint_types::error::{BlueprintError, ExplainError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Request body missing a required part.
    Validation(String),
    /// Blueprint or module failed ingestion.
    Blueprint(BlueprintError),
    /// A module handler crashed.
    Dispatch(DispatchError),
    /// Explanation service failure.
    Explain(ExplainError),
}

impl From<BlueprintError> for AppError {
    fn from(e: BlueprintError) -> Self {
        AppError::Blueprint(e)
    }
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        AppError::Dispatch(e)
    }
}

impl From<ExplainError> for AppError {
    fn from(e: ExplainError) -> Self {
        AppError::Explain(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Blueprint(_) => StatusCode::BAD_REQUEST,
            AppError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Explain(ExplainError::NotConfigured) => StatusCode::BAD_REQUEST,
            AppError::Explain(ExplainError::InvalidCredential) => StatusCode::UNAUTHORIZED,
            AppError::Explain(ExplainError::Failed(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Validation(msg) => json!({ "success": false, "error": msg }),
            AppError::Blueprint(e) => json!({ "success": false, "error": e.to_string() }),
            AppError::Explain(e) => json!({ "success": false, "error": e.to_string() }),
            AppError::Dispatch(e) => json!({
                "success": false,
                "error": e.to_string(),
                "moduleId": e.module_id(),
            }),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = ?self, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}
