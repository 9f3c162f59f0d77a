use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Backend detail (`Ai::detail`, `Export`, `Internal`) is logged, never returned:
/// callers only ever see one generic message per failed action.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("AI error ({message}): {detail}")]
    Ai {
        /// User-facing message for the failed action.
        message: &'static str,
        detail: String,
    },

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Internal(anyhow::anyhow!("template rendering failed: {err}"))
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::MissingName => AppError::Validation(err.to_string()),
            ExportError::Timeout(after) => {
                AppError::Timeout(format!("PDF export exceeded {}s", after.as_secs()))
            }
            other => AppError::Export(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Ai { message, detail } => {
                tracing::error!("AI error: {detail}");
                (StatusCode::BAD_GATEWAY, "AI_ERROR", message.to_string())
            }
            AppError::Timeout(msg) => {
                tracing::warn!("Timeout: {msg}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "TIMEOUT",
                    "The operation took too long. Please try again.".to_string(),
                )
            }
            AppError::Export(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "An error occurred while exporting your resume to PDF.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_error_hides_detail_from_response() {
        let err = AppError::Ai {
            message: "Failed to enhance resume. Please try again.",
            detail: "upstream 500: secret stack trace".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_missing_name_maps_to_validation() {
        let err: AppError = ExportError::MissingName.into();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("before exporting")));
    }

    #[test]
    fn test_export_timeout_maps_to_timeout() {
        let err: AppError = ExportError::Timeout(std::time::Duration::from_secs(30)).into();
        assert!(matches!(err, AppError::Timeout(_)));
        assert_eq!(err.into_response().status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
