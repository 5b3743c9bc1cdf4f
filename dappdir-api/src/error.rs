use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dappdir::{error::DocumentStoreError, schema::ValidationErrors};
use serde_json::json;

/// Longest error text echoed back for lookup failures and diagnostics.
pub const MAX_DETAIL_CHARS: usize = 80;

/// Truncates `message` to at most [`MAX_DETAIL_CHARS`] characters.
pub fn truncate_detail(message: &str) -> String {
    message.chars().take(MAX_DETAIL_CHARS).collect()
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`DocumentStoreError`] for storage failures and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of the
/// form `{"error": message, "code": CODE}`, with a `details` list for validation errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An error from the document store.
    #[error(transparent)]
    Store(#[from] DocumentStoreError),

    /// The request body or query failed validation.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Maps a failed point lookup or vote on `entity`.
    ///
    /// A missing record stays a 404; anything else, including a malformed id or
    /// an unavailable store, is a 400 carrying the truncated error text.
    pub fn lookup(entity: &str, err: DocumentStoreError) -> Self {
        match err {
            DocumentStoreError::NotFound { .. } => AppError::NotFound(format!("{entity} not found")),
            other => AppError::BadRequest(truncate_detail(&other.to_string())),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Store(store) => match store {
                DocumentStoreError::Validation(errors) => validation(errors),
                err @ DocumentStoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string(), None)
                }
                err @ DocumentStoreError::InvalidId(_) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string(), None)
                }
                err => {
                    tracing::error!(error = %err, "Document store error");
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", err.to_string(), None)
                }
            },
            AppError::Validation(errors) => validation(errors),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg, None)
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}

fn validation(errors: ValidationErrors) -> (StatusCode, &'static str, String, Option<serde_json::Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        "VALIDATION_ERROR",
        "Request validation failed".to_string(),
        Some(json!(errors)),
    )
}
