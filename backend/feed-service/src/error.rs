/// Error types for feed-service
///
/// Write-path policy failures (validation, rate limiting) and storage
/// outages each map to a distinct `kind` in the response body so clients
/// can render a specific message. Directory lookup failures never appear
/// here: they degrade to missing authors inside the feed assembler.
use actix_web::{
    error::ResponseError,
    http::{header, StatusCode},
    HttpResponse,
};
use thiserror::Error;

use crate::db::StoreError;
use crate::validation::ValidationError;

/// Result type for feed-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Post content failed the content policy
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Identity exceeded its posting window
    #[error("rate limit exceeded, retry in {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    /// Post store backend failure, transient and retryable
    #[error("post store unavailable: {0}")]
    StoreUnavailable(String),

    /// Caller identity missing or malformed
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed request outside the content policy's concern
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable discriminant used in response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::RateLimited { .. } => "rate_limited",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::BadRequest(_) => "bad_request",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => AppError::StoreUnavailable(msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });

        match self {
            AppError::Validation(err) => {
                body["field_errors"] = serde_json::json!({ "content": err.to_string() });
            }
            AppError::RateLimited {
                retry_after_seconds,
            } => {
                body["retry_after_seconds"] = (*retry_after_seconds).into();
            }
            _ => {}
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let AppError::RateLimited {
            retry_after_seconds,
        } = self
        {
            builder.insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()));
        }
        builder.json(body)
    }
}
