//! Application-level error type for HTTP handlers.
//!
//! Every variant maps to the response contract: validation failures carry a
//! per-field error list, rate limiting carries retry headers, backend
//! failures carry distinct error codes, and anything unexpected degrades to
//! a generic 500 with a user-safe message.

use axum::http::header::RETRY_AFTER;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use intake_core::rate_limit::RateLimitDecision;
use intake_core::validation::FieldError;

use crate::sink::SinkError;

/// Operator-facing hints embedded in the 503 body. A debugging aid, not
/// end-user copy.
const BACKEND_TROUBLESHOOTING: [&str; 3] = [
    "Ensure the backend server is running",
    "Verify it is listening at the configured BACKEND_API_URL",
    "Check network connectivity between this service and the backend",
];

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// One or more fields failed the server-boundary validation rules.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// The client exceeded its rate-limit window.
    #[error("Rate limited")]
    RateLimited { decision: RateLimitDecision, message: &'static str },

    /// Malformed request (invalid JSON body and similar).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A persistence/forwarding failure from the sink.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                let body = json!({
                    "success": false,
                    "message": "Validation failed. Please correct the highlighted fields.",
                    "errors": errors,
                });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }

            AppError::RateLimited { decision, message } => {
                let now = chrono::Utc::now();
                let reset = decision.reset_at.to_rfc3339();
                let body = json!({
                    "success": false,
                    "message": message,
                    "retryAfter": reset.clone(),
                });
                let mut response =
                    (StatusCode::TOO_MANY_REQUESTS, axum::Json(body)).into_response();
                let headers = response.headers_mut();
                insert_header(headers, RETRY_AFTER.as_str(), &decision.retry_after_secs(now).to_string());
                insert_header(headers, "x-ratelimit-limit", &decision.limit.to_string());
                insert_header(headers, "x-ratelimit-remaining", &decision.remaining.to_string());
                insert_header(headers, "x-ratelimit-reset", &reset);
                response
            }

            AppError::BadRequest(msg) => {
                let body = json!({ "success": false, "message": msg });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }

            AppError::Sink(err) => sink_error_response(err),

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                generic_500()
            }
        }
    }
}

/// Map a sink failure to the response contract.
///
/// Backend-unreachable and backend-timeout get distinct codes so the client
/// can tell a dead backend from a slow one; database errors are never
/// exposed beyond a generic 500.
fn sink_error_response(err: SinkError) -> Response {
    match err {
        SinkError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            generic_500()
        }
        SinkError::Unreachable(detail) => {
            tracing::error!(detail, "Backend unreachable");
            let body = json!({
                "success": false,
                "message": "The service is temporarily unavailable. Please try again later.",
                "error": "BACKEND_CONNECTION_ERROR",
                "troubleshooting": BACKEND_TROUBLESHOOTING,
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(body)).into_response()
        }
        SinkError::Timeout => {
            tracing::error!("Backend request timed out");
            let body = json!({
                "success": false,
                "message": "The request took too long to process. Please try again later.",
                "error": "BACKEND_TIMEOUT",
            });
            (StatusCode::GATEWAY_TIMEOUT, axum::Json(body)).into_response()
        }
        SinkError::InvalidResponse(detail) => {
            tracing::error!(detail, "Backend returned a non-JSON response");
            generic_500()
        }
    }
}

fn generic_500() -> Response {
    let body = json!({
        "success": false,
        "message": "An error occurred while processing your request. Please try again later.",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}

/// Insert a header, skipping values that cannot be encoded (none of ours can
/// fail in practice).
fn insert_header(headers: &mut axum::http::HeaderMap, name: &str, value: &str) {
    if let (Ok(name), Ok(value)) = (
        axum::http::HeaderName::from_bytes(name.as_bytes()),
        axum::http::HeaderValue::from_str(value),
    ) {
        headers.insert(name, value);
    }
}
