//! Handlers for career notification signups.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use intake_core::rate_limit::CAREERS_POLICY;
use intake_core::sanitize;
use intake_core::validation;

use crate::error::{AppError, AppResult};
use crate::extract;
use crate::handlers::contact::relayed_response;
use crate::response::MessageResponse;
use crate::sink::SubscribeOutcome;
use crate::state::AppState;

const RATE_LIMIT_MESSAGE: &str =
    "Too many subscription attempts. Please try again later.";

/// Raw subscription body.
#[derive(Debug, Deserialize)]
pub struct SubscribePayload {
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /api/careers/subscribe
// ---------------------------------------------------------------------------

/// Subscribe an email to career notifications.
///
/// A repeat signup is a success with an "already subscribed" message, not an
/// error; the uniqueness guarantee lives in the storage layer.
pub async fn subscribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubscribePayload>, JsonRejection>,
) -> AppResult<Response> {
    let ip = extract::client_ip(&headers);

    let decision = state.rate_limiter.check(&CAREERS_POLICY, &ip);
    if !decision.allowed {
        tracing::warn!(%ip, "Career subscription rate limited");
        return Err(AppError::RateLimited { decision, message: RATE_LIMIT_MESSAGE });
    }

    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Malformed subscription body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let email = payload
        .email
        .as_deref()
        .map(sanitize::sanitize_email)
        .unwrap_or_default();

    let errors = validation::validate_subscription_email(&email);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let outcome = state.sink.subscribe_career(&email).await?;
    Ok(match outcome {
        SubscribeOutcome::Created => (
            StatusCode::CREATED,
            Json(MessageResponse {
                success: true,
                message: "Subscribed! We'll let you know when positions open up.".to_string(),
            }),
        )
            .into_response(),
        SubscribeOutcome::AlreadySubscribed => (
            StatusCode::OK,
            Json(MessageResponse {
                success: true,
                message: "You're already subscribed.".to_string(),
            }),
        )
            .into_response(),
        SubscribeOutcome::Relayed { status, body } => relayed_response(status, body),
    })
}
