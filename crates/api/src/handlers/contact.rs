//! Handlers for contact form submissions.
//!
//! Orchestration order is fixed: rate-limit gate, parse, sanitize, validate,
//! enrich, persist/forward. Rejections happen as early as possible so a
//! rate-limited client never costs a body parse.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::HashMap;

use intake_core::lead::{ContactPayload, Lead};
use intake_core::rate_limit::CONTACT_POLICY;
use intake_core::telemetry;
use intake_core::validation;

use crate::error::{AppError, AppResult};
use crate::extract;
use crate::response::{MessageResponse, SubmissionResponse};
use crate::sink::ContactOutcome;
use crate::state::AppState;

const RATE_LIMIT_MESSAGE: &str =
    "Too many contact form submissions. Please try again later.";

// ---------------------------------------------------------------------------
// POST /api/contact
// ---------------------------------------------------------------------------

/// Accept a contact form submission.
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> AppResult<Response> {
    let ip = extract::client_ip(&headers);

    let decision = state.rate_limiter.check(&CONTACT_POLICY, &ip);
    if !decision.allowed {
        tracing::warn!(%ip, "Contact submission rate limited");
        return Err(AppError::RateLimited { decision, message: RATE_LIMIT_MESSAGE });
    }

    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Malformed contact body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let mut lead = payload.sanitize();

    let errors = validation::validate_lead(&lead);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let attribution = extract::build_attribution(&headers, &query);
    enrich(&mut lead, attribution.user_agent.as_deref());

    let outcome = state.sink.submit_contact(&lead, &attribution).await?;
    Ok(match outcome {
        ContactOutcome::Stored { lead_id } => (
            StatusCode::CREATED,
            Json(SubmissionResponse {
                success: true,
                message: "Thank you! We received your submission and will get back to you within 24 hours.".to_string(),
                lead_id: Some(lead_id),
            }),
        )
            .into_response(),
        ContactOutcome::Relayed { status, body } => relayed_response(status, body),
    })
}

// ---------------------------------------------------------------------------
// GET /api/contact
// ---------------------------------------------------------------------------

/// Friendly hint for clients probing the endpoint with GET.
pub async fn contact_info() -> impl IntoResponse {
    Json(MessageResponse {
        success: true,
        message: "Contact API endpoint. Use POST to submit a contact form.".to_string(),
    })
}

/// Fill telemetry gaps the browser left: device/browser/OS classification
/// from the user-agent, and the urgency tier from timeline and budget.
/// Client-supplied values win; this only derives what is absent.
fn enrich(lead: &mut Lead, user_agent: Option<&str>) {
    if let Some(ua) = user_agent {
        let t = &mut lead.telemetry;
        if t.device_type.is_none() {
            t.device_type = Some(telemetry::classify_device(ua).as_str().to_string());
        }
        if t.browser_name.is_none() {
            t.browser_name = telemetry::classify_browser(ua).map(str::to_string);
        }
        if t.operating_system.is_none() {
            t.operating_system = telemetry::classify_os(ua).map(str::to_string);
        }
    }

    if lead.telemetry.urgency.is_none() {
        let urgency =
            telemetry::derive_urgency(lead.timeline.as_deref(), lead.budget.as_deref());
        lead.telemetry.urgency = Some(urgency.as_str().to_string());
    }
}

/// Relay a backend response verbatim, falling back to 502 when the backend
/// produced a status this process cannot represent.
pub(crate) fn relayed_response(status: u16, body: serde_json::Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(body)).into_response()
}
