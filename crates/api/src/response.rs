//! Shared response envelope types.
//!
//! All submission responses use the `{ "success": ..., "message": ... }`
//! envelope the browser clients expect.

use serde::Serialize;

use intake_core::types::DbId;

/// Success envelope for a stored contact submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<DbId>,
}

/// Plain `{ success, message }` envelope.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}
