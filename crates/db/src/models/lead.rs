//! Lead entity model.

use intake_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeadRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub country_code: String,
    pub phone: String,
    pub project_description: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub custom_budget: Option<String>,
    pub urgency: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer_url: Option<String>,
    pub referrer_source: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub telemetry_json: Option<serde_json::Value>,
    pub created_at: Timestamp,
}
