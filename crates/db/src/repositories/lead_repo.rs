//! Repository for the `leads` table.

use intake_core::lead::{Attribution, Lead};
use intake_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::LeadRow;

/// Column list for `leads` queries.
const COLUMNS: &str = "\
    id, name, email, company, country_code, phone, project_description, \
    budget, timeline, custom_budget, urgency, \
    ip_address, user_agent, referrer_url, referrer_source, \
    utm_source, utm_medium, utm_campaign, telemetry_json, created_at";

/// Provides insert and lookup operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a sanitized, validated lead and return its generated id.
    ///
    /// The full telemetry payload is stored as JSONB alongside the promoted
    /// columns so nothing the client sent is lost.
    pub async fn create(
        pool: &PgPool,
        lead: &Lead,
        attribution: &Attribution,
    ) -> Result<DbId, sqlx::Error> {
        let telemetry_json =
            serde_json::to_value(&lead.telemetry).unwrap_or(serde_json::Value::Null);

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO leads \
                (name, email, company, country_code, phone, project_description, \
                 budget, timeline, custom_budget, urgency, \
                 ip_address, user_agent, referrer_url, referrer_source, \
                 utm_source, utm_medium, utm_campaign, telemetry_json) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
                     $11, $12, $13, $14, $15, $16, $17, $18) \
             RETURNING id",
        )
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.company)
        .bind(&lead.country_code)
        .bind(&lead.phone)
        .bind(&lead.project_description)
        .bind(&lead.budget)
        .bind(&lead.timeline)
        .bind(&lead.custom_budget)
        .bind(&lead.telemetry.urgency)
        .bind(&attribution.ip_address)
        .bind(&attribution.user_agent)
        .bind(&attribution.referrer_url)
        .bind(&attribution.referrer_source)
        .bind(&attribution.utm_source)
        .bind(&attribution.utm_medium)
        .bind(&attribution.utm_campaign)
        .bind(telemetry_json)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Find a lead by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LeadRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count all leads. Used by tests and operational checks.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM leads")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
