//! The submission sink: where an accepted submission ends up.
//!
//! The orchestration path (rate limit, sanitize, validate, enrich) is the
//! same in both deployment variants; only the last step differs. This trait
//! captures that seam, with a Postgres implementation here and the HTTP
//! forwarder in [`crate::forward`].

use async_trait::async_trait;

use intake_core::lead::{Attribution, Lead};
use intake_core::types::DbId;
use intake_db::repositories::{LeadRepo, SubscriberRepo};
use intake_db::DbPool;

/// Marker stored with subscriptions originating from the website form.
pub const SUBSCRIPTION_SOURCE: &str = "website";

/// Errors from the persistence/forwarding step.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The external backend could not be reached (refused, reset, DNS).
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// The external backend did not answer within the configured timeout.
    #[error("Backend request timed out")]
    Timeout,

    /// The external backend answered with a body that is not JSON.
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

/// Result of a contact submission.
#[derive(Debug)]
pub enum ContactOutcome {
    /// Inserted locally; `lead_id` is the generated row id.
    Stored { lead_id: DbId },
    /// Forwarded; the backend response is relayed verbatim.
    Relayed { status: u16, body: serde_json::Value },
}

/// Result of a career subscription.
#[derive(Debug)]
pub enum SubscribeOutcome {
    Created,
    AlreadySubscribed,
    /// Forwarded; the backend response is relayed verbatim.
    Relayed { status: u16, body: serde_json::Value },
}

/// Final persistence step for sanitized, validated submissions.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn submit_contact(
        &self,
        lead: &Lead,
        attribution: &Attribution,
    ) -> Result<ContactOutcome, SinkError>;

    async fn subscribe_career(&self, email: &str) -> Result<SubscribeOutcome, SinkError>;
}

/// Direct-persistence sink: parameterized inserts into Postgres.
pub struct PgLeadSink {
    pool: DbPool,
}

impl PgLeadSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadSink for PgLeadSink {
    async fn submit_contact(
        &self,
        lead: &Lead,
        attribution: &Attribution,
    ) -> Result<ContactOutcome, SinkError> {
        let lead_id = LeadRepo::create(&self.pool, lead, attribution).await?;
        tracing::info!(lead_id, email = %lead.email, "Lead stored");
        Ok(ContactOutcome::Stored { lead_id })
    }

    async fn subscribe_career(&self, email: &str) -> Result<SubscribeOutcome, SinkError> {
        let inserted =
            SubscriberRepo::subscribe(&self.pool, email, Some(SUBSCRIPTION_SOURCE)).await?;
        match inserted {
            Some(subscriber) => {
                tracing::info!(subscriber_id = subscriber.id, "Career subscriber added");
                Ok(SubscribeOutcome::Created)
            }
            None => {
                tracing::debug!(email, "Repeat career subscription");
                Ok(SubscribeOutcome::AlreadySubscribed)
            }
        }
    }
}
