//! Career subscriber entity model.

use intake_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `career_subscribers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CareerSubscriber {
    pub id: DbId,
    pub email: String,
    pub source: Option<String>,
    pub subscribed_at: Timestamp,
}
