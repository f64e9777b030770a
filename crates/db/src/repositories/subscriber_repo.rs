//! Repository for the `career_subscribers` table.

use sqlx::PgPool;

use crate::models::career_subscriber::CareerSubscriber;

/// Column list for `career_subscribers` queries.
const COLUMNS: &str = "id, email, source, subscribed_at";

/// Provides subscribe and lookup operations for career subscribers.
pub struct SubscriberRepo;

impl SubscriberRepo {
    /// Subscribe an email, returning `None` when it is already subscribed.
    ///
    /// Relies on the `uq_career_subscribers_email` constraint: the insert is
    /// conditional at the storage layer, so concurrent identical signups
    /// cannot produce duplicate rows.
    pub async fn subscribe(
        pool: &PgPool,
        email: &str,
        source: Option<&str>,
    ) -> Result<Option<CareerSubscriber>, sqlx::Error> {
        let query = format!(
            "INSERT INTO career_subscribers (email, source) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_career_subscribers_email DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CareerSubscriber>(&query)
            .bind(email)
            .bind(source)
            .fetch_optional(pool)
            .await
    }

    /// Find a subscriber by email.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<CareerSubscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM career_subscribers WHERE email = $1");
        sqlx::query_as::<_, CareerSubscriber>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Count all subscribers. Used by tests.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM career_subscribers")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
