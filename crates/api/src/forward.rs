//! Forwarding sink: proxies accepted submissions to an external backend.
//!
//! Requests carry a bounded timeout and are never retried; a failed forward
//! is surfaced to the caller. On success the backend response is relayed
//! verbatim (status and JSON body).

use async_trait::async_trait;
use serde_json::json;

use intake_core::lead::{Attribution, Lead};

use crate::sink::{ContactOutcome, LeadSink, SinkError, SubscribeOutcome, SUBSCRIPTION_SOURCE};

/// HTTP forwarder for the proxying deployment variant.
pub struct ForwardLeadSink {
    client: reqwest::Client,
    backend_url: String,
}

impl ForwardLeadSink {
    /// Build a forwarder with a per-request timeout.
    ///
    /// Panics when the client cannot be constructed, which only happens with
    /// an invalid TLS/runtime setup and should stop startup.
    pub fn new(backend_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            backend_url: backend_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(u16, serde_json::Value), SinkError> {
        let url = format!("{}{}", self.backend_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status().as_u16();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SinkError::InvalidResponse(e.to_string()))?;
        Ok((status, body))
    }
}

/// Map a reqwest error to the sink taxonomy: timeouts are distinct from
/// connection-level failures (refused, reset, DNS).
fn classify_reqwest_error(err: reqwest::Error) -> SinkError {
    if err.is_timeout() {
        SinkError::Timeout
    } else {
        SinkError::Unreachable(err.to_string())
    }
}

#[async_trait]
impl LeadSink for ForwardLeadSink {
    async fn submit_contact(
        &self,
        lead: &Lead,
        attribution: &Attribution,
    ) -> Result<ContactOutcome, SinkError> {
        // One flat JSON object: the sanitized lead plus the server-derived
        // attribution, matching the shape the backend expects.
        let mut body = serde_json::to_value(lead)
            .map_err(|e| SinkError::InvalidResponse(e.to_string()))?;
        let attribution_value = serde_json::to_value(attribution)
            .map_err(|e| SinkError::InvalidResponse(e.to_string()))?;
        if let (Some(body_map), Some(attr_map)) =
            (body.as_object_mut(), attribution_value.as_object())
        {
            for (key, value) in attr_map {
                body_map.insert(key.clone(), value.clone());
            }
        }

        let (status, response) = self.post_json("/api/contact", &body).await?;
        tracing::info!(status, email = %lead.email, "Lead forwarded to backend");
        Ok(ContactOutcome::Relayed { status, body: response })
    }

    async fn subscribe_career(&self, email: &str) -> Result<SubscribeOutcome, SinkError> {
        let body = json!({ "email": email, "source": SUBSCRIPTION_SOURCE });
        let (status, response) = self.post_json("/api/careers/subscribe", &body).await?;
        tracing::info!(status, "Career subscription forwarded to backend");
        Ok(SubscribeOutcome::Relayed { status, body: response })
    }
}
