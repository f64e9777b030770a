use std::sync::Arc;

use intake_core::rate_limit::RateLimiter;

use crate::config::ServerConfig;
use crate::sink::LeadSink;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`. The rate limiter and sink
/// are injected here rather than living as module globals so tests get
/// isolated instances.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-IP request counters shared by all handlers.
    pub rate_limiter: Arc<RateLimiter>,
    /// Where accepted submissions go (database insert or HTTP forward).
    pub sink: Arc<dyn LeadSink>,
}
