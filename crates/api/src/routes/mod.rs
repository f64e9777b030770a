//! Route definitions.
//!
//! Route hierarchy:
//!
//! ```text
//! GET  /health                  liveness
//! POST /api/contact             submit contact form
//! GET  /api/contact             endpoint hint
//! POST /api/careers/subscribe   career notification signup
//! ```

pub mod careers;
pub mod contact;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/contact", contact::router())
        .nest("/careers", careers::router())
}
