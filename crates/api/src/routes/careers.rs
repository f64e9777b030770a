//! Career routes, mounted at `/careers` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::careers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/subscribe", post(careers::subscribe))
}
