//! Contact routes, mounted at `/contact` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(contact::submit_contact).get(contact::contact_info))
}
