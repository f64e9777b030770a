#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use intake_api::config::{ServerConfig, SinkConfig};
use intake_api::forward::ForwardLeadSink;
use intake_api::routes;
use intake_api::sink::{LeadSink, PgLeadSink};
use intake_api::state::AppState;
use intake_core::rate_limit::RateLimiter;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(sink: SinkConfig) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        sink,
    }
}

/// Build the application router backed by the database sink.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The returned router is `Clone`;
/// clones share state, so multi-request tests see one rate limiter.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config(SinkConfig::Database {
        database_url: "postgres://unused-in-tests".to_string(),
    });
    build_app(config, Arc::new(PgLeadSink::new(pool)))
}

/// Build the application router backed by the forwarding sink.
pub fn build_forward_app(backend_url: &str, timeout_secs: u64) -> Router {
    let config = test_config(SinkConfig::Forward {
        backend_url: backend_url.to_string(),
        timeout_secs,
    });
    build_app(config, Arc::new(ForwardLeadSink::new(backend_url, timeout_secs)))
}

fn build_app(config: ServerConfig, sink: Arc<dyn LeadSink>) -> Router {
    let state = AppState {
        config: Arc::new(config),
        rate_limiter: Arc::new(RateLimiter::new()),
        sink,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3000".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_json_from(app, uri, body, "203.0.113.1").await
}

/// Send a POST with a JSON body and an explicit client IP.
pub async fn post_json_from(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    ip: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", ip)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST with a raw (possibly malformed) body.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", "203.0.113.1")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// A contact payload that passes validation.
pub fn valid_contact() -> serde_json::Value {
    serde_json::json!({
        "name": "Jo",
        "email": "jo@x.com",
        "countryCode": "91",
        "phone": "9876543210",
        "projectDescription": "Need a platform for my startup",
    })
}
