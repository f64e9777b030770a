//! Domain logic for the lead intake service.
//!
//! Everything here is independent of HTTP and storage: payload sanitization,
//! field validation, rate limiting, and telemetry/attribution derivation.
//! The `api` and `db` crates build on these types.

pub mod lead;
pub mod rate_limit;
pub mod sanitize;
pub mod telemetry;
pub mod types;
pub mod validation;
