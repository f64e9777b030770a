//! Lead intake API server library.
//!
//! Exposes the building blocks (config, state, error handling, sinks, routes)
//! so integration tests and the binary entrypoint can both access them.

pub mod config;
pub mod error;
pub mod extract;
pub mod forward;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod sink;
pub mod state;
