//! HTTP handlers.

pub mod careers;
pub mod contact;
pub mod health;
