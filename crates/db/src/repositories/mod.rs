//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod lead_repo;
pub mod subscriber_repo;

pub use lead_repo::LeadRepo;
pub use subscriber_repo::SubscriberRepo;
