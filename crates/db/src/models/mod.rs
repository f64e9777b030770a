//! Row types for the intake tables.

pub mod career_subscriber;
pub mod lead;
