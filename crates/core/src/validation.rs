//! Required-field and format validation at the server boundary.
//!
//! Mirrors the client-side rules, but this pass is authoritative: nothing
//! from the browser is trusted. Runs after sanitization, so inputs are
//! already normalized (emails lower-cased, phones digits-only, and so on).

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::lead::Lead;

/// Minimum length for a name after sanitization.
pub const MIN_NAME_LENGTH: usize = 2;
/// Minimum length for the project description.
pub const MIN_PROJECT_DESCRIPTION_LENGTH: usize = 20;
/// Phone numbers must have 7-15 digits (E.164 upper bound).
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s'-]+$").expect("valid regex"));
static COUNTRY_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,4}$").expect("valid regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,15}$").expect("valid regex"));

/// A single field-level validation failure, serialized into the 400 body.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// True when `email` has the basic `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate a sanitized lead against the required-field and format rules.
///
/// Returns an empty vec when the lead is submittable. All failures are
/// collected so the client can render every inline error in one round trip.
pub fn validate_lead(lead: &Lead) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if lead.name.is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    } else if lead.name.chars().count() < MIN_NAME_LENGTH || !NAME_RE.is_match(&lead.name) {
        errors.push(FieldError::new(
            "name",
            "Name must be at least 2 characters (letters, spaces, hyphens, apostrophes)",
        ));
    }

    if lead.email.is_empty() {
        errors.push(FieldError::new("email", "A valid email address is required"));
    } else if !is_valid_email(&lead.email) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }

    if lead.country_code.is_empty() {
        errors.push(FieldError::new("countryCode", "Country code is required"));
    } else if !COUNTRY_CODE_RE.is_match(&lead.country_code) {
        errors.push(FieldError::new("countryCode", "Country code must be 1-4 digits"));
    }

    if lead.phone.is_empty() {
        errors.push(FieldError::new("phone", "Phone number is required"));
    } else if !PHONE_RE.is_match(&lead.phone) {
        errors.push(FieldError::new("phone", "Phone number must be 7-15 digits"));
    }

    if lead.project_description.is_empty() {
        errors.push(FieldError::new(
            "projectDescription",
            "Project description is required",
        ));
    } else if lead.project_description.chars().count() < MIN_PROJECT_DESCRIPTION_LENGTH {
        errors.push(FieldError::new(
            "projectDescription",
            "Please provide more details (minimum 20 characters)",
        ));
    }

    errors
}

/// Validate a career subscription email. Same email rule as the lead form.
pub fn validate_subscription_email(email: &str) -> Vec<FieldError> {
    if email.is_empty() || !is_valid_email(email) {
        vec![FieldError::new("email", "A valid email address is required")]
    } else {
        Vec::new()
    }
}
