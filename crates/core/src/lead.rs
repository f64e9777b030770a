//! Lead submission payload types.
//!
//! [`ContactPayload`] is the raw, untrusted request body: every field is
//! optional and unknown fields are dropped during deserialization, so the
//! accepted field set is a whitelist by construction. A single
//! [`ContactPayload::sanitize`] pass walks the schema and produces a [`Lead`]
//! whose fields are already cleaned; absence of an optional field is a
//! type-level fact from there on.
//!
//! Wire names are camelCase to match the browser payloads.

use serde::{Deserialize, Serialize};

use crate::sanitize;
use crate::sanitize::MAX_PROJECT_DESCRIPTION_LENGTH;

/// Raw contact form body as received from the client.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
    pub project_description: Option<String>,
    pub company: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub custom_budget: Option<String>,

    /// Advisory behavioral/attribution signals collected in the browser.
    #[serde(flatten)]
    pub telemetry: Telemetry,
}

/// A sanitized lead submission, ready for validation and persistence.
///
/// Required fields are plain `String`s; a field that sanitized to empty is
/// caught by the validation layer, not here. Never mutated after acceptance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub project_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_budget: Option<String>,

    #[serde(flatten)]
    pub telemetry: Telemetry,
}

impl ContactPayload {
    /// Sanitize every recognized field per its semantic type.
    ///
    /// Optional text fields that clean to the empty string come out as
    /// `None`, matching the "absence is the only rejection signal" contract.
    pub fn sanitize(self) -> Lead {
        Lead {
            name: self.name.as_deref().map(sanitize::sanitize_name).unwrap_or_default(),
            email: self.email.as_deref().map(sanitize::sanitize_email).unwrap_or_default(),
            country_code: self
                .country_code
                .as_deref()
                .map(sanitize::sanitize_country_code)
                .unwrap_or_default(),
            phone: self.phone.as_deref().map(sanitize::sanitize_phone).unwrap_or_default(),
            project_description: self
                .project_description
                .as_deref()
                .map(|s| sanitize::sanitize_text(s, MAX_PROJECT_DESCRIPTION_LENGTH))
                .unwrap_or_default(),
            company: clean_opt(self.company, 255),
            budget: clean_opt(self.budget, 50),
            timeline: clean_opt(self.timeline, 50),
            // A custom budget is a bare number; digits only, like a phone.
            custom_budget: self
                .custom_budget
                .as_deref()
                .map(sanitize::sanitize_phone)
                .map(|s| s.chars().take(100).collect::<String>())
                .filter(|s: &String| !s.is_empty()),
            telemetry: self.telemetry.sanitize(),
        }
    }
}

/// Sanitize an optional short string, mapping empty results to `None`.
fn clean_opt(value: Option<String>, max_length: usize) -> Option<String> {
    value
        .map(|s| sanitize::sanitize_string(&s, max_length))
        .filter(|s| !s.is_empty())
}

/// Sanitize an optional list, mapping empty results to `None`.
fn clean_list(value: Option<Vec<String>>, max_length: usize) -> Option<Vec<String>> {
    value
        .map(|items| sanitize::sanitize_list(items, max_length))
        .filter(|items| !items.is_empty())
}

/// Behavioral and attribution signals attached to a submission.
///
/// Everything here is advisory metadata collected best-effort in the browser;
/// none of it gates submission success. The same type serves as the raw and
/// the sanitized representation: [`Telemetry::sanitize`] consumes the raw
/// values and returns the cleaned ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Telemetry {
    // Session / engagement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_on_page: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_fill_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_views: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_number: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_visits: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_abandonment_attempts: Option<f64>,

    // Device / browser
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mobile: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_tablet: Option<bool>,

    // Geography
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    // Marketing attribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gclid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fbclid: Option<String>,

    // Lead quality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_maker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_value: Option<f64>,

    // Project context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_existing_system: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_needs: Option<Vec<String>>,

    // Communication preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter_opt_in: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_updates_opt_in: Option<bool>,

    // Business context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain_points: Option<Vec<String>>,
}

impl Telemetry {
    /// Clean every telemetry field per its semantic type and range.
    pub fn sanitize(self) -> Telemetry {
        Telemetry {
            session_id: clean_opt(self.session_id, 255),
            session_start_time: clean_opt(self.session_start_time, 50),
            time_on_page: self.time_on_page.map(|v| sanitize::floor_f64(v, 0.0)),
            form_fill_duration: self.form_fill_duration.map(|v| sanitize::floor_f64(v, 0.0)),
            scroll_depth: self.scroll_depth.map(|v| sanitize::clamp_f64(v, 0.0, 100.0)),
            page_views: self.page_views.map(|v| sanitize::floor_f64(v, 1.0)),
            visit_number: self.visit_number.map(|v| sanitize::floor_f64(v, 1.0)),
            previous_visits: self.previous_visits.map(|v| sanitize::floor_f64(v, 0.0)),
            form_abandonment_attempts: self
                .form_abandonment_attempts
                .map(|v| sanitize::floor_f64(v, 0.0)),

            device_type: clean_opt(self.device_type, 50),
            screen_resolution: clean_opt(self.screen_resolution, 50),
            browser_name: clean_opt(self.browser_name, 100),
            browser_version: clean_opt(self.browser_version, 50),
            operating_system: clean_opt(self.operating_system, 100),
            language: clean_opt(self.language, 10),
            is_mobile: self.is_mobile,
            is_tablet: self.is_tablet,

            country: clean_opt(self.country, 100),
            region: clean_opt(self.region, 100),
            city: clean_opt(self.city, 100),
            timezone: clean_opt(self.timezone, 50),
            currency: clean_opt(self.currency, 10),

            landing_page: clean_opt(self.landing_page, 500),
            entry_point: clean_opt(self.entry_point, 50),
            campaign_id: clean_opt(self.campaign_id, 100),
            ad_group: clean_opt(self.ad_group, 255),
            keyword: clean_opt(self.keyword, 255),
            gclid: clean_opt(self.gclid, 255),
            fbclid: clean_opt(self.fbclid, 255),

            project_type: clean_opt(self.project_type, 100),
            industry: clean_opt(self.industry, 100),
            company_size: clean_opt(self.company_size, 50),
            decision_maker: self.decision_maker,
            urgency: clean_opt(self.urgency, 20),
            estimated_value: self.estimated_value.map(|v| sanitize::floor_f64(v, 0.0)),

            project_category: clean_opt(self.project_category, 100),
            tech_stack: clean_list(self.tech_stack, 100),
            team_size: self.team_size.map(|v| sanitize::floor_f64(v, 1.0)),
            has_existing_system: self.has_existing_system,
            integration_requirements: clean_list(self.integration_requirements, 255),
            compliance_needs: clean_list(self.compliance_needs, 255),

            preferred_contact_method: clean_opt(self.preferred_contact_method, 50),
            preferred_contact_time: clean_opt(self.preferred_contact_time, 50),
            communication_language: clean_opt(self.communication_language, 10),
            newsletter_opt_in: self.newsletter_opt_in,
            project_updates_opt_in: self.project_updates_opt_in,

            business_stage: clean_opt(self.business_stage, 50),
            funding_stage: clean_opt(self.funding_stage, 50),
            annual_revenue: clean_opt(self.annual_revenue, 100),
            competitors: clean_list(self.competitors, 255),
            pain_points: clean_list(self.pain_points, 255),
        }
    }
}

/// Request-derived attribution attached to a submission by the server.
///
/// Populated from headers and query parameters, never trusted from the body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_from_json(value: serde_json::Value) -> ContactPayload {
        serde_json::from_value(value).expect("payload should deserialize")
    }

    #[test]
    fn sanitize_cleans_required_fields() {
        let payload = payload_from_json(serde_json::json!({
            "name": "  Jo!  ",
            "email": "Jo@X.Com",
            "countryCode": "+91",
            "phone": "0098765 43210",
            "projectDescription": "Need a platform for my startup",
        }));

        let lead = payload.sanitize();
        assert_eq!(lead.name, "Jo");
        assert_eq!(lead.email, "jo@x.com");
        assert_eq!(lead.country_code, "91");
        assert_eq!(lead.phone, "9876543210");
        assert_eq!(lead.project_description, "Need a platform for my startup");
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let payload = payload_from_json(serde_json::json!({
            "name": "Jo",
            "dropTable": "users; --",
        }));
        // Deserialization succeeds and the unknown field leaves no trace.
        let lead = payload.sanitize();
        assert_eq!(lead.name, "Jo");
    }

    #[test]
    fn optional_fields_that_clean_to_empty_become_none() {
        let payload = payload_from_json(serde_json::json!({
            "company": "   ",
            "budget": "\u{0000}\u{0001}",
        }));
        let lead = payload.sanitize();
        assert_eq!(lead.company, None);
        assert_eq!(lead.budget, None);
    }

    #[test]
    fn custom_budget_keeps_digits_only() {
        let payload = payload_from_json(serde_json::json!({
            "customBudget": "₹3,50,000",
        }));
        let lead = payload.sanitize();
        assert_eq!(lead.custom_budget.as_deref(), Some("350000"));
    }

    #[test]
    fn telemetry_numbers_are_clamped() {
        let payload = payload_from_json(serde_json::json!({
            "scrollDepth": 250.0,
            "timeOnPage": -10.0,
            "pageViews": 0.0,
        }));
        let lead = payload.sanitize();
        assert_eq!(lead.telemetry.scroll_depth, Some(100.0));
        assert_eq!(lead.telemetry.time_on_page, Some(0.0));
        assert_eq!(lead.telemetry.page_views, Some(1.0));
    }

    #[test]
    fn telemetry_lists_drop_empty_entries() {
        let payload = payload_from_json(serde_json::json!({
            "techStack": ["rust", "   ", "postgres"],
            "painPoints": ["  "],
        }));
        let lead = payload.sanitize();
        assert_eq!(
            lead.telemetry.tech_stack,
            Some(vec!["rust".to_string(), "postgres".to_string()])
        );
        assert_eq!(lead.telemetry.pain_points, None);
    }

    #[test]
    fn booleans_pass_through_only_when_boolean() {
        let payload = payload_from_json(serde_json::json!({
            "isMobile": true,
        }));
        let lead = payload.sanitize();
        assert_eq!(lead.telemetry.is_mobile, Some(true));

        // A non-boolean value fails deserialization for that field shape,
        // which the API layer maps to a generic 400.
        let result: Result<ContactPayload, _> = serde_json::from_value(serde_json::json!({
            "isMobile": "yes",
        }));
        assert!(result.is_err());
    }
}
