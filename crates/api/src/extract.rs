//! Request-derived metadata: client IP and attribution.

use std::collections::HashMap;

use axum::http::header::{REFERER, USER_AGENT};
use axum::http::HeaderMap;

use intake_core::lead::Attribution;
use intake_core::telemetry;

/// Fallback when no IP header is present (direct invocation, tests).
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Resolve the client IP from proxy headers.
///
/// `x-forwarded-for` may carry a chain; the first entry is the originating
/// client. Falls back to `x-real-ip`, then to [`UNKNOWN_CLIENT`].
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(real_ip) = header_str(headers, "x-real-ip") {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }
    UNKNOWN_CLIENT.to_string()
}

/// Build the server-derived attribution for a submission: IP, user agent,
/// referrer (raw and classified), and UTM parameters from the request query.
pub fn build_attribution(headers: &HeaderMap, query: &HashMap<String, String>) -> Attribution {
    let ip = client_ip(headers);
    let referrer_url = header_str(headers, REFERER.as_str()).map(str::to_string);
    let referrer_source = telemetry::classify_referrer(referrer_url.as_deref());

    Attribution {
        ip_address: (ip != UNKNOWN_CLIENT).then_some(ip),
        user_agent: header_str(headers, USER_AGENT.as_str()).map(str::to_string),
        referrer_url,
        referrer_source: Some(referrer_source.as_str().to_string()),
        utm_source: query.get("utm_source").cloned(),
        utm_medium: query.get("utm_medium").cloned(),
        utm_campaign: query.get("utm_campaign").cloned(),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn forwarded_for_takes_the_first_entry() {
        let map = headers(&[("x-forwarded-for", "203.0.113.9, 10.0.0.1")]);
        assert_eq!(client_ip(&map), "203.0.113.9");
    }

    #[test]
    fn real_ip_is_the_fallback() {
        let map = headers(&[("x-real-ip", "198.51.100.7")]);
        assert_eq!(client_ip(&map), "198.51.100.7");
    }

    #[test]
    fn missing_headers_yield_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), UNKNOWN_CLIENT);
    }

    #[test]
    fn attribution_classifies_the_referrer() {
        let map = headers(&[
            ("x-forwarded-for", "203.0.113.9"),
            ("user-agent", "curl/8.0"),
            ("referer", "https://www.google.com/search?q=agency"),
        ]);
        let mut query = HashMap::new();
        query.insert("utm_source".to_string(), "newsletter".to_string());

        let attribution = build_attribution(&map, &query);
        assert_eq!(attribution.ip_address.as_deref(), Some("203.0.113.9"));
        assert_eq!(attribution.referrer_source.as_deref(), Some("search"));
        assert_eq!(attribution.utm_source.as_deref(), Some("newsletter"));
        assert_eq!(attribution.utm_medium, None);
    }

    #[test]
    fn unknown_client_leaves_ip_unset() {
        let attribution = build_attribution(&HeaderMap::new(), &HashMap::new());
        assert_eq!(attribution.ip_address, None);
        assert_eq!(attribution.referrer_source.as_deref(), Some("direct"));
    }
}
