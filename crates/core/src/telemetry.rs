//! Server-side derivation of behavioral and attribution metadata.
//!
//! The browser collects most telemetry; this module fills the gaps from what
//! the request itself carries: device/browser/OS classification from the
//! user-agent string, traffic-source classification from the referrer, and
//! the urgency tier derived from the timeline and budget selections.
//! Everything here is advisory and never gates submission success.

use std::fmt;

/// Coarse device class derived from the user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Tablet => "tablet",
            DeviceType::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traffic source classification for the referrer URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferrerSource {
    Direct,
    Search,
    Social,
    Referral,
}

impl ReferrerSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferrerSource::Direct => "direct",
            ReferrerSource::Search => "search",
            ReferrerSource::Social => "social",
            ReferrerSource::Referral => "referral",
        }
    }
}

impl fmt::Display for ReferrerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency tier from the timeline/budget decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::High => "high",
            Urgency::Medium => "medium",
            Urgency::Low => "low",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const SEARCH_HOSTS: &[&str] = &["google.", "bing.com", "yahoo.", "duckduckgo.com", "baidu.com"];
const SOCIAL_HOSTS: &[&str] = &[
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "x.com",
    "t.co",
    "linkedin.com",
    "youtube.com",
    "reddit.com",
];

/// Classify a device from the user-agent string.
pub fn classify_device(user_agent: &str) -> DeviceType {
    let ua = user_agent.to_lowercase();
    if ua.contains("ipad") || ua.contains("tablet") {
        DeviceType::Tablet
    } else if ua.contains("mobi") || ua.contains("android") || ua.contains("iphone") {
        DeviceType::Mobile
    } else {
        DeviceType::Desktop
    }
}

/// Best-effort browser name from the user-agent string.
///
/// Order matters: Edge and Opera embed "Chrome", Chrome embeds "Safari".
pub fn classify_browser(user_agent: &str) -> Option<&'static str> {
    if user_agent.contains("Edg/") {
        Some("Edge")
    } else if user_agent.contains("OPR/") || user_agent.contains("Opera") {
        Some("Opera")
    } else if user_agent.contains("Firefox/") {
        Some("Firefox")
    } else if user_agent.contains("Chrome/") {
        Some("Chrome")
    } else if user_agent.contains("Safari/") {
        Some("Safari")
    } else {
        None
    }
}

/// Best-effort operating system from the user-agent string.
pub fn classify_os(user_agent: &str) -> Option<&'static str> {
    if user_agent.contains("Windows") {
        Some("Windows")
    } else if user_agent.contains("iPhone") || user_agent.contains("iPad") {
        Some("iOS")
    } else if user_agent.contains("Mac OS X") {
        Some("macOS")
    } else if user_agent.contains("Android") {
        Some("Android")
    } else if user_agent.contains("Linux") {
        Some("Linux")
    } else {
        None
    }
}

/// Classify the referrer URL into direct/search/social/referral.
pub fn classify_referrer(referrer: Option<&str>) -> ReferrerSource {
    let Some(referrer) = referrer.filter(|r| !r.trim().is_empty()) else {
        return ReferrerSource::Direct;
    };
    let host = host_of(referrer).to_lowercase();

    if SEARCH_HOSTS.iter().any(|s| host.contains(s)) {
        ReferrerSource::Search
    } else if SOCIAL_HOSTS.iter().any(|s| host.contains(s)) {
        ReferrerSource::Social
    } else {
        ReferrerSource::Referral
    }
}

/// Extract the host portion of a URL without pulling in a URL parser.
fn host_of(url: &str) -> &str {
    let rest = url.split("://").nth(1).unwrap_or(url);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

/// Derive the urgency tier from the timeline and budget selections.
///
/// Decision table:
/// - `asap` timeline is always high.
/// - `1-3-months` is high with a top-two budget bucket, otherwise medium.
/// - `3-6-months` is medium.
/// - Longer or flexible timelines are low, lifted to medium by the top
///   budget bucket.
pub fn derive_urgency(timeline: Option<&str>, budget: Option<&str>) -> Urgency {
    let top_budget = matches!(budget, Some("over-20l") | Some("10l-20l"));

    match timeline {
        Some("asap") => Urgency::High,
        Some("1-3-months") => {
            if top_budget {
                Urgency::High
            } else {
                Urgency::Medium
            }
        }
        Some("3-6-months") => Urgency::Medium,
        _ => {
            if matches!(budget, Some("over-20l")) {
                Urgency::Medium
            } else {
                Urgency::Low
            }
        }
    }
}
