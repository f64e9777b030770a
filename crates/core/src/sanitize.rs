//! Field-level sanitization for untrusted form input.
//!
//! Each function cleans one semantic type (free text, name, email, phone,
//! country code). These run before validation: their job is normalization
//! and stripping, not acceptance. An email that fails the format check
//! sanitizes to the empty string and the validation layer reports it.
//!
//! Control characters (0x00-0x08, 0x0B-0x0C, 0x0E-0x1F, 0x7F) are always
//! removed; tabs, newlines, and carriage returns survive in free text.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length for the long-form project description (characters).
pub const MAX_PROJECT_DESCRIPTION_LENGTH: usize = 5_000;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// `<script>...</script>` and `<iframe>...</iframe>` pairs, case-insensitive.
/// Best-effort tag removal, not a full HTML sanitizer.
static SCRIPT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex")
});
static IFRAME_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe\s*>").expect("valid regex")
});

/// True for the control characters we strip from every text field.
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}')
}

/// Truncate to at most `max` characters (not bytes).
fn truncate_chars(s: String, max: usize) -> String {
    if s.chars().count() <= max {
        s
    } else {
        s.chars().take(max).collect()
    }
}

/// Sanitize a generic short string: trim, strip control characters, cap length.
pub fn sanitize_string(input: &str, max_length: usize) -> String {
    let cleaned: String = input.trim().chars().filter(|c| !is_stripped_control(*c)).collect();
    truncate_chars(cleaned, max_length)
}

/// Sanitize long-form text: like [`sanitize_string`], plus removal of
/// `<script>` and `<iframe>` tag pairs.
pub fn sanitize_text(input: &str, max_length: usize) -> String {
    let cleaned: String = input.trim().chars().filter(|c| !is_stripped_control(*c)).collect();
    let cleaned = SCRIPT_TAG_RE.replace_all(&cleaned, "").into_owned();
    let cleaned = IFRAME_TAG_RE.replace_all(&cleaned, "").into_owned();
    truncate_chars(cleaned, max_length)
}

/// Sanitize a person name: keep letters, spaces, hyphens, and apostrophes;
/// collapse runs of whitespace to a single space.
///
/// Idempotent: sanitizing an already-sanitized name yields the same string.
pub fn sanitize_name(input: &str) -> String {
    let filtered: String = input
        .trim()
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace() || *c == '-' || *c == '\'')
        .collect();

    let mut out = String::with_capacity(filtered.len());
    let mut prev_space = false;
    for c in filtered.chars() {
        if c.is_whitespace() {
            if !prev_space && !out.is_empty() {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out.trim_end().to_string()
}

/// Sanitize an email address: trim, lower-case, check the basic
/// `local@domain.tld` shape, then strip angle brackets and quotes.
///
/// Returns an empty string when the shape check fails; the validation layer
/// turns that into a per-field error.
pub fn sanitize_email(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    if !EMAIL_RE.is_match(&lowered) {
        return String::new();
    }
    lowered.chars().filter(|c| !matches!(*c, '<' | '>' | '"' | '\'')).collect()
}

/// Sanitize a phone number: digits only, leading zeros removed.
pub fn sanitize_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    digits.trim_start_matches('0').to_string()
}

/// Sanitize a country calling code: digits only, at most 4.
pub fn sanitize_country_code(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    truncate_chars(digits, 4)
}

/// Sanitize a list of free-text entries: keep string entries, clean each as a
/// generic string with `max_length`, and drop entries that clean to empty.
pub fn sanitize_list(items: Vec<String>, max_length: usize) -> Vec<String> {
    items
        .into_iter()
        .map(|item| sanitize_string(&item, max_length))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Clamp a numeric telemetry field to `[min, max]`.
pub fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    value.clamp(min, max)
}

/// Floor a numeric telemetry field at `min`.
pub fn floor_f64(value: f64, min: f64) -> f64 {
    value.max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_strips_control_characters() {
        let input = "hello\u{00}\u{07} world\u{7F}";
        assert_eq!(sanitize_string(input, 100), "hello world");
    }

    #[test]
    fn string_keeps_newlines_and_tabs() {
        assert_eq!(sanitize_string("a\tb\nc", 100), "a\tb\nc");
    }

    #[test]
    fn string_respects_max_length() {
        assert_eq!(sanitize_string("abcdef", 3), "abc");
    }

    #[test]
    fn text_removes_script_tag_pairs() {
        let input = "<script>alert(1)</script> build me an app with lots of detail here";
        let out = sanitize_text(input, 5000);
        assert_eq!(out, " build me an app with lots of detail here");
        assert!(!out.contains("<script"));
    }

    #[test]
    fn text_removes_iframe_and_mixed_case_script() {
        let input = "before <IFRAME src='x'>inner</IFRAME> mid <ScRiPt>x</sCrIpT> after";
        let out = sanitize_text(input, 5000);
        assert!(!out.to_lowercase().contains("<iframe"));
        assert!(!out.to_lowercase().contains("<script"));
        assert!(out.contains("before"));
        assert!(out.contains("after"));
    }

    #[test]
    fn name_keeps_letters_spaces_hyphens_apostrophes() {
        assert_eq!(sanitize_name("Jean-Luc O'Neill"), "Jean-Luc O'Neill");
        assert_eq!(sanitize_name("R2-D2!"), "R-D");
    }

    #[test]
    fn name_collapses_repeated_spaces() {
        assert_eq!(sanitize_name("  Ada   Lovelace  "), "Ada Lovelace");
    }

    #[test]
    fn name_sanitization_is_idempotent() {
        let once = sanitize_name("  Marie-Claire   d'Aubigné!! ");
        let twice = sanitize_name(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn email_lowercases_and_accepts_valid() {
        assert_eq!(sanitize_email("  Jo@X.Com "), "jo@x.com");
    }

    #[test]
    fn email_without_tld_becomes_empty() {
        assert_eq!(sanitize_email("a@b"), "");
    }

    #[test]
    fn email_strips_angle_brackets_and_quotes() {
        // The shape check runs first, so the stripped characters can only
        // appear inside an otherwise valid address.
        assert_eq!(sanitize_email("jo<b>@x.com"), "job@x.com");
    }

    #[test]
    fn phone_strips_non_digits_and_leading_zeros() {
        assert_eq!(sanitize_phone("00 (98) 765-43210"), "9876543210");
    }

    #[test]
    fn country_code_caps_at_four_digits() {
        assert_eq!(sanitize_country_code("+001234"), "0012");
        assert_eq!(sanitize_country_code("+91"), "91");
    }

    #[test]
    fn list_drops_entries_that_clean_to_empty() {
        let items = vec!["rust".to_string(), "  \u{00}  ".to_string(), "go".to_string()];
        assert_eq!(sanitize_list(items, 100), vec!["rust", "go"]);
    }

    #[test]
    fn numeric_helpers_clamp_and_floor() {
        assert_eq!(clamp_f64(150.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp_f64(-3.0, 0.0, 100.0), 0.0);
        assert_eq!(floor_f64(-5.0, 0.0), 0.0);
        assert_eq!(floor_f64(0.5, 1.0), 1.0);
    }
}
