//! Field normalization: raw HTML text fragments in, canonical values out.
//!
//! Every function here is total over arbitrary strings. The two sites
//! disagree on date formats, label decoration, and how completion is
//! signalled, so each normalizer degrades to the [`UNKNOWN`] sentinel
//! instead of failing the record.

use crate::models::{Status, UNKNOWN};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date formats observed across both sites' display text.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

/// Normalize a raw date string to ISO `YYYY-MM-DD`.
///
/// Accepts RFC 3339 timestamps (XenForo `datetime` attributes, WordPress
/// `article:*_time` meta tags), bare datetimes, ISO dates, and common
/// English display dates. Anything unparsable (including empty input)
/// yields [`UNKNOWN`]; this function never fails.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return UNKNOWN.to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.date().to_string();
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.to_string();
        }
    }
    UNKNOWN.to_string()
}

/// Extract the value of a `"<Label>: <value>"` line from a block of text.
///
/// Non-breaking spaces are collapsed to plain spaces and a trailing
/// asterisk (PokeHarbor footnote marker) is stripped. Returns [`UNKNOWN`]
/// when the label is absent or its value is empty.
pub fn extract_labeled_value(block: &str, label: &str) -> String {
    let needle = format!("{label}:");
    match block.split_once(&needle) {
        Some((_, rest)) => {
            let value = rest.replace('\u{a0}', " ");
            let value = value.trim().trim_end_matches('*').trim();
            if value.is_empty() {
                UNKNOWN.to_string()
            } else {
                value.to_string()
            }
        }
        None => UNKNOWN.to_string(),
    }
}

/// Classify completion status from up to three signals, in priority order:
///
/// 1. explicit status text, when present ("complete" → Completed,
///    "demo" → Demo, anything else → Unknown — and the cascade stops);
/// 2. a structural completion badge on the page;
/// 3. a version string containing "demo";
/// 4. otherwise Unknown.
///
/// The cascade exists because neither site formats entries consistently;
/// degrading to `Unknown` beats a hard parse failure.
pub fn classify_status(explicit: &str, version: &str, completed_badge: bool) -> Status {
    let explicit = explicit.trim();
    if !explicit.is_empty() && explicit != UNKNOWN {
        let lower = explicit.to_lowercase();
        if lower.contains("demo") {
            return Status::Demo;
        }
        if lower.contains("complete") {
            return Status::Completed;
        }
        return Status::Unknown;
    }
    if completed_badge {
        return Status::Completed;
    }
    if version.to_lowercase().contains("demo") {
        return Status::Demo;
    }
    Status::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date_rfc3339() {
        assert_eq!(normalize_date("2024-06-05T14:30:00+00:00"), "2024-06-05");
        assert_eq!(normalize_date("2023-11-02T09:00:00-05:00"), "2023-11-02");
    }

    #[test]
    fn test_normalize_date_bare_datetime() {
        assert_eq!(normalize_date("2024-06-05T14:30:00"), "2024-06-05");
    }

    #[test]
    fn test_normalize_date_display_formats() {
        assert_eq!(normalize_date("June 5, 2024"), "2024-06-05");
        assert_eq!(normalize_date("Jun 5, 2024"), "2024-06-05");
        assert_eq!(normalize_date("5 June 2024"), "2024-06-05");
        assert_eq!(normalize_date("06/05/2024"), "2024-06-05");
        assert_eq!(normalize_date("  2024-06-05  "), "2024-06-05");
    }

    #[test]
    fn test_normalize_date_is_total() {
        // Garbage in, sentinel out. Never a panic.
        for raw in ["", "soon(tm)", "v1.2.3", "13/45/9999", "yesterday", "???"] {
            assert_eq!(normalize_date(raw), UNKNOWN, "input: {raw:?}");
        }
    }

    #[test]
    fn test_extract_labeled_value_basic() {
        assert_eq!(
            extract_labeled_value("Version: 2.1.0", "Version"),
            "2.1.0"
        );
    }

    #[test]
    fn test_extract_labeled_value_collapses_nbsp_and_asterisk() {
        let block = "Status:\u{a0}Completed\u{a0}*";
        assert_eq!(extract_labeled_value(block, "Status"), "Completed");
    }

    #[test]
    fn test_extract_labeled_value_missing_label() {
        assert_eq!(extract_labeled_value("Author: someone", "Version"), UNKNOWN);
        assert_eq!(extract_labeled_value("Version: ", "Version"), UNKNOWN);
    }

    #[test]
    fn test_classify_status_explicit_text_wins() {
        // Explicit "Demo" beats a completion badge.
        assert_eq!(classify_status("Demo", "v1.0", true), Status::Demo);
        assert_eq!(classify_status("Completed", UNKNOWN, false), Status::Completed);
        // Unrecognized explicit text still ends the cascade.
        assert_eq!(classify_status("In Development", "demo build", true), Status::Unknown);
    }

    #[test]
    fn test_classify_status_badge_beats_version() {
        assert_eq!(classify_status(UNKNOWN, "Demo 0.3", true), Status::Completed);
        assert_eq!(classify_status("", "Demo 0.3", true), Status::Completed);
    }

    #[test]
    fn test_classify_status_version_demo_substring() {
        assert_eq!(classify_status(UNKNOWN, "DEMO v0.2", false), Status::Demo);
    }

    #[test]
    fn test_classify_status_fallback_unknown() {
        assert_eq!(classify_status(UNKNOWN, "v1.4", false), Status::Unknown);
        assert_eq!(classify_status("", UNKNOWN, false), Status::Unknown);
    }
}
