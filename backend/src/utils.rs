use crate::models::SortSignal;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

pub const TITLE_MAX_CHARS: usize = 80;
pub const CHANNEL_MAX_CHARS: usize = 30;
const ELLIPSIS: &str = "...";

/// Parse a provider RFC 3339 timestamp. Empty or malformed input yields `None`.
pub fn parse_published_at(date_str: &str) -> Option<DateTime<Utc>> {
    if date_str.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(date_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Provider counters arrive as decimal strings; anything unparsable counts as zero.
pub fn parse_counter(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0)
}

/// Cut a title to `max_chars` characters, ellipsis included. A string already within the
/// limit is returned unchanged, so truncating twice is the same as truncating once.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = title.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// 1234 -> "1.2K", 3_400_000 -> "3.4M".
pub fn format_compact_count(num: u64) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Descending comparison that treats NaN as equal instead of panicking.
pub fn compare_desc_float(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

pub fn compare_desc_int(a: u64, b: u64) -> Ordering {
    b.cmp(&a)
}

pub fn parse_sort_signal(sort: Option<&str>) -> Result<SortSignal, String> {
    match sort {
        None | Some("") => Ok(SortSignal::ViewPerDay),
        Some(s) => s.parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_provider_timestamps() {
        let expected = Utc.with_ymd_and_hms(2025, 9, 20, 8, 30, 0).unwrap();
        assert_eq!(parse_published_at("2025-09-20T08:30:00Z"), Some(expected));
        assert_eq!(parse_published_at("2025-09-20T16:30:00+08:00"), Some(expected));
        assert_eq!(parse_published_at(""), None);
        assert_eq!(parse_published_at("yesterday"), None);
    }

    #[test]
    fn malformed_counters_default_to_zero() {
        assert_eq!(parse_counter(Some("1520")), 1520);
        assert_eq!(parse_counter(Some("12k")), 0);
        assert_eq!(parse_counter(Some("-3")), 0);
        assert_eq!(parse_counter(None), 0);
    }

    #[test]
    fn title_truncation_is_stable() {
        let long: String = "台灣ETF".repeat(30);
        let once = truncate_title(&long, TITLE_MAX_CHARS);
        assert_eq!(once.chars().count(), TITLE_MAX_CHARS);
        assert!(once.ends_with("..."));
        assert_eq!(truncate_title(&once, TITLE_MAX_CHARS), once);

        let short = "0050 ETF 投資入門";
        assert_eq!(truncate_title(short, TITLE_MAX_CHARS), short);
    }

    #[test]
    fn channel_truncation_counts_characters_not_bytes() {
        let channel = "理財".repeat(20);
        let cut = truncate_chars(&channel, CHANNEL_MAX_CHARS);
        assert_eq!(cut.chars().count(), CHANNEL_MAX_CHARS);
        assert_eq!(truncate_chars(&cut, CHANNEL_MAX_CHARS), cut);
    }

    #[test]
    fn formats_compact_counts() {
        assert_eq!(format_compact_count(999), "999");
        assert_eq!(format_compact_count(1_234), "1.2K");
        assert_eq!(format_compact_count(3_400_000), "3.4M");
    }

    #[test]
    fn sort_signal_defaults_to_view_velocity() {
        assert_eq!(parse_sort_signal(None), Ok(SortSignal::ViewPerDay));
        assert_eq!(
            parse_sort_signal(Some("engagement_ratio")),
            Ok(SortSignal::EngagementRatio)
        );
        assert!(parse_sort_signal(Some("likes")).is_err());
    }
}
