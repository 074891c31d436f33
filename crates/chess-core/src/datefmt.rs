//! Token-pattern date/time formatting (`yyyy-MM-dd`, `hh:mm a`, ...).
//!
//! Recognized tokens: `yyyy MM dd HH hh mm ss a`. Anything else is copied through
//! verbatim. Matching is a single left-to-right pass, longest token first.

use chrono::{DateTime, Datelike, FixedOffset, Offset, TimeZone, Timelike, Utc};

pub const DEFAULT_PATTERN: &str = "yyyy-MM-dd HH:mm";
pub const DEFAULT_DATE_PATTERN: &str = "yyyy-MM-dd";
pub const DEFAULT_TIME_PATTERN: &str = "hh:mm";

const TOKENS: &[&str] = &["yyyy", "MM", "dd", "HH", "hh", "mm", "ss", "a"];

/// Render `dt` using `pattern`, falling back to [`DEFAULT_PATTERN`] when absent or empty.
pub fn format_pattern<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: Option<&str>) -> String {
    let pattern = pattern.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_PATTERN);
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while let Some(ch) = rest.chars().next() {
        match TOKENS.iter().find(|tok| rest.starts_with(*tok)) {
            Some(tok) => {
                out.push_str(&render_token(dt, tok));
                rest = &rest[tok.len()..];
            }
            None => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    out
}

fn render_token<Tz: TimeZone>(dt: &DateTime<Tz>, token: &str) -> String {
    match token {
        "yyyy" => format!("{:04}", dt.year()),
        "MM" => format!("{:02}", dt.month()),
        "dd" => format!("{:02}", dt.day()),
        "HH" => format!("{:02}", dt.hour()),
        "hh" => {
            let h = dt.hour() % 12;
            format!("{:02}", if h == 0 { 12 } else { h })
        }
        "mm" => format!("{:02}", dt.minute()),
        "ss" => format!("{:02}", dt.second()),
        "a" => (if dt.hour() < 12 { "AM" } else { "PM" }).to_string(),
        other => other.to_string(),
    }
}

/// Epoch seconds to a zoned instant. `None` for absent or out-of-range timestamps.
pub fn instant(epoch_secs: Option<i64>, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    let utc = DateTime::from_timestamp(epoch_secs?, 0)?;
    Some(utc.with_timezone(offset))
}

pub fn format_date(epoch_secs: Option<i64>, pattern: Option<&str>, offset: &FixedOffset) -> String {
    let pattern = pattern.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_DATE_PATTERN);
    instant(epoch_secs, offset)
        .map(|dt| format_pattern(&dt, Some(pattern)))
        .unwrap_or_default()
}

pub fn format_time(epoch_secs: Option<i64>, pattern: Option<&str>, offset: &FixedOffset) -> String {
    let pattern = pattern.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_TIME_PATTERN);
    instant(epoch_secs, offset)
        .map(|dt| format_pattern(&dt, Some(pattern)))
        .unwrap_or_default()
}

/// Date and time joined by a single space; either half is omitted when it renders empty.
pub fn format_timestamp(
    epoch_secs: Option<i64>,
    date_pattern: Option<&str>,
    time_pattern: Option<&str>,
    offset: &FixedOffset,
) -> String {
    let date = format_date(epoch_secs, date_pattern, offset);
    let time = format_time(epoch_secs, time_pattern, offset);
    match (date.is_empty(), time.is_empty()) {
        (false, false) => format!("{date} {time}"),
        (false, true) => date,
        (true, false) => time,
        (true, true) => String::new(),
    }
}

/// User-chosen date and time patterns plus the zone they render in.
#[derive(Debug, Clone)]
pub struct Formats {
    pub date: String,
    pub time: String,
    pub offset: FixedOffset,
}

impl Default for Formats {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_PATTERN.to_string(),
            time: DEFAULT_TIME_PATTERN.to_string(),
            offset: utc(),
        }
    }
}

impl Formats {
    pub fn date(&self, epoch_secs: Option<i64>) -> String {
        format_date(epoch_secs, Some(&self.date), &self.offset)
    }

    pub fn time(&self, epoch_secs: Option<i64>) -> String {
        format_time(epoch_secs, Some(&self.time), &self.offset)
    }

    pub fn timestamp(&self, epoch_secs: Option<i64>) -> String {
        format_timestamp(epoch_secs, Some(&self.date), Some(&self.time), &self.offset)
    }
}

/// Offset from UTC in minutes, clamped to UTC when out of range.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(utc)
}

fn utc() -> FixedOffset {
    Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-05 14:07:09 UTC
    const TS: i64 = 1_709_647_629;

    fn at(ts: i64) -> DateTime<FixedOffset> {
        instant(Some(ts), &utc()).unwrap()
    }

    #[test]
    fn test_all_tokens() {
        let dt = at(TS);
        assert_eq!(format_pattern(&dt, Some("yyyy-MM-dd HH:mm:ss")), "2024-03-05 14:07:09");
        assert_eq!(format_pattern(&dt, Some("hh:mm a")), "02:07 PM");
        assert_eq!(format_pattern(&dt, None), "2024-03-05 14:07");
        assert_eq!(format_pattern(&dt, Some("")), "2024-03-05 14:07");
    }

    #[test]
    fn test_unknown_text_passes_through() {
        let dt = at(TS);
        assert_eq!(format_pattern(&dt, Some("dd/MM @ HH")), "05/03 @ 14");
        assert_eq!(format_pattern(&dt, Some("yyy")), "yyy");
        assert_eq!(format_pattern(&dt, Some("M/d")), "M/d");
    }

    #[test]
    fn test_twelve_hour_clock_never_renders_zero() {
        // 00:30 UTC
        let midnight = at(1_709_596_800 + 30 * 60);
        assert_eq!(format_pattern(&midnight, Some("hh:mm a")), "12:30 AM");
        // 12:00 UTC
        let noon = at(1_709_596_800 + 12 * 3600);
        assert_eq!(format_pattern(&noon, Some("hh a")), "12 PM");
    }

    #[test]
    fn test_formatting_is_repeatable() {
        let dt = at(TS);
        let p = Some("yyyy.MM.dd hh:mm:ss a");
        assert_eq!(format_pattern(&dt, p), format_pattern(&dt, p));
    }

    #[test]
    fn test_offset_applies() {
        let offset = offset_from_minutes(-5 * 60);
        assert_eq!(format_time(Some(TS), Some("HH:mm"), &offset), "09:07");
        assert_eq!(offset_from_minutes(100_000), utc());
    }

    #[test]
    fn test_date_and_time_defaults() {
        let offset = utc();
        assert_eq!(format_date(Some(TS), None, &offset), "2024-03-05");
        assert_eq!(format_time(Some(TS), None, &offset), "02:07");
    }

    #[test]
    fn test_timestamp_joins_and_omits_empty() {
        let f = Formats::default();
        assert_eq!(f.timestamp(Some(TS)), "2024-03-05 02:07");
        assert_eq!(f.timestamp(None), "");
        assert_eq!(f.date(None), "");
    }

    #[test]
    fn test_invalid_timestamp_is_empty() {
        let f = Formats::default();
        assert_eq!(f.date(Some(i64::MAX)), "");
        assert_eq!(f.timestamp(Some(i64::MIN)), "");
    }
}
