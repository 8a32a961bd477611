// File: stampbot-core/src/render/send_date.rs
//
// Reads the handful of shapes `send_date` has been stored in.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use stampbot_common::models::chat::SendDate;
use crate::render::zone::Zone;

/// `2024-1-15@10h30m00s`, optionally followed by `123ms`.
static LEGACY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})@(\d{1,2})h(\d{1,2})m(\d{1,2})s(?:(\d{1,3})ms)?$").unwrap()
});

/// `January 15, 2024 10:30am`
static HUMAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-z]+)\s+(\d{1,2}),\s*(\d{4})\s+(\d{1,2}):(\d{2})\s*(am|pm)$").unwrap()
});

const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a raw `send_date`. Zone-less values are read as wall-clock time in `zone`.
pub fn parse_send_date(raw: &SendDate, zone: &Zone) -> Option<DateTime<FixedOffset>> {
    match raw {
        SendDate::Millis(ms) => from_millis(*ms, zone),
        SendDate::Text(text) => parse_text(text.trim(), zone),
        SendDate::Other(Value::Number(n)) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .and_then(|f| from_millis(f.trunc() as i64, zone)),
        SendDate::Other(_) => None,
    }
}

fn from_millis(ms: i64, zone: &Zone) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp_millis(ms).and_then(|utc| zone.from_utc(utc))
}

fn parse_text(text: &str, zone: &Zone) -> Option<DateTime<FixedOffset>> {
    if text.is_empty() {
        return None;
    }

    if is_integer(text) {
        return text.parse::<i64>().ok().and_then(|ms| from_millis(ms, zone));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return zone.from_utc(dt.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return zone.from_local(&naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return zone.from_local(&date.and_hms_opt(0, 0, 0)?);
    }

    if let Some(naive) = parse_legacy(text) {
        return zone.from_local(&naive);
    }

    if let Some(naive) = parse_human(text) {
        return zone.from_local(&naive);
    }

    None
}

fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_legacy(text: &str) -> Option<NaiveDateTime> {
    let caps = LEGACY_RE.captures(text)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = caps[1].parse::<i32>().ok()?;
    let millis = match caps.get(7) {
        Some(_) => num(7)?,
        None => 0,
    };

    NaiveDate::from_ymd_opt(year, num(2)?, num(3)?)?
        .and_hms_milli_opt(num(4)?, num(5)?, num(6)?, millis)
}

fn parse_human(text: &str) -> Option<NaiveDateTime> {
    let caps = HUMAN_RE.captures(text)?;

    let month = month_from_name(&caps[1])?;
    let day = caps[2].parse::<u32>().ok()?;
    let year = caps[3].parse::<i32>().ok()?;
    let hour12 = caps[4].parse::<u32>().ok()?;
    let minute = caps[5].parse::<u32>().ok()?;

    if !(1..=12).contains(&hour12) {
        return None;
    }
    let pm = caps[6].eq_ignore_ascii_case("pm");
    let hour = match (hour12, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

fn month_from_name(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january", "february", "march", "april", "may", "june",
        "july", "august", "september", "october", "november", "december",
    ];
    let lower = name.to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == lower || (lower.len() == 3 && m.starts_with(lower.as_str())))
        .map(|idx| idx as u32 + 1)
}
