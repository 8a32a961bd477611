// File: stampbot-core/src/render/moment.rs

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use stampbot_common::models::chat::SendDate;
use stampbot_common::traits::render_traits::DateFormatter;
use crate::render::send_date::parse_send_date;
use crate::render::zone::Zone;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

/// Longest tokens first so `YYYY` wins over `YY` and `Do` over `D`.
const TOKENS: &[&str] = &[
    "LLLL", "llll", "YYYY", "MMMM", "DDDD", "DDDo", "dddd",
    "LLL", "lll", "LTS", "MMM", "DDD", "ddd", "SSS",
    "LL", "ll", "LT", "YY", "MM", "Mo", "Do", "DD", "do", "dd", "HH", "hh", "kk", "mm", "ss", "SS",
    "ZZ", "Qo", "wo", "ww", "Wo", "WW",
    "L", "l", "Y", "M", "D", "d", "E", "H", "h", "k", "m", "s", "S", "A", "a", "Z", "X", "x", "Q", "w", "W",
];

/// `en` long date formats.
fn locale_pattern(token: &str) -> Option<&'static str> {
    Some(match token {
        "LT" => "h:mm A",
        "LTS" => "h:mm:ss A",
        "L" => "MM/DD/YYYY",
        "LL" => "MMMM D, YYYY",
        "LLL" => "MMMM D, YYYY h:mm A",
        "LLLL" => "dddd, MMMM D, YYYY h:mm A",
        "l" => "M/D/YYYY",
        "ll" => "MMM D, YYYY",
        "lll" => "MMM D, YYYY h:mm A",
        "llll" => "ddd, MMM D, YYYY h:mm A",
        _ => return None,
    })
}

/// `DateFormatter` speaking moment-style patterns (`YYYY-MM-DD HH:mm:ss`).
#[derive(Debug, Clone, Default)]
pub struct MomentFormatter {
    zone: Zone,
}

impl MomentFormatter {
    /// Formatter in the machine's local zone.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(zone: Zone) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }
}

impl DateFormatter for MomentFormatter {
    fn parse(&self, raw: &SendDate) -> Option<DateTime<FixedOffset>> {
        parse_send_date(raw, &self.zone)
    }

    fn format(&self, time: &DateTime<FixedOffset>, pattern: &str) -> String {
        format_moment(time, pattern)
    }
}

/// Render `time` with a moment-style pattern. `[...]` is copied literally and
/// any character that does not start a token is copied as is.
pub fn format_moment(time: &DateTime<FixedOffset>, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        match TOKENS.iter().find(|t| rest.starts_with(**t)) {
            Some(token) => {
                out.push_str(&expand(time, token));
                rest = &rest[token.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

fn expand(time: &DateTime<FixedOffset>, token: &str) -> String {
    if let Some(pattern) = locale_pattern(token) {
        return format_moment(time, pattern);
    }

    let millis = (time.nanosecond() / 1_000_000).min(999);
    let weekday = time.weekday().num_days_from_sunday() as usize;
    let month0 = time.month0() as usize;

    match token {
        "YYYY" => format!("{:04}", time.year()),
        "YY" => format!("{:02}", time.year().rem_euclid(100)),
        "Y" => time.year().to_string(),
        "M" => time.month().to_string(),
        "MM" => format!("{:02}", time.month()),
        "Mo" => ordinal(time.month()),
        "MMM" => MONTH_NAMES[month0][..3].to_string(),
        "MMMM" => MONTH_NAMES[month0].to_string(),
        "D" => time.day().to_string(),
        "DD" => format!("{:02}", time.day()),
        "Do" => ordinal(time.day()),
        "DDD" => time.ordinal().to_string(),
        "DDDD" => format!("{:03}", time.ordinal()),
        "DDDo" => ordinal(time.ordinal()),
        "d" => weekday.to_string(),
        "do" => ordinal(weekday as u32),
        "dd" => WEEKDAY_NAMES[weekday][..2].to_string(),
        "ddd" => WEEKDAY_NAMES[weekday][..3].to_string(),
        "dddd" => WEEKDAY_NAMES[weekday].to_string(),
        "E" => time.weekday().number_from_monday().to_string(),
        "H" => time.hour().to_string(),
        "HH" => format!("{:02}", time.hour()),
        "h" => time.hour12().1.to_string(),
        "hh" => format!("{:02}", time.hour12().1),
        "k" => kk_hour(time.hour()).to_string(),
        "kk" => format!("{:02}", kk_hour(time.hour())),
        "m" => time.minute().to_string(),
        "mm" => format!("{:02}", time.minute()),
        "s" => time.second().to_string(),
        "ss" => format!("{:02}", time.second()),
        "S" => (millis / 100).to_string(),
        "SS" => format!("{:02}", millis / 10),
        "SSS" => format!("{:03}", millis),
        "A" => (if time.hour12().0 { "PM" } else { "AM" }).to_string(),
        "a" => (if time.hour12().0 { "pm" } else { "am" }).to_string(),
        "Z" => offset_string(time.offset(), true),
        "ZZ" => offset_string(time.offset(), false),
        "X" => time.timestamp().to_string(),
        "x" => time.timestamp_millis().to_string(),
        "Q" => (month0 / 3 + 1).to_string(),
        "Qo" => ordinal(month0 as u32 / 3 + 1),
        // Locale weeks follow the `en` defaults: weeks start on Sunday and the
        // week holding January 1st is week 1.
        "w" => week_of_year(time.date_naive(), 0, 6).to_string(),
        "ww" => format!("{:02}", week_of_year(time.date_naive(), 0, 6)),
        "wo" => ordinal(week_of_year(time.date_naive(), 0, 6) as u32),
        "W" => week_of_year(time.date_naive(), 1, 4).to_string(),
        "WW" => format!("{:02}", week_of_year(time.date_naive(), 1, 4)),
        "Wo" => ordinal(week_of_year(time.date_naive(), 1, 4) as u32),
        other => other.to_string(),
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn kk_hour(hour: u32) -> u32 {
    if hour == 0 { 24 } else { hour }
}

fn offset_string(offset: &FixedOffset, colon: bool) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let abs = secs.abs();
    let (h, m) = (abs / 3600, (abs % 3600) / 60);
    if colon {
        format!("{}{:02}:{:02}", sign, h, m)
    } else {
        format!("{}{:02}{:02}", sign, h, m)
    }
}

/// Days to subtract from January 1st to reach the start of week 1.
/// `dow` is the first day of the week (0 = Sunday), `doy` picks which
/// January day must fall in week 1 (`7 + dow - doy`).
fn first_week_offset(year: i32, dow: i64, doy: i64) -> i64 {
    let fwd = 7 + dow - doy;
    let fwd_weekday = NaiveDate::from_ymd_opt(year, 1, fwd as u32)
        .map(|d| d.weekday().num_days_from_sunday() as i64)
        .unwrap_or(0);
    let fwdlw = (7 + fwd_weekday - dow) % 7;
    -fwdlw + fwd - 1
}

fn weeks_in_year(year: i32, dow: i64, doy: i64) -> i64 {
    let days = if NaiveDate::from_ymd_opt(year, 2, 29).is_some() { 366 } else { 365 };
    (days - first_week_offset(year, dow, doy) + first_week_offset(year + 1, dow, doy)) / 7
}

fn week_of_year(date: NaiveDate, dow: i64, doy: i64) -> i64 {
    let year = date.year();
    let offset = first_week_offset(year, dow, doy);
    let week = (date.ordinal() as i64 - offset - 1).div_euclid(7) + 1;

    if week < 1 {
        week + weeks_in_year(year - 1, dow, doy)
    } else if week > weeks_in_year(year, dow, doy) {
        week - weeks_in_year(year, dow, doy)
    } else {
        week
    }
}
