// File: stampbot-core/src/render/zone.rs

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use crate::Error;

/// Time zone used to display timestamps and to read zone-less dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Local,
    Named(Tz),
    Fixed(FixedOffset),
}

impl Default for Zone {
    fn default() -> Self {
        Zone::Local
    }
}

impl Zone {
    pub fn utc() -> Self {
        Zone::Named(Tz::UTC)
    }

    /// Accepts `local` or an IANA name like `Europe/Berlin`.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        if name.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }
        name.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| Error::Parse(format!("Invalid timezone: {}", name)))
    }

    /// Moves an instant into this zone. `None` when the wall-clock time would
    /// fall outside the range chrono can represent.
    pub fn from_utc(&self, utc: DateTime<Utc>) -> Option<DateTime<FixedOffset>> {
        let offset = match self {
            Zone::Local => utc.with_timezone(&Local).offset().fix(),
            Zone::Named(tz) => utc.with_timezone(tz).offset().fix(),
            Zone::Fixed(offset) => *offset,
        };
        utc.naive_utc().checked_add_offset(offset)?;
        Some(utc.with_timezone(&offset))
    }

    /// Interprets a wall-clock time in this zone. Ambiguous times resolve to
    /// the earlier instant; times skipped by a DST jump are `None`.
    pub fn from_local(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Zone::Local => Local.from_local_datetime(naive).earliest().map(|d| d.fixed_offset()),
            Zone::Named(tz) => tz.from_local_datetime(naive).earliest().map(|d| d.fixed_offset()),
            Zone::Fixed(offset) => offset.from_local_datetime(naive).single(),
        }
    }
}
