//! Date normalization.
//!
//! Schedule dates arrive from the server in whatever shape the backend
//! happened to store them: plain dates, UTC timestamps, naive timestamps.
//! Everything is reduced to a canonical `YYYY-MM-DD` date before it is used
//! as a key against calendar cells.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::{PetcareError, PetcareResult};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const OTHER_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y"];

/// Timezone used to turn instants into calendar dates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DisplayZone {
    /// The machine's local timezone.
    #[default]
    Local,
    Named(Tz),
}

impl DisplayZone {
    /// Parse an IANA timezone name. `None` means the local timezone.
    pub fn from_name(name: Option<&str>) -> PetcareResult<Self> {
        match name {
            None => Ok(DisplayZone::Local),
            Some(name) => name
                .parse::<Tz>()
                .map(DisplayZone::Named)
                .map_err(|_| PetcareError::Config(format!("Unknown timezone '{}'", name))),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    /// Calendar date of an instant as seen in this zone.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).date_naive(),
            DisplayZone::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }
}

/// Parse any supported date representation into a calendar date.
///
/// Plain dates are taken as written and never pass through a timezone, so a
/// canonical string always maps back to itself. Timestamps carrying an offset
/// are converted into `zone` first.
pub fn parse_date(input: &str, zone: DisplayZone) -> PetcareResult<NaiveDate> {
    let s = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, ISO_DATE_FORMAT) {
        return Ok(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(zone.date_of(dt.with_timezone(&Utc)));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(zone.date_of(dt.with_timezone(&Utc)));
        }
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    for fmt in OTHER_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(PetcareError::InvalidDate(input.to_string()))
}

/// Normalize a date string to `YYYY-MM-DD` using `zone` for timestamps.
pub fn normalize_date_in(input: &str, zone: DisplayZone) -> PetcareResult<String> {
    parse_date(input, zone).map(to_iso)
}

/// Normalize a date string to `YYYY-MM-DD` in the local timezone.
pub fn normalize_date(input: &str) -> PetcareResult<String> {
    normalize_date_in(input, DisplayZone::Local)
}

pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
