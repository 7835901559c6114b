//! Requested date normalization.
//!
//! Dialogflow's `@sys.date` slot arrives as a full ISO-8601 timestamp in the
//! agent's timezone. Only the calendar date matters; it is bucketed relative
//! to the time the request is handled.
//!
//! The day difference is `ceil((date at 00:00 UTC - now) / 24h)`. Close to
//! midnight this can land a request in the neighbouring bucket.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Sentinel `iso_date` for requests without a date
pub const DATE_NOW: &str = "now";

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Coarse relative-day classification of a requested date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    Now,
    Today,
    Tomorrow,
    DayAfterTomorrow,
    /// In the past or three or more days ahead
    Invalid,
}

impl DateBucket {
    /// Buckets offered as follow-up suggestions, in display order
    pub const SPOKEN: [DateBucket; 4] = [
        DateBucket::Now,
        DateBucket::Today,
        DateBucket::Tomorrow,
        DateBucket::DayAfterTomorrow,
    ];

    /// Spoken form of the bucket; `None` for dates without a relative word
    pub fn label(&self) -> Option<&'static str> {
        match self {
            DateBucket::Now => Some("now"),
            DateBucket::Today => Some("today"),
            DateBucket::Tomorrow => Some("tomorrow"),
            DateBucket::DayAfterTomorrow => Some("the day after tomorrow"),
            DateBucket::Invalid => None,
        }
    }

    fn from_day_difference(days: i64) -> Self {
        match days {
            0 => DateBucket::Today,
            1 => DateBucket::Tomorrow,
            2 => DateBucket::DayAfterTomorrow,
            _ => DateBucket::Invalid,
        }
    }
}

impl fmt::Display for DateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("invalid"))
    }
}

/// A requested date and its bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDate {
    /// `YYYY-MM-DD`, or [`DATE_NOW`] when no date was requested
    pub iso_date: String,
    pub bucket: DateBucket,
}

impl NormalizedDate {
    pub fn now() -> Self {
        Self {
            iso_date: DATE_NOW.to_string(),
            bucket: DateBucket::Now,
        }
    }
}

/// Normalize the raw `date` slot against the request time.
pub fn normalize_date(raw_date_param: Option<&str>, now: DateTime<Utc>) -> NormalizedDate {
    let Some(raw) = raw_date_param.map(str::trim).filter(|d| !d.is_empty()) else {
        return NormalizedDate::now();
    };

    let iso_date = raw.split('T').next().unwrap_or(raw).to_string();
    let bucket = match NaiveDate::parse_from_str(&iso_date, "%Y-%m-%d") {
        Ok(date) => DateBucket::from_day_difference(day_difference(date, now)),
        Err(_) => DateBucket::Invalid,
    };

    NormalizedDate { iso_date, bucket }
}

fn day_difference(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let target = date.and_time(chrono::NaiveTime::MIN).and_utc();
    let millis = (target - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}
