//! Weekday and time-of-day primitives shared by availability and bookings.
//!
//! Times are zero-padded 24h `"HH:MM"` strings. Because of the fixed width,
//! lexicographic order on the string equals chronological order, so windows
//! are compared as plain strings.

use chrono::{DateTime, Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("'{0}' is not a weekday name")]
    UnknownDay(String),

    #[error("'{0}' is not a zero-padded HH:MM time")]
    InvalidTime(String),

    #[error("window start {start} must be before end {end}")]
    EmptyWindow { start: String, end: String },

    #[error("'{0}' is not a valid date")]
    InvalidDate(String),
}

/// English weekday name, used as the availability map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Weekday of a calendar date. Derived from the date itself, so it does
    /// not depend on the server's locale or timezone.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = ScheduleError;

    /// Accepts the full English name in any case ("monday", "MONDAY").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Day::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ScheduleError::UnknownDay(s.to_string()))
    }
}

/// A validated `"HH:MM"` time of day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct TimeOfDay(String);

impl TimeOfDay {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ScheduleError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !well_formed {
            return Err(ScheduleError::InvalidTime(raw));
        }

        let hours = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let minutes = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        if hours > 23 || minutes > 59 {
            return Err(ScheduleError::InvalidTime(raw));
        }

        Ok(Self(raw))
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A time-of-day range `[start, end)` on some day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

#[derive(Deserialize)]
struct RawWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = ScheduleError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        TimeWindow::new(raw.start, raw.end)
    }
}

impl TimeWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::EmptyWindow {
                start: start.into(),
                end: end.into(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ScheduleError> {
        Self::new(start.parse()?, end.parse()?)
    }

    /// True when `other` lies entirely inside this window.
    pub fn contains(&self, other: &TimeWindow) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Parse a booking date given either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp. Timestamps keep their own calendar date (no timezone shift).
pub fn parse_date(raw: &str) -> Result<NaiveDate, ScheduleError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.date_naive())
        .map_err(|_| ScheduleError::InvalidDate(raw.to_string()))
}
