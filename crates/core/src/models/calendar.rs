use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// A calendar-reported span during which no appointment may be scheduled.
///
/// Half-open `[start, end)`. The reporting timezone is irrelevant once the
/// endpoints are absolute instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    /// Builds an interval, enforcing `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> BookingResult<Self> {
        if start >= end {
            return Err(BookingError::Parse(format!(
                "busy interval start {start} is not before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses an interval from RFC 3339 strings carrying any offset.
    ///
    /// A parse failure aborts the whole availability query; callers must not
    /// retry until the instants parse.
    pub fn parse(start: &str, end: &str) -> BookingResult<Self> {
        let start = parse_instant(start)?;
        let end = parse_instant(end)?;
        Self::new(start, end)
    }

    /// Half-open overlap test: touching boundaries do not count as overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

/// Parses an RFC 3339 timestamp in any offset to a UTC instant.
pub fn parse_instant(value: &str) -> BookingResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| BookingError::Parse(format!("invalid instant {value:?}: {e}")))
}

/// One cell of the candidate slot grid, before busy filtering.
///
/// The start is a wall-clock time interpreted in `zone`; the end is
/// `local_start + duration_minutes` of wall-clock time, so slots stay evenly
/// spaced across daylight-saving boundary days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCandidate {
    pub date: NaiveDate,
    pub local_start: NaiveTime,
    pub zone: Tz,
    pub duration_minutes: i64,
}

/// A slot candidate confirmed free of busy overlap.
///
/// Carries both the local-time label shown to the correspondent and the
/// canonical instants used for booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub date: NaiveDate,
    /// Wall-clock label in the grid timezone, "HH:MM".
    pub local_time: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
