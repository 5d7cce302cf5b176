use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, offset::LocalResult};
use chrono_tz::Tz;
use tracing::debug;

use booksync_core::errors::{BookingError, BookingResult};
use booksync_core::models::{AvailableSlot, BusyInterval, SlotCandidate};

/// Daily working-hours window in local whole hours, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: u32,
    pub end: u32,
}

/// Configuration for the candidate slot grid.
#[derive(Debug, Clone)]
pub struct AvailabilityConfig {
    pub working_hours: WorkingHours,
    pub slot_interval_minutes: i64,
    /// Timezone the grid's wall-clock times are interpreted in.
    pub timezone: Tz,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            working_hours: WorkingHours { start: 9, end: 18 },
            slot_interval_minutes: 30,
            timezone: chrono_tz::Europe::Zurich,
        }
    }
}

impl AvailabilityConfig {
    fn validate(&self) -> BookingResult<()> {
        if self.working_hours.start >= self.working_hours.end || self.working_hours.end > 24 {
            return Err(BookingError::Parse(format!(
                "invalid working hours {}..{}",
                self.working_hours.start, self.working_hours.end
            )));
        }
        if self.slot_interval_minutes <= 0 || self.slot_interval_minutes > 24 * 60 {
            return Err(BookingError::Parse(format!(
                "invalid slot interval {} minutes",
                self.slot_interval_minutes
            )));
        }
        Ok(())
    }
}

/// Computes every available slot in the closed date window `[window_start,
/// window_end]`, ordered day-then-time.
///
/// An empty busy list yields the full grid; a window entirely inside one busy
/// interval yields an empty sequence. Candidates are never generated past
/// `working_hours.end`, so a slot cannot stick out of the working window.
pub fn available_slots(
    busy: &[BusyInterval],
    window_start: NaiveDate,
    window_end: NaiveDate,
    config: &AvailabilityConfig,
) -> BookingResult<Vec<AvailableSlot>> {
    config.validate()?;

    let mut slots = Vec::new();
    let mut date = window_start;
    while date <= window_end {
        for candidate in day_candidates(date, config) {
            if let Some(slot) = resolve(&candidate)? {
                let free = !busy.iter().any(|b| b.overlaps(slot.start, slot.end));
                if free {
                    slots.push(slot);
                }
            }
        }
        date = date
            .succ_opt()
            .ok_or_else(|| BookingError::Parse(format!("date overflow past {date}")))?;
    }

    debug!(
        count = slots.len(),
        from = %window_start,
        to = %window_end,
        "generated available slots"
    );
    Ok(slots)
}

/// Enumerates one day's candidate starts within working hours, stepping by
/// wall-clock minutes. Spacing stays wall-clock even across a
/// daylight-saving boundary day.
fn day_candidates(date: NaiveDate, config: &AvailabilityConfig) -> Vec<SlotCandidate> {
    let start_minute = i64::from(config.working_hours.start) * 60;
    let end_minute = i64::from(config.working_hours.end) * 60;

    let mut candidates = Vec::new();
    let mut minute = start_minute;
    while minute < end_minute {
        // Working hours are < 24h, so this cannot fail.
        let local_start = NaiveTime::from_hms_opt(minute as u32 / 60, minute as u32 % 60, 0)
            .expect("minute of day within working hours");
        candidates.push(SlotCandidate {
            date,
            local_start,
            zone: config.timezone,
            duration_minutes: config.slot_interval_minutes,
        });
        minute += config.slot_interval_minutes;
    }
    candidates
}

/// Resolves a candidate's wall-clock start to absolute instants.
///
/// Returns `None` for wall-clock times skipped by a spring-forward
/// transition; ambiguous fall-back times take the earlier instant.
fn resolve(candidate: &SlotCandidate) -> BookingResult<Option<AvailableSlot>> {
    let local = candidate.date.and_time(candidate.local_start);
    let start = match candidate.zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => return Ok(None),
    };

    let duration = Duration::minutes(candidate.duration_minutes);
    let end = start
        .checked_add_signed(duration)
        .ok_or_else(|| BookingError::Parse(format!("slot end overflow at {local}")))?;

    Ok(Some(AvailableSlot {
        date: candidate.date,
        local_time: candidate.local_start.format("%H:%M").to_string(),
        start: start.with_timezone(&chrono::Utc),
        end: end.with_timezone(&chrono::Utc),
    }))
}
