use booksync_availability::{
    AvailabilityConfig, WorkingHours, available_slots, render_slots_by_day,
};
use booksync_core::models::BusyInterval;
use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn utc_config(interval: i64) -> AvailabilityConfig {
    AvailabilityConfig {
        working_hours: WorkingHours { start: 9, end: 18 },
        slot_interval_minutes: interval,
        timezone: chrono_tz::UTC,
    }
}

#[test]
fn test_empty_busy_list_yields_full_grid() {
    let day = date(2025, 1, 6);
    let slots = available_slots(&[], day, date(2025, 1, 8), &utc_config(30))
        .expect("Failed to generate slots");

    // 3 days x (18 - 9) hours x 2 slots per hour
    assert_eq!(slots.len(), 3 * 9 * 2);
    assert_eq!(slots[0].local_time, "09:00");
    assert_eq!(slots[0].date, day);
    assert_eq!(slots.last().unwrap().local_time, "17:30");
    assert_eq!(slots.last().unwrap().date, date(2025, 1, 8));
}

#[test]
fn test_no_generated_slot_overlaps_any_busy_interval() {
    let busy = vec![
        BusyInterval::parse("2025-01-06T10:15:00Z", "2025-01-06T11:45:00Z").unwrap(),
        BusyInterval::parse("2025-01-07T09:00:00Z", "2025-01-07T18:00:00Z").unwrap(),
        BusyInterval::parse("2025-01-08T17:45:00Z", "2025-01-08T19:00:00Z").unwrap(),
    ];

    let slots = available_slots(&busy, date(2025, 1, 6), date(2025, 1, 8), &utc_config(30))
        .expect("Failed to generate slots");

    for slot in &slots {
        for b in &busy {
            assert!(
                !(slot.start < b.end && slot.end > b.start),
                "slot {} {} overlaps busy {:?}",
                slot.date,
                slot.local_time,
                b
            );
        }
    }
    // Day two is fully busy; nothing may survive there.
    assert!(slots.iter().all(|s| s.date != date(2025, 1, 7)));
}

#[test]
fn test_single_busy_hour_removes_exactly_one_slot() {
    // Worked example: one busy hour on an otherwise free UTC day.
    let busy = vec![BusyInterval::parse("2025-01-06T14:00:00Z", "2025-01-06T15:00:00Z").unwrap()];
    let day = date(2025, 1, 6);

    let slots =
        available_slots(&busy, day, day, &utc_config(60)).expect("Failed to generate slots");

    let times: Vec<&str> = slots.iter().map(|s| s.local_time.as_str()).collect();
    assert_eq!(
        times,
        vec!["09:00", "10:00", "11:00", "12:00", "13:00", "15:00", "16:00", "17:00"]
    );
}

#[test]
fn test_busy_interval_equal_to_slot_removes_only_that_slot() {
    // Busy exactly [10:00, 10:30): half-open, so 09:30 and 10:30 survive.
    let busy = vec![BusyInterval::parse("2025-01-06T10:00:00Z", "2025-01-06T10:30:00Z").unwrap()];
    let day = date(2025, 1, 6);

    let slots =
        available_slots(&busy, day, day, &utc_config(30)).expect("Failed to generate slots");

    let times: Vec<&str> = slots.iter().map(|s| s.local_time.as_str()).collect();
    assert!(!times.contains(&"10:00"));
    assert!(times.contains(&"09:30"));
    assert!(times.contains(&"10:30"));
    assert_eq!(slots.len(), 9 * 2 - 1);
}

#[test]
fn test_window_inside_one_busy_interval_is_empty() {
    let busy = vec![BusyInterval::parse("2025-01-05T00:00:00Z", "2025-01-10T00:00:00Z").unwrap()];

    let slots = available_slots(&busy, date(2025, 1, 6), date(2025, 1, 8), &utc_config(30))
        .expect("Failed to generate slots");

    assert!(slots.is_empty());
}

#[test]
fn test_slots_are_ordered_day_then_time() {
    let slots = available_slots(&[], date(2025, 1, 6), date(2025, 1, 7), &utc_config(60))
        .expect("Failed to generate slots");

    let mut sorted = slots.clone();
    sorted.sort_by_key(|s| s.start);
    assert_eq!(slots, sorted);
    // First element is the earliest slot, the "suggest one" contract.
    assert_eq!(slots[0].start, Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap());
}

#[test]
fn test_grid_times_convert_through_named_timezone() {
    let config = AvailabilityConfig {
        working_hours: WorkingHours { start: 9, end: 10 },
        slot_interval_minutes: 30,
        timezone: chrono_tz::Europe::Zurich,
    };

    // January: Zurich is UTC+1, so 09:00 local is 08:00Z.
    let slots = available_slots(&[], date(2025, 1, 6), date(2025, 1, 6), &config)
        .expect("Failed to generate slots");

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].local_time, "09:00");
    assert_eq!(slots[0].start, Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap());
    assert_eq!(slots[0].end, Utc.with_ymd_and_hms(2025, 1, 6, 8, 30, 0).unwrap());
}

#[test]
fn test_spring_forward_skips_nonexistent_wall_clock_times() {
    // Zurich jumps 02:00 -> 03:00 on 2025-03-30; 02:00 and 02:30 never occur.
    let config = AvailabilityConfig {
        working_hours: WorkingHours { start: 1, end: 4 },
        slot_interval_minutes: 30,
        timezone: chrono_tz::Europe::Zurich,
    };

    let slots = available_slots(&[], date(2025, 3, 30), date(2025, 3, 30), &config)
        .expect("Failed to generate slots");

    let times: Vec<&str> = slots.iter().map(|s| s.local_time.as_str()).collect();
    assert_eq!(times, vec!["01:00", "01:30", "03:00", "03:30"]);

    // Wall-clock spacing, not absolute: 01:30 CET and 03:00 CEST are 30
    // absolute minutes apart.
    assert_eq!(slots[1].start, Utc.with_ymd_and_hms(2025, 3, 30, 0, 30, 0).unwrap());
    assert_eq!(slots[2].start, Utc.with_ymd_and_hms(2025, 3, 30, 1, 0, 0).unwrap());
}

#[test]
fn test_fall_back_ambiguous_times_take_earlier_instant() {
    // Zurich repeats 02:00-03:00 on 2025-10-26; ambiguous times resolve to
    // the first (CEST, UTC+2) occurrence.
    let config = AvailabilityConfig {
        working_hours: WorkingHours { start: 2, end: 3 },
        slot_interval_minutes: 30,
        timezone: chrono_tz::Europe::Zurich,
    };

    let slots = available_slots(&[], date(2025, 10, 26), date(2025, 10, 26), &config)
        .expect("Failed to generate slots");

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].local_time, "02:00");
    assert_eq!(slots[0].start, Utc.with_ymd_and_hms(2025, 10, 26, 0, 0, 0).unwrap());
}

#[rstest]
#[case(WorkingHours { start: 18, end: 9 }, 30)]
#[case(WorkingHours { start: 9, end: 25 }, 30)]
#[case(WorkingHours { start: 9, end: 18 }, 0)]
#[case(WorkingHours { start: 9, end: 18 }, -30)]
fn test_invalid_config_is_rejected(#[case] working_hours: WorkingHours, #[case] interval: i64) {
    let config = AvailabilityConfig {
        working_hours,
        slot_interval_minutes: interval,
        timezone: chrono_tz::UTC,
    };

    let result = available_slots(&[], date(2025, 1, 6), date(2025, 1, 6), &config);
    assert!(result.is_err());
}

#[test]
fn test_render_groups_slots_by_day() {
    let slots = available_slots(&[], date(2025, 1, 6), date(2025, 1, 7), &utc_config(240))
        .expect("Failed to generate slots");
    // 240-minute step in a 9h window: 09:00, 13:00, 17:00 per day.

    let rendered = render_slots_by_day(&slots);
    assert!(rendered.contains("2025-01-06: 09:00, 13:00, 17:00"));
    assert!(rendered.contains("2025-01-07: 09:00, 13:00, 17:00"));
    assert!(rendered.starts_with("**AVAILABLE TIME SLOTS:**"));
}

#[test]
fn test_render_empty_slots() {
    assert_eq!(
        render_slots_by_day(&[]),
        "No available slots in the requested period."
    );
}
