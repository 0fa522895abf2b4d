//! Tests for filtering candidate slots against existing bookings.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use slot_engine::availability::{AvailabilitySet, WeeklyInterval};
use slot_engine::booking::{Booking, BookingStatus};
use slot_engine::conflict::{filter_booked_slots, overlaps, parse_instant, BookingSkipReason};
use slot_engine::slots::{generate_slots, TimeSlot};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

fn slot(hour: u32, min: u32) -> TimeSlot {
    let start = at(hour, min);
    TimeSlot {
        start,
        local_start: start.naive_utc(),
    }
}

fn booking(start: &str, end: &str) -> Booking {
    Booking::new(start, end, BookingStatus::Confirmed)
}

fn starts(slots: &[TimeSlot]) -> Vec<String> {
    slots
        .iter()
        .map(|s| s.start.format("%H:%M").to_string())
        .collect()
}

// ── Overlap rule ────────────────────────────────────────────────────────────

#[test]
fn partial_overlap_drops_the_slot() {
    let slots = vec![slot(10, 0)];
    let bookings = vec![booking("2026-03-16T10:15:00Z", "2026-03-16T10:45:00Z")];

    let result = filter_booked_slots(&slots, &bookings, Some(30));
    assert!(result.slots.is_empty());
}

#[test]
fn booking_ending_at_slot_start_is_adjacent() {
    let slots = vec![slot(10, 0)];
    let bookings = vec![booking("2026-03-16T09:00:00Z", "2026-03-16T10:00:00Z")];

    let result = filter_booked_slots(&slots, &bookings, Some(30));
    assert_eq!(starts(&result.slots), vec!["10:00"]);
}

#[test]
fn booking_starting_at_slot_end_is_adjacent() {
    let slots = vec![slot(10, 0)];
    let bookings = vec![booking("2026-03-16T10:30:00Z", "2026-03-16T11:00:00Z")];

    let result = filter_booked_slots(&slots, &bookings, Some(30));
    assert_eq!(starts(&result.slots), vec!["10:00"]);
}

#[test]
fn booking_inside_slot_and_slot_inside_booking_both_conflict() {
    let slots = vec![slot(10, 0), slot(13, 0)];
    let bookings = vec![
        booking("2026-03-16T10:10:00Z", "2026-03-16T10:20:00Z"),
        booking("2026-03-16T12:00:00Z", "2026-03-16T15:00:00Z"),
    ];

    let result = filter_booked_slots(&slots, &bookings, Some(30));
    assert!(result.slots.is_empty());
}

#[test]
fn overlaps_is_half_open() {
    assert!(overlaps(at(10, 0), at(10, 30), at(10, 29), at(11, 0)));
    assert!(!overlaps(at(10, 0), at(10, 30), at(10, 30), at(11, 0)));
    assert!(!overlaps(at(10, 0), at(10, 30), at(9, 0), at(10, 0)));
}

// ── Booking status ──────────────────────────────────────────────────────────

#[test]
fn cancelled_booking_never_blocks() {
    let slots = vec![slot(10, 0)];
    let bookings = vec![Booking::new(
        "2026-03-16T10:00:00Z",
        "2026-03-16T10:30:00Z",
        BookingStatus::Cancelled,
    )];

    let result = filter_booked_slots(&slots, &bookings, Some(30));
    assert_eq!(starts(&result.slots), vec!["10:00"]);
    assert!(result.skipped_bookings.is_empty());
}

#[test]
fn pending_booking_blocks() {
    let slots = vec![slot(10, 0)];
    let bookings = vec![Booking::new(
        "2026-03-16T10:00:00Z",
        "2026-03-16T10:30:00Z",
        BookingStatus::Pending,
    )];

    assert!(filter_booked_slots(&slots, &bookings, Some(30)).slots.is_empty());
}

// ── Identity and ordering ───────────────────────────────────────────────────

#[test]
fn no_bookings_is_identity() {
    let slots = vec![slot(11, 0), slot(9, 0), slot(10, 0)];

    let result = filter_booked_slots(&slots, &[], Some(30));
    assert_eq!(result.slots, slots);
}

#[test]
fn surviving_slots_keep_their_order() {
    let slots = vec![slot(9, 0), slot(9, 30), slot(10, 0), slot(10, 30), slot(11, 0)];
    let bookings = vec![booking("2026-03-16T10:00:00Z", "2026-03-16T10:30:00Z")];

    let result = filter_booked_slots(&slots, &bookings, Some(30));
    assert_eq!(starts(&result.slots), vec!["09:00", "09:30", "10:30", "11:00"]);
}

#[test]
fn missing_duration_uses_fifteen_minutes() {
    // With a 15-minute meeting the 10:00 slot ends before a 10:20 booking.
    let slots = vec![slot(10, 0)];
    let bookings = vec![booking("2026-03-16T10:20:00Z", "2026-03-16T10:40:00Z")];

    assert_eq!(filter_booked_slots(&slots, &bookings, None).slots.len(), 1);
    assert!(filter_booked_slots(&slots, &bookings, Some(30)).slots.is_empty());
}

// ── Degraded input ──────────────────────────────────────────────────────────

#[test]
fn malformed_bookings_are_skipped_not_fatal() {
    let slots = vec![slot(10, 0)];
    let mut missing = booking("", "");
    missing.start_time = None;
    let bookings = vec![missing, booking("yesterday", "2026-03-16T10:30:00Z")];

    let result = filter_booked_slots(&slots, &bookings, Some(30));

    assert_eq!(starts(&result.slots), vec!["10:00"]);
    assert_eq!(result.skipped_bookings.len(), 2);
    assert_eq!(result.skipped_bookings[0].reason, BookingSkipReason::MissingTime);
    assert_eq!(result.skipped_bookings[1].reason, BookingSkipReason::InvalidTime);
}

#[test]
fn instants_with_offsets_compare_absolutely() {
    // 11:00+01:00 is 10:00Z.
    let slots = vec![slot(10, 0)];
    let bookings = vec![booking("2026-03-16T11:00:00+01:00", "2026-03-16T11:30:00+01:00")];

    assert!(filter_booked_slots(&slots, &bookings, Some(30)).slots.is_empty());
}

#[test]
fn parse_instant_accepts_naive_and_fractional_forms() {
    assert_eq!(parse_instant("2026-03-16T10:00:00").unwrap(), at(10, 0));
    assert_eq!(parse_instant("2026-03-16T10:00:00.000Z").unwrap(), at(10, 0));
    assert!(parse_instant("2026-03-16").is_err());
}

// ── End to end ──────────────────────────────────────────────────────────────

#[test]
fn confirmed_booking_removes_only_its_slot() {
    let set = AvailabilitySet::new(
        "Working hours",
        "UTC",
        vec![WeeklyInterval {
            day_of_week: 1,
            start_time: "09:00:00".to_string(),
            end_time: "17:00:00".to_string(),
        }],
    );
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let now = Tz::UTC.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
    let bookings: Vec<Booking> = serde_json::from_str(
        r#"[{"id": 1, "event_type_id": 4, "start_time": "2026-03-16T10:00:00.000Z",
             "end_time": "2026-03-16T10:30:00.000Z", "booking_status": "confirmed"}]"#,
    )
    .unwrap();

    let generated = generate_slots(Some(&set), date, Some(30), now);
    let result = filter_booked_slots(&generated.slots, &bookings, Some(30));
    let remaining = starts(&result.slots);

    assert_eq!(remaining.len(), 15);
    assert!(!remaining.contains(&"10:00".to_string()));
    assert!(remaining.contains(&"09:30".to_string()));
    assert!(remaining.contains(&"10:30".to_string()));
}

#[test]
fn unrepresentable_duration_runs_to_end_of_time() {
    let slots = vec![slot(9, 0), slot(11, 0)];
    let bookings = vec![booking("2026-03-16T10:00:00Z", "2026-03-16T10:30:00Z")];

    let result = filter_booked_slots(&slots, &bookings, Some(i64::MAX));

    assert_eq!(starts(&result.slots), vec!["11:00"]);
}

#[test]
fn unknown_statuses_block_and_odd_records_do_not_fail_the_list() {
    let slots = vec![slot(9, 0), slot(10, 0), slot(11, 0)];
    let bookings: Vec<Booking> = serde_json::from_str(
        r#"[
            {"start_time": "2026-03-16T09:00:00Z", "end_time": "2026-03-16T09:30:00Z",
             "status": "confirmed", "booking_status": "cancelled"},
            {"start_time": "2026-03-16T10:00:00Z", "end_time": "2026-03-16T10:30:00Z",
             "status": "unconfirmed"},
            {"start_time": "2026-03-16T11:00:00Z", "end_time": "2026-03-16T11:30:00Z",
             "status": null}
        ]"#,
    )
    .unwrap();

    let result = filter_booked_slots(&slots, &bookings, Some(30));

    assert_eq!(starts(&result.slots), vec!["09:00"]);
    assert!(result.skipped_bookings.is_empty());
}
