//! Expand a calendar date and a weekly availability set into candidate slots.
//!
//! Every window stored for the date's weekday is walked in steps of the event
//! duration. A candidate is kept when the whole meeting fits inside its
//! window. On the current day, candidates closer than the booking buffer to
//! `now` are dropped. Candidates from all windows are merged and sorted by
//! instant; overlapping windows are not deduplicated.

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, warn};

use crate::availability::{intervals_for, AvailabilitySet, WeeklyInterval};
use crate::day::{parse_clock, NativeDay};
use crate::error::{Result, SlotError};

/// Step used when the caller supplies no usable duration.
pub const DEFAULT_SLOT_MINUTES: i64 = 15;

/// Minimum lead time for a slot on the current day.
pub const BOOKING_BUFFER_MINUTES: i64 = 5;

/// A candidate meeting start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// The absolute start instant.
    pub start: DateTime<Utc>,
    /// The wall-clock start on the selected date the slot was generated from.
    pub local_start: NaiveDateTime,
}

impl TimeSlot {
    /// The exclusive end of a meeting of `duration` starting at this slot,
    /// or `None` when it lies beyond the representable range.
    pub fn end(&self, duration: Duration) -> Option<DateTime<Utc>> {
        self.start.checked_add_signed(duration)
    }
}

/// Why an availability window (or part of it) produced no slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// A bound could not be parsed as a clock time.
    UnparsableTime,
    /// The end bound is not after the start bound.
    EmptyWindow,
    /// A candidate start falls in a daylight-saving gap of the time zone.
    NonexistentLocalTime { local: NaiveDateTime },
}

/// A degraded-input record produced during generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedInterval {
    pub interval: WeeklyInterval,
    pub reason: SkipReason,
}

/// Slots for one date plus a record of every window that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlotGeneration {
    /// Sorted ascending by instant.
    pub slots: Vec<TimeSlot>,
    pub skipped: Vec<SkippedInterval>,
}

/// The slot length for a requested duration: the duration itself when
/// positive, [`DEFAULT_SLOT_MINUTES`] otherwise.
///
/// Returns `None` for a positive duration too large to represent; no meeting
/// of that length fits in any window.
pub fn effective_duration(duration_minutes: Option<i64>) -> Option<Duration> {
    match duration_minutes {
        Some(d) if d > 0 => Duration::try_minutes(d),
        _ => Duration::try_minutes(DEFAULT_SLOT_MINUTES),
    }
}

/// Generate the bookable starts on `date` for an event of `duration_minutes`.
///
/// `date` is a calendar date in the zone of `now`; its weekday selects the
/// windows and each window is anchored to the date's local midnight. When
/// `date` is `now`'s date, slots earlier than `now + 5 minutes` are dropped.
///
/// Malformed windows are skipped and reported in
/// [`SlotGeneration::skipped`]. A missing set, or a weekday without windows,
/// yields no slots.
pub fn generate_slots(
    set: Option<&AvailabilitySet>,
    date: NaiveDate,
    duration_minutes: Option<i64>,
    now: DateTime<Tz>,
) -> SlotGeneration {
    let mut result = SlotGeneration::default();

    let windows = intervals_for(set, NativeDay::of(date));
    if windows.is_empty() {
        return result;
    }

    let tz = now.timezone();
    let step = effective_duration(duration_minutes);
    let midnight = date.and_time(NaiveTime::MIN);
    let cutoff = (date == now.date_naive())
        .then(|| now.with_timezone(&Utc) + Duration::minutes(BOOKING_BUFFER_MINUTES));

    for window in windows {
        let bounds = parse_clock(&window.start_time).zip(parse_clock(&window.end_time));
        let Some((start, end)) = bounds else {
            warn!(
                day_of_week = window.day_of_week,
                start_time = %window.start_time,
                end_time = %window.end_time,
                "skipping availability interval with unparsable bounds"
            );
            result.skipped.push(SkippedInterval {
                interval: window.clone(),
                reason: SkipReason::UnparsableTime,
            });
            continue;
        };

        let window_start = midnight + Duration::minutes(start.minutes_since_midnight());
        let window_end = midnight + Duration::minutes(end.minutes_since_midnight());
        if window_end <= window_start {
            warn!(
                day_of_week = window.day_of_week,
                start_time = %window.start_time,
                end_time = %window.end_time,
                "skipping availability interval whose end is not after its start"
            );
            result.skipped.push(SkippedInterval {
                interval: window.clone(),
                reason: SkipReason::EmptyWindow,
            });
            continue;
        }

        let mut cursor = window_start;
        while let Some(next) = step.and_then(|step| cursor.checked_add_signed(step)) {
            if next > window_end {
                break;
            }
            match resolve_local(&tz, cursor) {
                Some(start) => {
                    if cutoff.is_none_or(|c| start >= c) {
                        result.slots.push(TimeSlot {
                            start,
                            local_start: cursor,
                        });
                    }
                }
                None => {
                    warn!(local = %cursor, timezone = tz.name(), "skipping slot inside a DST gap");
                    result.skipped.push(SkippedInterval {
                        interval: window.clone(),
                        reason: SkipReason::NonexistentLocalTime { local: cursor },
                    });
                }
            }
            cursor = next;
        }
    }

    result.slots.sort_by_key(|s| s.start);
    debug!(%date, slots = result.slots.len(), skipped = result.skipped.len(), "generated slots");
    result
}

/// Generate slots in the set's own time zone.
///
/// # Errors
/// Returns [`SlotError::InvalidTimezone`] if the set's `timezone` is not an
/// IANA identifier.
pub fn generate_slots_for_set(
    set: &AvailabilitySet,
    date: NaiveDate,
    duration_minutes: Option<i64>,
    now: DateTime<Utc>,
) -> Result<SlotGeneration> {
    let tz = parse_timezone(&set.timezone)?;
    Ok(generate_slots(Some(set), date, duration_minutes, now.with_timezone(&tz)))
}

/// Parse an IANA time zone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| SlotError::InvalidDate(format!("{date}: {e}")))
}

/// Map a wall-clock time to an instant. Ambiguous times take the earlier
/// instant; times inside a DST gap have none.
fn resolve_local(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}
