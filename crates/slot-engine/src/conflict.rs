//! Remove candidate slots that collide with existing bookings.
//!
//! A slot occupies `[start, start + duration)` and a booking occupies
//! `[start_time, end_time)`. They conflict when the half-open ranges overlap;
//! a slot ending exactly when a booking starts (or the reverse) is NOT a
//! conflict. Cancelled bookings never block a slot.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::booking::Booking;
use crate::error::{Result, SlotError};
use crate::slots::{effective_duration, TimeSlot};

/// Why a booking was ignored by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSkipReason {
    MissingTime,
    InvalidTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedBooking {
    pub booking: Booking,
    pub reason: BookingSkipReason,
}

/// Slots that survived the filter, in their original order, plus the
/// bookings that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilteredSlots {
    pub slots: Vec<TimeSlot>,
    pub skipped_bookings: Vec<SkippedBooking>,
}

/// Two half-open ranges overlap iff `a_start < b_end && b_start < a_end`.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Drop every slot whose meeting would overlap a non-cancelled booking.
///
/// `duration_minutes` follows the same fallback as slot generation (15 when
/// missing or not positive). A meeting reaching past the last representable
/// instant is treated as running to the end of time. Bookings with missing or
/// unparsable bounds are skipped and reported. With no bookings the slots are
/// returned unchanged.
pub fn filter_booked_slots(
    slots: &[TimeSlot],
    bookings: &[Booking],
    duration_minutes: Option<i64>,
) -> FilteredSlots {
    if bookings.is_empty() {
        return FilteredSlots {
            slots: slots.to_vec(),
            skipped_bookings: Vec::new(),
        };
    }

    let mut skipped_bookings = Vec::new();
    let mut busy: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();

    for booking in bookings.iter().filter(|b| !b.is_cancelled()) {
        let (Some(start), Some(end)) = (booking.start_time.as_deref(), booking.end_time.as_deref())
        else {
            warn!(id = ?booking.id, "booking missing start_time or end_time");
            skipped_bookings.push(SkippedBooking {
                booking: booking.clone(),
                reason: BookingSkipReason::MissingTime,
            });
            continue;
        };

        match (parse_instant(start), parse_instant(end)) {
            (Ok(start), Ok(end)) => busy.push((start, end)),
            _ => {
                warn!(id = ?booking.id, start, end, "booking has invalid start_time or end_time");
                skipped_bookings.push(SkippedBooking {
                    booking: booking.clone(),
                    reason: BookingSkipReason::InvalidTime,
                });
            }
        }
    }

    let duration = effective_duration(duration_minutes);
    let slots = slots
        .iter()
        .filter(|slot| {
            let slot_end = duration
                .and_then(|d| slot.end(d))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            let conflict = busy
                .iter()
                .find(|(b_start, b_end)| overlaps(slot.start, slot_end, *b_start, *b_end));
            if let Some((b_start, b_end)) = conflict {
                debug!(
                    slot_start = %slot.start,
                    %slot_end,
                    booking_start = %b_start,
                    booking_end = %b_end,
                    "slot conflicts with booking"
                );
            }
            conflict.is_none()
        })
        .copied()
        .collect();

    FilteredSlots {
        slots,
        skipped_bookings,
    }
}

/// Parse an ISO-8601 instant.
///
/// Accepts RFC 3339 (with offset, e.g. "2026-02-17T14:00:00.000Z") and naive
/// date-times (e.g. "2026-02-17T14:00:00"), which are taken as UTC.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| SlotError::InvalidInstant(format!("{s}: {e}")))
}
