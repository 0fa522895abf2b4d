//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, booking-conflict filtering and the day-disable
//! predicate to the booking page via `wasm-bindgen`. All complex types are
//! passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::availability::{days_with_availability, has_availability, AvailabilitySet};
use slot_engine::booking::Booking;
use slot_engine::conflict::{filter_booked_slots, parse_instant};
use slot_engine::day::NativeDay;
use slot_engine::error::SlotError;
use slot_engine::slots::{generate_slots, parse_date, parse_timezone, TimeSlot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// A slot as seen by JavaScript: the RFC 3339 instant plus the local
/// wall-clock start it was generated from.
#[derive(Serialize, Deserialize)]
struct TimeSlotDto {
    start: String,
    local_start: String,
}

impl From<&TimeSlot> for TimeSlotDto {
    fn from(s: &TimeSlot) -> Self {
        Self {
            start: s.start.to_rfc3339(),
            local_start: s.local_start.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

impl TryFrom<TimeSlotDto> for TimeSlot {
    type Error = SlotError;

    fn try_from(dto: TimeSlotDto) -> Result<Self, Self::Error> {
        let start = parse_instant(&dto.start)?;
        let local_start = chrono::NaiveDateTime::parse_from_str(&dto.local_start, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|e| SlotError::InvalidInstant(format!("{}: {}", dto.local_start, e)))?;
        Ok(TimeSlot { start, local_start })
    }
}

// ---------------------------------------------------------------------------
// Pure helpers (testable off-wasm)
// ---------------------------------------------------------------------------

fn parse_availability(json: &str) -> Result<Option<AvailabilitySet>, SlotError> {
    // `null` means no set could be resolved; every date is then unavailable.
    Ok(serde_json::from_str(json)?)
}

fn generate_slots_json(
    availability_json: &str,
    date: &str,
    duration_minutes: Option<i32>,
    now: &str,
    timezone: &str,
) -> Result<String, SlotError> {
    let set = parse_availability(availability_json)?;
    let date = parse_date(date)?;
    let tz = parse_timezone(timezone)?;
    let now: DateTime<Utc> = parse_instant(now)?;

    let generated = generate_slots(
        set.as_ref(),
        date,
        duration_minutes.map(i64::from),
        now.with_timezone(&tz),
    );
    let dtos: Vec<TimeSlotDto> = generated.slots.iter().map(TimeSlotDto::from).collect();

    Ok(serde_json::to_string(&dtos)?)
}

fn filter_booked_slots_json(
    slots_json: &str,
    bookings_json: &str,
    duration_minutes: Option<i32>,
) -> Result<String, SlotError> {
    let dtos: Vec<TimeSlotDto> = serde_json::from_str(slots_json)?;
    let slots = dtos
        .into_iter()
        .map(TimeSlot::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let bookings: Vec<Booking> = serde_json::from_str(bookings_json)?;

    let filtered = filter_booked_slots(&slots, &bookings, duration_minutes.map(i64::from));
    let out: Vec<TimeSlotDto> = filtered.slots.iter().map(TimeSlotDto::from).collect();

    Ok(serde_json::to_string(&out)?)
}

fn has_availability_json(availability_json: &str, native_day: u8) -> Result<bool, SlotError> {
    let set = parse_availability(availability_json)?;
    let day = NativeDay::new(native_day).ok_or(SlotError::InvalidDay(native_day))?;
    Ok(has_availability(set.as_ref(), day))
}

fn days_with_availability_json(availability_json: &str) -> Result<String, SlotError> {
    let set = parse_availability(availability_json)?;
    let days: Vec<u8> = days_with_availability(set.as_ref())
        .into_iter()
        .map(NativeDay::get)
        .collect();
    Ok(serde_json::to_string(&days)?)
}

fn to_js_error(e: SlotError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate the bookable slots of one calendar date.
///
/// Returns a JSON array of `{start, local_start}` objects sorted by instant.
///
/// # Arguments
/// - `availability_json` -- the resolved availability set, or `null`
/// - `date` -- calendar date `YYYY-MM-DD` as picked in the calendar
/// - `duration_minutes` -- event length; missing or not positive means 15
/// - `now` -- current instant (RFC 3339)
/// - `timezone` -- IANA time zone of the booker's calendar
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots_js(
    availability_json: &str,
    date: &str,
    duration_minutes: Option<i32>,
    now: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    generate_slots_json(availability_json, date, duration_minutes, now, timezone).map_err(to_js_error)
}

/// Remove slots that overlap any non-cancelled booking.
///
/// `slots_json` is the output of `generateSlots`; `bookings_json` is the
/// array returned by the bookings endpoint. Returns the surviving slots in
/// the same order.
#[wasm_bindgen(js_name = "filterBookedSlots")]
pub fn filter_booked_slots_js(
    slots_json: &str,
    bookings_json: &str,
    duration_minutes: Option<i32>,
) -> Result<String, JsValue> {
    filter_booked_slots_json(slots_json, bookings_json, duration_minutes).map_err(to_js_error)
}

/// Whether a calendar day (Sun=0 .. Sat=6) should be selectable.
#[wasm_bindgen(js_name = "hasAvailability")]
pub fn has_availability_js(availability_json: &str, native_day: u8) -> Result<bool, JsValue> {
    has_availability_json(availability_json, native_day).map_err(to_js_error)
}

/// JSON array of the weekdays (Sun=0 .. Sat=6) that have availability.
#[wasm_bindgen(js_name = "daysWithAvailability")]
pub fn days_with_availability_js(availability_json: &str) -> Result<String, JsValue> {
    days_with_availability_json(availability_json).map_err(to_js_error)
}
