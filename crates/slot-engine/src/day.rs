//! Day-of-week and clock-string conventions.
//!
//! Calendar code numbers weekdays Sunday=0..Saturday=6 ([`NativeDay`]) while
//! persisted availability intervals use Monday=1..Sunday=7 ([`StorageDay`]).
//! The two are distinct types and only [`to_storage_day`] / [`to_native_day`]
//! convert between them.
//!
//! Clock strings are stored as `HH:MM:SS` and displayed as `HH:MM`.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// Calendar-native day of week: Sunday=0 .. Saturday=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NativeDay(u8);

/// Storage day of week: Monday=1 .. Sunday=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StorageDay(u8);

const SHORT_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl NativeDay {
    pub const SUNDAY: NativeDay = NativeDay(0);
    pub const SATURDAY: NativeDay = NativeDay(6);

    /// Returns `None` outside 0..=6.
    pub fn new(day: u8) -> Option<Self> {
        (day <= 6).then_some(Self(day))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The weekday of a calendar date, taken from the date itself with no
    /// time-zone shift.
    pub fn of(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        Self(weekday.num_days_from_sunday() as u8)
    }

    /// All seven days, Sunday first.
    pub fn all() -> impl Iterator<Item = NativeDay> {
        (0..=6).map(NativeDay)
    }

    /// Three-letter English name ("Sun", "Mon", ...).
    pub fn short_name(self) -> &'static str {
        SHORT_NAMES[self.0 as usize]
    }
}

impl StorageDay {
    pub const MONDAY: StorageDay = StorageDay(1);
    pub const SUNDAY: StorageDay = StorageDay(7);

    /// Returns `None` outside 1..=7.
    pub fn new(day: u8) -> Option<Self> {
        (1..=7).contains(&day).then_some(Self(day))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        Self(weekday.number_from_monday() as u8)
    }
}

/// Sunday (0) becomes 7; every other day keeps its number.
pub fn to_storage_day(day: NativeDay) -> StorageDay {
    if day.0 == 0 {
        StorageDay(7)
    } else {
        StorageDay(day.0)
    }
}

/// Sunday (7) becomes 0; every other day keeps its number.
pub fn to_native_day(day: StorageDay) -> NativeDay {
    if day.0 == 7 {
        NativeDay(0)
    } else {
        NativeDay(day.0)
    }
}

const DEFAULT_DISPLAY_CLOCK: &str = "09:00";
const DEFAULT_STORAGE_CLOCK: &str = "09:00:00";

/// `HH:MM:SS` -> `HH:MM`. Strings already in `HH:MM` form pass through, an
/// empty string yields `09:00`.
///
/// Anything else is cut to its first five characters, so unpadded input such
/// as `"9:00:00"` comes out as `"9:00:"`; use [`parse_clock`] for those.
pub fn to_display_clock(time: &str) -> String {
    if time.is_empty() {
        return DEFAULT_DISPLAY_CLOCK.to_string();
    }
    if is_clock_form(time, 2) {
        return time.to_string();
    }
    time.get(..5).unwrap_or(time).to_string()
}

/// `HH:MM` -> `HH:MM:SS`. Strings already in `HH:MM:SS` form pass through, an
/// empty string yields `09:00:00`.
pub fn to_storage_clock(time: &str) -> String {
    if time.is_empty() {
        return DEFAULT_STORAGE_CLOCK.to_string();
    }
    if is_clock_form(time, 3) {
        return time.to_string();
    }
    format!("{time}:00")
}

/// True when `time` is exactly `groups` colon-separated two-digit fields.
fn is_clock_form(time: &str, groups: usize) -> bool {
    let parts: Vec<&str> = time.split(':').collect();
    parts.len() == groups
        && parts
            .iter()
            .all(|p| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit()))
}

/// An hour/minute offset from local midnight parsed from an interval bound.
///
/// `24:00` is accepted as the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    pub fn hour(self) -> u32 {
        self.hour
    }

    pub fn minute(self) -> u32 {
        self.minute
    }

    pub fn minutes_since_midnight(self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }
}

/// Parse `H`, `HH:MM` or `HH:MM:SS`. Seconds are ignored and missing minutes
/// default to zero. Returns `None` for non-numeric fields or out-of-range
/// values.
pub fn parse_clock(time: &str) -> Option<ClockTime> {
    let mut parts = time.trim().split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = match parts.next() {
        Some(m) if !m.is_empty() => m.trim().parse().ok()?,
        _ => 0,
    };
    if minute > 59 || hour > 24 || (hour == 24 && minute != 0) {
        return None;
    }
    Some(ClockTime { hour, minute })
}
