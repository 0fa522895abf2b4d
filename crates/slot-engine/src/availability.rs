//! Weekly availability records and the per-day lookup over them.
//!
//! An [`AvailabilitySet`] is the named weekly schedule persisted by the REST
//! layer. The functions here answer two questions for a calendar day: does
//! the day have any window at all (used to disable dates in a picker), and
//! which windows does it have (used by the slot generator).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::day::{to_native_day, to_storage_day, NativeDay, StorageDay};

/// Identifier of a persisted record. The API hands out either integer or
/// string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// One recurring availability window.
///
/// Bounds are kept as received (`HH:MM:SS`); the slot generator parses them
/// and skips windows it cannot read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyInterval {
    /// Storage convention, Monday=1 .. Sunday=7.
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

impl WeeklyInterval {
    pub fn new(day: StorageDay, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            day_of_week: day.get(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// `None` when the stored day is outside 1..=7.
    pub fn storage_day(&self) -> Option<StorageDay> {
        StorageDay::new(self.day_of_week)
    }

    fn falls_on(&self, day: NativeDay) -> bool {
        self.storage_day() == Some(to_storage_day(day))
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// A named weekly availability definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySet {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    /// IANA time zone name the schedule was authored in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub intervals: Vec<WeeklyInterval>,
}

impl AvailabilitySet {
    pub fn new(name: impl Into<String>, timezone: impl Into<String>, intervals: Vec<WeeklyInterval>) -> Self {
        Self {
            id: None,
            name: name.into(),
            timezone: timezone.into(),
            intervals,
        }
    }

    pub fn has_intervals(&self) -> bool {
        !self.intervals.is_empty()
    }
}

/// Whether `day` has at least one availability window.
///
/// A missing set has no availability on any day.
pub fn has_availability(set: Option<&AvailabilitySet>, day: NativeDay) -> bool {
    set.is_some_and(|s| s.intervals.iter().any(|i| i.falls_on(day)))
}

/// All windows stored for `day`, in stored order.
pub fn intervals_for(set: Option<&AvailabilitySet>, day: NativeDay) -> Vec<&WeeklyInterval> {
    match set {
        Some(s) => s.intervals.iter().filter(|i| i.falls_on(day)).collect(),
        None => Vec::new(),
    }
}

/// Distinct days that have at least one window, in first-seen order.
///
/// Intervals with an out-of-range stored day are ignored.
pub fn days_with_availability(set: Option<&AvailabilitySet>) -> Vec<NativeDay> {
    let Some(set) = set else {
        return Vec::new();
    };

    let mut days: Vec<NativeDay> = Vec::new();
    for day in set.intervals.iter().filter_map(WeeklyInterval::storage_day) {
        let native = to_native_day(day);
        if !days.contains(&native) {
            days.push(native);
        }
    }
    days
}

/// Pick the set that governs an event type.
///
/// The event's own set wins when it has at least one interval; otherwise the
/// designated default set is used. With neither, no date has availability.
pub fn resolve_availability<'a>(
    event_specific: Option<&'a AvailabilitySet>,
    default: Option<&'a AvailabilitySet>,
) -> Option<&'a AvailabilitySet> {
    match event_specific {
        Some(set) if set.has_intervals() => Some(set),
        _ => default,
    }
}
