//! The weekly schedule as edited in the availability editor.
//!
//! The editor works on seven day rows keyed by [`NativeDay`], each with an
//! on/off toggle and `HH:MM` ranges. Persisted sets are flat lists of
//! [`WeeklyInterval`]s using storage days and `HH:MM:SS` clocks. This module
//! converts between the two and renders the one-line-per-group summary shown
//! in availability lists.

use serde::{Deserialize, Serialize};

use crate::availability::{AvailabilitySet, WeeklyInterval};
use crate::day::{to_display_clock, to_native_day, to_storage_clock, to_storage_day, NativeDay};
use crate::format::format_clock_12h;

const DEFAULT_START: &str = "09:00";
const DEFAULT_END: &str = "17:00";

/// Summary display order, Monday first.
const DISPLAY_ORDER: [u8; 7] = [1, 2, 3, 4, 5, 6, 0];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// `HH:MM`
    pub start: String,
    /// `HH:MM`
    pub end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::new(DEFAULT_START, DEFAULT_END)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub enabled: bool,
    pub ranges: Vec<TimeRange>,
}

impl DaySchedule {
    fn disabled() -> Self {
        Self {
            enabled: false,
            ranges: vec![TimeRange::default()],
        }
    }

    fn working() -> Self {
        Self {
            enabled: true,
            ranges: vec![TimeRange::default()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Indexed by native day, Sunday first.
    days: [DaySchedule; 7],
}

impl Default for WeeklySchedule {
    /// Monday to Friday 09:00-17:00; weekends off.
    fn default() -> Self {
        let mut days = std::array::from_fn(|_| DaySchedule::working());
        days[0] = DaySchedule::disabled();
        days[6] = DaySchedule::disabled();
        Self { days }
    }
}

impl WeeklySchedule {
    /// Every day disabled with the default range.
    pub fn empty() -> Self {
        Self {
            days: std::array::from_fn(|_| DaySchedule::disabled()),
        }
    }

    pub fn day(&self, day: NativeDay) -> &DaySchedule {
        &self.days[day.get() as usize]
    }

    pub fn day_mut(&mut self, day: NativeDay) -> &mut DaySchedule {
        &mut self.days[day.get() as usize]
    }

    /// Build editor rows from a persisted set.
    ///
    /// Days with at least one interval are enabled and carry those intervals
    /// in stored order. Intervals with an out-of-range day are dropped.
    pub fn from_set(set: &AvailabilitySet) -> Self {
        let mut schedule = Self::empty();
        let mut touched = [false; 7];

        for interval in &set.intervals {
            let Some(day) = interval.storage_day() else {
                continue;
            };
            let idx = to_native_day(day).get() as usize;
            let row = &mut schedule.days[idx];
            if !touched[idx] {
                touched[idx] = true;
                row.enabled = true;
                row.ranges.clear();
            }
            row.ranges.push(TimeRange::new(
                to_display_clock(&interval.start_time),
                to_display_clock(&interval.end_time),
            ));
        }

        schedule
    }

    /// Flatten enabled rows into storage intervals, Sunday first.
    pub fn to_intervals(&self) -> Vec<WeeklyInterval> {
        NativeDay::all()
            .filter(|d| self.day(*d).enabled)
            .flat_map(|d| {
                self.day(d)
                    .ranges
                    .iter()
                    .filter(|r| r.is_complete())
                    .map(move |r| {
                        WeeklyInterval::new(
                            to_storage_day(d),
                            to_storage_clock(&r.start),
                            to_storage_clock(&r.end),
                        )
                    })
            })
            .collect()
    }

    /// A persistable set named `name`. An empty time zone becomes `UTC`.
    pub fn to_set(&self, name: impl Into<String>, timezone: &str) -> AvailabilitySet {
        let timezone = if timezone.is_empty() { "UTC" } else { timezone };
        AvailabilitySet::new(name, timezone, self.to_intervals())
    }

    /// Human-readable summary lines, e.g. `"Mon - Fri: 9:00 AM - 5:00 PM"`.
    ///
    /// Enabled days are walked Monday first; neighbours sharing the same
    /// first range are grouped. Only the first range of a day is described.
    pub fn summary(&self) -> Vec<String> {
        let mut groups: Vec<(Vec<u8>, String)> = Vec::new();

        for &idx in &DISPLAY_ORDER {
            let row = &self.days[idx as usize];
            if !row.enabled {
                continue;
            }
            let Some(range) = row.ranges.first() else {
                continue;
            };
            let time = format!("{} - {}", format_clock_12h(&range.start), format_clock_12h(&range.end));

            if let Some((days, last_time)) = groups.last_mut() {
                if *last_time == time {
                    days.push(idx);
                    continue;
                }
            }
            groups.push((vec![idx], time));
        }

        if groups.is_empty() {
            return vec!["No availability set".to_string()];
        }

        groups
            .into_iter()
            .map(|(days, time)| format!("{}: {}", describe_days(&days), time))
            .collect()
    }
}

/// "Mon", "Mon - Fri" for a run of neighbouring days, or "Mon, Wed" otherwise.
fn describe_days(days: &[u8]) -> String {
    let names: Vec<&str> = days.iter().map(|d| short_name(*d)).collect();
    match names.as_slice() {
        [one] => (*one).to_string(),
        [first, .., last] if is_run(days) => format!("{first} - {last}"),
        _ => names.join(", "),
    }
}

fn is_run(days: &[u8]) -> bool {
    let positions: Vec<usize> = days
        .iter()
        .filter_map(|d| DISPLAY_ORDER.iter().position(|o| o == d))
        .collect();
    positions.windows(2).all(|w| w[1] == w[0] + 1)
}

fn short_name(day: u8) -> &'static str {
    NativeDay::new(day).map_or("?", NativeDay::short_name)
}
