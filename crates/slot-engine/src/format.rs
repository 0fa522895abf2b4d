//! Display helpers and the static option tables used by pickers.

use std::sync::LazyLock;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::slots::TimeSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    /// "9:30 am"
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// "09:30"
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// Render a slot's start as wall-clock time in `tz`.
pub fn format_slot(slot: &TimeSlot, tz: Tz, format: ClockFormat) -> String {
    let local = slot.start.with_timezone(&tz);
    match format {
        ClockFormat::TwelveHour => local.format("%-I:%M %P").to_string(),
        ClockFormat::TwentyFourHour => local.format("%H:%M").to_string(),
    }
}

/// `"13:30"` or `"13:30:00"` -> `"1:30 PM"`. Input whose hour is not a number
/// is returned unchanged.
pub fn format_clock_12h(time: &str) -> String {
    let mut parts = time.split(':');
    let Some(hour) = parts.next().and_then(|h| h.trim().parse::<u32>().ok()) else {
        return time.to_string();
    };
    let minutes = parts.next().filter(|m| !m.is_empty()).unwrap_or("00");
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minutes} {meridiem}")
}

/// Time zones offered by the time-zone selector, as `(iana, label)`.
pub static TIMEZONES: &[(&str, &str)] = &[
    ("UTC", "UTC (Coordinated Universal Time)"),
    ("America/New_York", "Eastern Time (ET)"),
    ("America/Chicago", "Central Time (CT)"),
    ("America/Denver", "Mountain Time (MT)"),
    ("America/Los_Angeles", "Pacific Time (PT)"),
    ("Europe/London", "London (GMT)"),
    ("Europe/Paris", "Paris (CET)"),
    ("Europe/Berlin", "Berlin (CET)"),
    ("Asia/Tokyo", "Tokyo (JST)"),
    ("Asia/Shanghai", "Shanghai (CST)"),
    ("Asia/Kolkata", "Mumbai, Kolkata (IST)"),
    ("Australia/Sydney", "Sydney (AEDT)"),
    ("Pacific/Auckland", "Auckland (NZDT)"),
    ("America/Toronto", "Toronto (EST)"),
    ("America/Vancouver", "Vancouver (PST)"),
    ("America/Mexico_City", "Mexico City (CST)"),
    ("America/Sao_Paulo", "São Paulo (BRT)"),
    ("Europe/Moscow", "Moscow (MSK)"),
    ("Asia/Dubai", "Dubai (GST)"),
    ("Asia/Singapore", "Singapore (SGT)"),
    ("Asia/Hong_Kong", "Hong Kong (HKT)"),
    ("Asia/Seoul", "Seoul (KST)"),
];

/// Label for an IANA name; unknown names get the UTC entry's label.
pub fn timezone_label(iana: &str) -> &'static str {
    TIMEZONES
        .iter()
        .find(|(name, _)| *name == iana)
        .unwrap_or(&TIMEZONES[0])
        .1
}

/// Zones whose name or label contains `term`, case-insensitively.
pub fn search_timezones(term: &str) -> Vec<(&'static str, &'static str)> {
    let term = term.to_lowercase();
    TIMEZONES
        .iter()
        .filter(|(name, label)| {
            name.to_lowercase().contains(&term) || label.to_lowercase().contains(&term)
        })
        .copied()
        .collect()
}

/// One entry of the range editor's time dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeOption {
    /// `HH:MM`
    pub value: String,
    /// `h:mm am`
    pub display: String,
}

static TIME_OPTIONS: LazyLock<Vec<TimeOption>> = LazyLock::new(|| {
    (0..24u32)
        .flat_map(|hour| (0..60u32).step_by(15).map(move |minute| (hour, minute)))
        .map(|(hour, minute)| {
            let value = format!("{hour:02}:{minute:02}");
            let display = format_clock_12h(&value).to_lowercase();
            TimeOption { value, display }
        })
        .collect()
});

/// Every quarter hour of the day, midnight first.
pub fn time_options() -> &'static [TimeOption] {
    &TIME_OPTIONS
}
