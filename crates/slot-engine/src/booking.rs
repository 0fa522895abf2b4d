//! Booking and event-type records exchanged with the REST layer.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::availability::RecordId;
use crate::error::{Result, SlotError};
use crate::slots::TimeSlot;

/// Duration assumed for a draft when the event type has none.
pub const DEFAULT_EVENT_MINUTES: i64 = 30;

/// Lifecycle state of a booking. Only [`BookingStatus::Cancelled`] frees the
/// slot; any status the API adds later is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
    Other(String),
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "confirmed" => Self::Confirmed,
            "pending" => Self::Pending,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(s),
        }
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Confirmed => "confirmed".to_string(),
            BookingStatus::Pending => "pending".to_string(),
            BookingStatus::Cancelled => "cancelled".to_string(),
            BookingStatus::Other(s) => s,
        }
    }
}

/// An existing booking as returned by `GET /bookings`.
///
/// Start and end are kept as the raw ISO-8601 strings; the conflict filter
/// skips bookings whose bounds are missing or unreadable. Deserialization
/// never rejects a record over its status or bounds, so one odd booking
/// cannot fail a whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BookingRecord")]
pub struct Booking {
    pub id: Option<RecordId>,
    pub event_type_id: Option<RecordId>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: BookingStatus,
}

/// Wire shape of a booking. The API has used both `booking_status` and
/// `status`; `booking_status` wins when both are set.
#[derive(Deserialize)]
struct BookingRecord {
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(default)]
    event_type_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_string")]
    start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    booking_status: Option<String>,
}

impl From<BookingRecord> for Booking {
    fn from(r: BookingRecord) -> Self {
        let status = r
            .booking_status
            .filter(|s| !s.is_empty())
            .or(r.status.filter(|s| !s.is_empty()))
            .map(BookingStatus::from)
            .unwrap_or_default();

        Self {
            id: r.id,
            event_type_id: r.event_type_id,
            start_time: r.start_time,
            end_time: r.end_time,
            status,
        }
    }
}

/// Any JSON value; non-strings (including `null`) read as absent.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }))
}

impl Booking {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>, status: BookingStatus) -> Self {
        Self {
            id: None,
            event_type_id: None,
            start_time: Some(start_time.into()),
            end_time: Some(end_time.into()),
            status,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

/// The event type a booking page is for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventType {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// Meeting length in minutes.
    #[serde(default)]
    pub duration: Option<i64>,
    /// The availability set governing this event; the default set applies
    /// when absent.
    #[serde(default)]
    pub availability_id: Option<RecordId>,
}

/// A new booking ready to be posted for a chosen slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingDraft {
    pub event_type_id: RecordId,
    pub name: String,
    pub client_email: String,
    pub additional_notes: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub date: NaiveDate,
    pub booking_status: BookingStatus,
}

impl BookingDraft {
    /// Build a confirmed booking for `slot`, lasting the event's duration.
    ///
    /// # Errors
    /// Returns [`SlotError::MissingEventType`] if the event type has no id, and
    /// [`SlotError::InvalidDuration`] if the meeting would end past the last
    /// representable instant.
    pub fn for_slot(
        event_type: &EventType,
        slot: &TimeSlot,
        name: impl Into<String>,
        client_email: impl Into<String>,
    ) -> Result<Self> {
        let event_type_id = event_type.id.clone().ok_or(SlotError::MissingEventType)?;
        let minutes = event_type
            .duration
            .filter(|d| *d > 0)
            .unwrap_or(DEFAULT_EVENT_MINUTES);
        let end_time = Duration::try_minutes(minutes)
            .and_then(|d| slot.end(d))
            .ok_or(SlotError::InvalidDuration(minutes))?;

        Ok(Self {
            event_type_id,
            name: name.into(),
            client_email: client_email.into(),
            additional_notes: None,
            start_time: slot.start,
            end_time,
            date: slot.local_start.date(),
            booking_status: BookingStatus::Confirmed,
        })
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.additional_notes = (!notes.is_empty()).then_some(notes);
        self
    }
}
