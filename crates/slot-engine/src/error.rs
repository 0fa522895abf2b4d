//! Error types for slot-engine boundary operations.
//!
//! Slot generation and conflict filtering never fail; degraded input is
//! reported through their result types instead. These errors cover the
//! operations that parse caller-supplied identifiers and documents.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    #[error("Invalid day of week: {0} (expected 0-6)")]
    InvalidDay(u8),

    #[error("Duration out of range: {0} minutes")]
    InvalidDuration(i64),

    #[error("Event type is required")]
    MissingEventType,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
