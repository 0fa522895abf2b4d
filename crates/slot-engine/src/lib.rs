//! # slot-engine
//!
//! Bookable time-slot generation for scheduling pages.
//!
//! Given a weekly availability set, a calendar date and an event duration,
//! the engine produces the ordered list of meeting starts a booker can pick,
//! then removes the ones that collide with existing bookings. Everything here
//! is pure and synchronous; callers fetch availability and bookings first.
//!
//! ## Modules
//!
//! - [`day`] — native (Sun=0) vs storage (Mon=1..Sun=7) weekdays, clock strings
//! - [`availability`] — availability records, per-day lookup, set resolution
//! - [`slots`] — date + availability + duration → candidate slots
//! - [`conflict`] — drop slots overlapping non-cancelled bookings
//! - [`booking`] — booking and event-type records, booking drafts
//! - [`schedule`] — editor view of a weekly schedule and its summary
//! - [`format`] — slot labels and static picker tables
//! - [`error`] — Error types

pub mod availability;
pub mod booking;
pub mod conflict;
pub mod day;
pub mod error;
pub mod format;
pub mod schedule;
pub mod slots;

pub use availability::{
    days_with_availability, has_availability, intervals_for, resolve_availability,
    AvailabilitySet, RecordId, WeeklyInterval,
};
pub use booking::{Booking, BookingDraft, BookingStatus, EventType};
pub use conflict::{filter_booked_slots, FilteredSlots};
pub use day::{to_native_day, to_storage_day, NativeDay, StorageDay};
pub use error::SlotError;
pub use schedule::WeeklySchedule;
pub use slots::{generate_slots, generate_slots_for_set, SlotGeneration, TimeSlot};
