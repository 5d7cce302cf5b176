//! # Booksync Availability
//!
//! Computes which appointment slots are actually free. Busy intervals arrive
//! as absolute instants (whatever timezone the calendar reported them in);
//! the candidate grid is laid out in wall-clock time in a named timezone;
//! any candidate overlapping a busy interval is dropped.
//!
//! ## Algorithm
//!
//! 1. For each calendar day in the closed window, enumerate candidate starts
//!    within working hours at a fixed step of wall-clock minutes.
//! 2. Resolve each candidate's local start to an absolute instant through the
//!    grid timezone; the slot end is `start + interval`.
//! 3. Keep the candidate iff no busy interval `[b.start, b.end)` satisfies
//!    `slot_start < b.end && slot_end > b.start` (half-open: touching
//!    boundaries never count as overlap).
//!
//! The output is ordered day-then-time, so the first element is the earliest
//! available slot; downstream "suggest one slot" selection relies on this.

/// Slot-grid generation and busy filtering
pub mod engine;
/// Grouped-by-day rendering for the text generator
pub mod render;

pub use engine::{AvailabilityConfig, WorkingHours, available_slots};
pub use render::render_slots_by_day;
