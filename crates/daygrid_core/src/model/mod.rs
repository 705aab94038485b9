//! Domain model for calendar events.
//!
//! # Responsibility
//! - Define the canonical event record and its value types.
//! - Own the string forms used on the wire (`HH:MM`, `YYYY-MM-DD`).
//!
//! # Invariants
//! - Every event is identified by a stable `EventId`.
//! - Times are minute-precision offsets from local midnight, never instants.

pub mod date_key;
pub mod event;
pub mod time;
