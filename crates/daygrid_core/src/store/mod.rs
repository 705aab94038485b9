//! In-memory event store and its persisted snapshot form.
//!
//! # Responsibility
//! - Hold the `date key -> ordered events` mapping.
//! - Enforce per-day interval exclusivity on add/edit.
//! - Encode/decode the mapping as one JSON blob.
//!
//! # Invariants
//! - Every event under key `K` has `event.date == K`.
//! - No two events under one key overlap, except pre-existing overlaps that
//!   were loaded from storage as-is.

pub mod conflict;
pub mod event_store;
pub mod snapshot;
