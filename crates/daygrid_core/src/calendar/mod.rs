//! Month grid generation and day classification.
//!
//! # Responsibility
//! - Expand a reference month into a fixed 6x7 grid of full weeks.
//! - Classify days (same day, today, in month, weekend) for rendering.
//! - Attach per-day events to grid cells.
//!
//! # Invariants
//! - A grid always has exactly 42 cells, Sunday through Saturday.
//! - "Today" is read from a [`clock::Clock`] on every call, never cached.

pub mod cell;
pub mod clock;
pub mod grid;
