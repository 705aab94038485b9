//! Event text search.
//!
//! # Responsibility
//! - Filter one day's events by a free-text term for display.
//! - Keep matching rules in core so every shell filters the same way.

pub mod substring;
