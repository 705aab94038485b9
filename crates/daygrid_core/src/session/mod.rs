//! Explicit UI session state.
//!
//! # Responsibility
//! - Model selection, navigation, search and the add/edit dialog as plain
//!   serializable values with named transitions.
//! - Drive store mutations from dialog submission.
//!
//! # Invariants
//! - `reference_month` is always the first day of a month.
//! - A dialog is bound to the date key it was opened for.

pub mod app_state;
pub mod dialog;
