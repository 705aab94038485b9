//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations with write-through persistence.
//! - Expose the collaborator API consumed by UI shells.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod calendar_service;
