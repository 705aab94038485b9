//! Blob persistence capability and its backends.
//!
//! # Responsibility
//! - Define the load/save contract used to persist the event store.
//! - Keep file and SQLite details out of the service layer.
//!
//! # Invariants
//! - `load` returns `Ok(None)` for a key that was never saved.
//! - `save` fully overwrites the previous blob for that key.

pub mod blob_repo;
pub mod file_repo;
pub mod memory_repo;
