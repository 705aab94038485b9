//! Runtime configuration for calendar storage.
//!
//! # Responsibility
//! - Provide defaults for the storage key and database location.
//!
//! # Invariants
//! - Plain values only; the core reads no environment variables.

use std::path::PathBuf;

/// Storage key used by the web widget this store is compatible with.
pub const DEFAULT_STORAGE_KEY: &str = "calendarEvents";
const DEFAULT_DB_FILE_NAME: &str = "daygrid.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    /// Key the event blob is stored under.
    pub storage_key: String,
    /// SQLite file used by the default backend.
    pub db_path: PathBuf,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
        }
    }
}

impl CalendarConfig {
    /// Defaults with the database stored at `db_path`.
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }
}
