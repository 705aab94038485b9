//! Core domain logic for DayGrid.
//! This crate is the single source of truth for calendar invariants.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod session;
pub mod store;

pub use calendar::cell::{month_cells, CalendarCell, CellPreview};
pub use calendar::clock::{Clock, FixedClock, SystemClock};
pub use calendar::grid::{
    date_key, days_in_month, is_in_month, is_same_day, is_today, is_weekend, shift_month,
    GRID_CELLS, WEEKDAY_LABELS,
};
pub use config::CalendarConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date_key::{DateKey, DateKeyParseError};
pub use model::event::{Event, EventDraft, EventId};
pub use model::time::{TimeOfDay, TimeParseError};
pub use repo::blob_repo::{BlobRepository, RepoError, RepoResult, SqliteBlobRepository};
pub use repo::file_repo::FileBlobRepository;
pub use repo::memory_repo::MemoryBlobRepository;
pub use service::calendar_service::{CalendarService, ServiceError, ServiceResult};
pub use session::app_state::{AppState, SubmitError, TransitionError};
pub use session::dialog::{DialogError, DialogErrorCode, DialogMode, DialogState, DraftForm};
pub use store::event_store::{ConflictError, EventStore, StoreError};
pub use store::snapshot::MalformedStorageError;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
