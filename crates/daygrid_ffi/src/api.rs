//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose month grid, day list and event mutations to Dart via FRB.
//! - Translate core errors into flat envelopes with stable error codes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Dates cross the boundary as `YYYY-MM-DD`, times as `HH:MM`.
//! - Calendar calls are serialized per process so whole-blob writes never
//!   interleave.

use daygrid_core::db::open_db;
use daygrid_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CalendarCell, CalendarConfig, CalendarService, DateKey, Event, EventDraft, EventId,
    ServiceError, SqliteBlobRepository, TimeOfDay, WEEKDAY_LABELS,
};
use log::warn;
use std::sync::{Mutex, OnceLock, PoisonError};

const DB_PATH_ENV: &str = "DAYGRID_DB_PATH";
static CALENDAR_CONFIG: OnceLock<CalendarConfig> = OnceLock::new();
static CALENDAR_LOCK: Mutex<()> = Mutex::new(());

const INVALID_INPUT: &str = "invalid_input";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Event projection for Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEventItem {
    pub event_id: String,
    pub title: String,
    /// `HH:MM`.
    pub start_time: String,
    /// `HH:MM`.
    pub end_time: String,
    pub description: String,
    /// `YYYY-MM-DD`.
    pub date: String,
}

/// One month-grid cell with its preview summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCellItem {
    pub date: String,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_weekend: bool,
    pub event_count: u32,
    /// First titles shown inside the cell.
    pub preview_titles: Vec<String>,
    /// Events beyond `preview_titles` ("+N more").
    pub overflow_count: u32,
    pub events: Vec<CalendarEventItem>,
}

/// Month grid envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGridResponse {
    pub ok: bool,
    /// 42 cells, Sunday-first, or empty on failure.
    pub cells: Vec<CalendarCellItem>,
    pub weekday_labels: Vec<String>,
    pub message: String,
}

/// Day list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEventsResponse {
    pub ok: bool,
    pub events: Vec<CalendarEventItem>,
    pub message: String,
}

/// Mutation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarActionResponse {
    pub ok: bool,
    /// Saved event ID on add/edit success.
    pub event_id: Option<String>,
    /// `conflict|not_found|storage|encode|invalid_input` on failure.
    pub error_code: Option<String>,
    /// Colliding event for `conflict` failures.
    pub conflicting_id: Option<String>,
    pub message: String,
}

impl CalendarActionResponse {
    fn success(message: impl Into<String>, event_id: Option<String>) -> Self {
        Self {
            ok: true,
            event_id,
            error_code: None,
            conflicting_id: None,
            message: message.into(),
        }
    }

    fn failure(operation: &str, err: ApiError) -> Self {
        Self {
            ok: false,
            event_id: None,
            error_code: Some(err.code.to_string()),
            conflicting_id: err.conflicting_id,
            message: format!("{operation} failed: {}", err.message),
        }
    }
}

/// Builds the month grid around `reference_date`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `selected_date` may be `None` or blank; `search_term` may be blank.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_grid(
    reference_date: String,
    selected_date: Option<String>,
    search_term: String,
) -> CalendarGridResponse {
    let weekday_labels = WEEKDAY_LABELS.iter().map(|label| label.to_string()).collect();
    let result = parse_date(&reference_date).and_then(|reference| {
        let selected = parse_optional_date(selected_date.as_deref())?;
        with_calendar(|service| {
            service
                .get_grid(reference.date(), selected.map(DateKey::date), &search_term)
                .ok_or_else(|| ApiError::invalid_input("reference month is out of range"))
        })
    });

    match result {
        Ok(cells) => CalendarGridResponse {
            ok: true,
            cells: cells.iter().map(to_cell_item).collect(),
            weekday_labels,
            message: String::new(),
        },
        Err(err) => CalendarGridResponse {
            ok: false,
            cells: Vec::new(),
            weekday_labels,
            message: format!("calendar_grid failed: {}", err.message),
        },
    }
}

/// Lists one day's events filtered by `search_term`.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_day_events(date: String, search_term: String) -> CalendarEventsResponse {
    let result = parse_date(&date).and_then(|key| {
        with_calendar(|service| Ok(service.get_events_for_display(&key, &search_term)))
    });

    match result {
        Ok(events) => {
            let message = if events.is_empty() {
                "No events.".to_string()
            } else {
                format!("Found {} event(s).", events.len())
            };
            CalendarEventsResponse {
                ok: true,
                events: events.iter().map(to_event_item).collect(),
                message,
            }
        }
        Err(err) => CalendarEventsResponse {
            ok: false,
            events: Vec::new(),
            message: format!("calendar_day_events failed: {}", err.message),
        },
    }
}

/// Adds an event on `date`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Rejects overlapping intervals with `error_code = conflict`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_add_event(
    date: String,
    title: String,
    start_time: String,
    end_time: String,
    description: String,
) -> CalendarActionResponse {
    let result = parse_date(&date).and_then(|key| {
        let draft = parse_draft(title, &start_time, &end_time, description)?;
        with_calendar(|service| Ok(service.submit_new_event(key, draft)?))
    });

    match result {
        Ok(event) => CalendarActionResponse::success("Event added.", Some(event.id.to_string())),
        Err(err) => CalendarActionResponse::failure("calendar_add_event", err),
    }
}

/// Replaces the fields of an existing event, keeping its ID.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_edit_event(
    date: String,
    event_id: String,
    title: String,
    start_time: String,
    end_time: String,
    description: String,
) -> CalendarActionResponse {
    let event_id = EventId::new(event_id.trim());
    let result = parse_date(&date).and_then(|key| {
        let draft = parse_draft(title, &start_time, &end_time, description)?;
        with_calendar(|service| Ok(service.submit_edited_event(key, &event_id, draft)?))
    });

    match result {
        Ok(event) => CalendarActionResponse::success("Event updated.", Some(event.id.to_string())),
        Err(err) => CalendarActionResponse::failure("calendar_edit_event", err),
    }
}

/// Deletes an event; unknown IDs succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_delete_event(date: String, event_id: String) -> CalendarActionResponse {
    let event_id = EventId::new(event_id.trim());
    let result = parse_date(&date)
        .and_then(|key| with_calendar(|service| Ok(service.remove_event(&key, &event_id)?)));

    match result {
        Ok(()) => CalendarActionResponse::success("Event deleted.", None),
        Err(err) => CalendarActionResponse::failure("calendar_delete_event", err),
    }
}

#[derive(Debug)]
struct ApiError {
    code: &'static str,
    message: String,
    conflicting_id: Option<String>,
}

impl ApiError {
    fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_INPUT,
            message: message.into(),
            conflicting_id: None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        let conflicting_id = match &value {
            ServiceError::Conflict(conflict) => Some(conflict.conflicting_id.to_string()),
            _ => None,
        };
        Self {
            code: value.code(),
            message: value.to_string(),
            conflicting_id,
        }
    }
}

fn resolve_config() -> &'static CalendarConfig {
    CALENDAR_CONFIG.get_or_init(|| config_from_db_path_env(std::env::var(DB_PATH_ENV).ok()))
}

fn config_from_db_path_env(raw: Option<String>) -> CalendarConfig {
    match raw.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => CalendarConfig::with_db_path(path),
        _ => CalendarConfig::default(),
    }
}

fn with_calendar<T>(
    f: impl FnOnce(&mut CalendarService<SqliteBlobRepository<'_>>) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let _guard = CALENDAR_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let config = resolve_config();
    let conn = open_db(&config.db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        ApiError {
            code: "storage",
            message: format!("calendar DB open failed: {err}"),
            conflicting_id: None,
        }
    })?;
    let mut service =
        CalendarService::open(SqliteBlobRepository::new(&conn), config.storage_key.clone())?;
    f(&mut service)
}

fn parse_date(raw: &str) -> Result<DateKey, ApiError> {
    DateKey::parse(raw.trim()).map_err(|err| ApiError::invalid_input(err.to_string()))
}

fn parse_optional_date(raw: Option<&str>) -> Result<Option<DateKey>, ApiError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => parse_date(value).map(Some),
        _ => Ok(None),
    }
}

fn parse_draft(
    title: String,
    start_time: &str,
    end_time: &str,
    description: String,
) -> Result<EventDraft, ApiError> {
    let start = TimeOfDay::parse(start_time)
        .map_err(|err| ApiError::invalid_input(format!("start time: {err}")))?;
    let end = TimeOfDay::parse(end_time)
        .map_err(|err| ApiError::invalid_input(format!("end time: {err}")))?;
    Ok(EventDraft::new(title, start, end).with_description(description))
}

fn to_event_item(event: &Event) -> CalendarEventItem {
    CalendarEventItem {
        event_id: event.id.to_string(),
        title: event.title.clone(),
        start_time: event.start_time.to_string(),
        end_time: event.end_time.to_string(),
        description: event.description.clone(),
        date: event.date.to_string(),
    }
}

fn to_cell_item(cell: &CalendarCell) -> CalendarCellItem {
    let preview = cell.preview();
    CalendarCellItem {
        date: cell.date_key.to_string(),
        is_current_month: cell.is_current_month,
        is_today: cell.is_today,
        is_selected: cell.is_selected,
        is_weekend: cell.is_weekend,
        event_count: count_u32(preview.event_count),
        preview_titles: preview.titles,
        overflow_count: count_u32(preview.overflow),
        events: cell.events.iter().map(to_event_item).collect(),
    }
}

fn count_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        calendar_add_event, calendar_day_events, calendar_delete_event, calendar_edit_event,
        calendar_grid, config_from_db_path_env, core_version, init_logging, ping,
        CALENDAR_CONFIG,
    };
    use daygrid_core::CalendarConfig;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    // Every test pins the per-process database before the first calendar call.
    fn use_test_db() {
        CALENDAR_CONFIG.get_or_init(|| {
            let db_path = std::env::temp_dir()
                .join(format!("daygrid-ffi-test-{}.sqlite3", std::process::id()));
            let _ = std::fs::remove_file(&db_path);
            CalendarConfig::with_db_path(db_path)
        });
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    fn add(date: &str, title: &str, start: &str, end: &str) -> super::CalendarActionResponse {
        calendar_add_event(
            date.to_string(),
            title.to_string(),
            start.to_string(),
            end.to_string(),
            String::new(),
        )
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn db_path_env_value_is_trimmed_and_blank_is_ignored() {
        let config = config_from_db_path_env(Some(" /data/cal.db ".to_string()));
        assert_eq!(config.db_path, PathBuf::from("/data/cal.db"));

        assert_eq!(
            config_from_db_path_env(Some("   ".to_string())),
            CalendarConfig::default()
        );
        assert_eq!(config_from_db_path_env(None), CalendarConfig::default());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn add_then_list_and_search() {
        use_test_db();
        let token = unique_token("standup");
        let created = add("2031-03-04", &token, "09:00", "09:15");
        assert!(created.ok, "{}", created.message);
        let event_id = created.event_id.expect("add should return event_id");

        let listed = calendar_day_events("2031-03-04".to_string(), token.to_uppercase());
        assert!(listed.ok, "{}", listed.message);
        assert_eq!(listed.events.len(), 1);
        assert_eq!(listed.events[0].event_id, event_id);
        assert_eq!(listed.events[0].start_time, "09:00");
    }

    #[test]
    fn overlapping_add_reports_conflict_and_colliding_id() {
        use_test_db();
        let first = add("2031-04-10", "focus", "13:00", "14:00");
        assert!(first.ok, "{}", first.message);

        let clash = add("2031-04-10", "clash", "13:30", "14:30");
        assert!(!clash.ok);
        assert_eq!(clash.error_code.as_deref(), Some("conflict"));
        assert_eq!(clash.conflicting_id, first.event_id);

        let adjacent = add("2031-04-10", "next", "14:00", "15:00");
        assert!(adjacent.ok, "{}", adjacent.message);
    }

    #[test]
    fn edit_and_delete_round_trip() {
        use_test_db();
        let created = add("2031-05-20", "draft", "10:00", "11:00");
        let event_id = created.event_id.expect("add should return event_id");

        let edited = calendar_edit_event(
            "2031-05-20".to_string(),
            event_id.clone(),
            "final".to_string(),
            "10:30".to_string(),
            "11:30".to_string(),
            "notes".to_string(),
        );
        assert!(edited.ok, "{}", edited.message);
        assert_eq!(edited.event_id.as_deref(), Some(event_id.as_str()));

        let deleted = calendar_delete_event("2031-05-20".to_string(), event_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        let listed = calendar_day_events("2031-05-20".to_string(), String::new());
        assert!(listed.events.iter().all(|event| event.event_id != event_id));

        let missing = calendar_edit_event(
            "2031-05-20".to_string(),
            event_id,
            "gone".to_string(),
            "10:00".to_string(),
            "11:00".to_string(),
            String::new(),
        );
        assert_eq!(missing.error_code.as_deref(), Some("not_found"));
    }

    #[test]
    fn invalid_inputs_are_rejected_without_panicking() {
        use_test_db();
        let bad_date = add("2031-13-01", "x", "09:00", "10:00");
        assert_eq!(bad_date.error_code.as_deref(), Some("invalid_input"));

        let bad_time = add("2031-06-01", "x", "25:00", "10:00");
        assert_eq!(bad_time.error_code.as_deref(), Some("invalid_input"));

        let grid = calendar_grid("nope".to_string(), None, String::new());
        assert!(!grid.ok);
        assert!(grid.cells.is_empty());
    }

    #[test]
    fn grid_has_42_cells_with_preview() {
        use_test_db();
        let day = "2031-07-15";
        let slots = [
            ("a", "08:00", "09:00"),
            ("b", "09:00", "10:00"),
            ("c", "10:00", "11:00"),
        ];
        for (title, start, end) in slots {
            let response = add(day, title, start, end);
            assert!(response.ok, "{}", response.message);
        }

        let grid = calendar_grid("2031-07-01".to_string(), Some(day.to_string()), String::new());
        assert!(grid.ok, "{}", grid.message);
        assert_eq!(grid.cells.len(), 42);
        assert_eq!(grid.weekday_labels.len(), 7);

        let cell = grid.cells.iter().find(|cell| cell.date == day).expect("cell");
        assert!(cell.is_selected);
        assert!(cell.is_current_month);
        assert_eq!(cell.event_count, 3);
        assert_eq!(cell.preview_titles.len(), 2);
        assert_eq!(cell.overflow_count, cell.event_count - 2);
    }
}
