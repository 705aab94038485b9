//! Calendar use-case service.
//!
//! # Responsibility
//! - Load the event store once at open, failing soft on malformed blobs.
//! - Validate and apply add/edit/delete, persisting after every change.
//! - Produce annotated month grids and search-filtered day lists.
//!
//! # Invariants
//! - Mutations are staged on a copy; the live store changes only after the
//!   blob write succeeded.
//! - Deleting an unknown event is a no-op and performs no write.
//! - Log lines carry ids, dates and counts only, never titles or
//!   descriptions.

use crate::calendar::cell::{month_cells, CalendarCell};
use crate::calendar::clock::{Clock, SystemClock};
use crate::model::date_key::DateKey;
use crate::model::event::{Event, EventDraft, EventId};
use crate::model::time::TimeOfDay;
use crate::repo::blob_repo::{BlobRepository, RepoError, RepoResult};
use crate::store::event_store::{ConflictError, EventStore, StoreError, StoreResult};
use crate::store::snapshot::{decode_or_empty, encode};
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error surfaced to presentation callers.
#[derive(Debug)]
pub enum ServiceError {
    /// Submitted interval overlaps another event that day.
    Conflict(ConflictError),
    /// Edit referenced an unknown event.
    NotFound { date: DateKey, event_id: EventId },
    /// Blob backend failed to read or write.
    Repo(RepoError),
    /// Store could not be serialized.
    Encode(serde_json::Error),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(err) => write!(f, "{err}"),
            Self::NotFound { date, event_id } => {
                write!(f, "event not found: {event_id} on {date}")
            }
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode calendar blob: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Conflict(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Repo(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl ServiceError {
    /// Stable machine-readable code for logs and FFI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Conflict(_) => "conflict",
            Self::NotFound { .. } => "not_found",
            Self::Repo(_) => "storage",
            Self::Encode(_) => "encode",
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(err) => Self::Conflict(err),
            StoreError::NotFound { date, event_id } => Self::NotFound { date, event_id },
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Calendar facade over a blob repository.
pub struct CalendarService<R: BlobRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    storage_key: String,
    store: EventStore,
}

impl<R: BlobRepository> CalendarService<R> {
    /// Opens the service on the host clock.
    pub fn open(repo: R, storage_key: impl Into<String>) -> ServiceResult<Self> {
        Self::open_with_clock(repo, storage_key, SystemClock)
    }
}

impl<R: BlobRepository, C: Clock> CalendarService<R, C> {
    /// Opens the service and loads the persisted store.
    ///
    /// # Errors
    /// - Returns `Repo` when the backend cannot be read. Stored bytes that
    ///   are not text or fail to decode are not an error; they yield an
    ///   empty store.
    pub fn open_with_clock(
        repo: R,
        storage_key: impl Into<String>,
        clock: C,
    ) -> ServiceResult<Self> {
        let storage_key = storage_key.into();
        let started_at = Instant::now();

        let store = match load_store(&repo, &storage_key) {
            Ok(store) => store,
            Err(err) => {
                error!(
                    "event=store_load module=service status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };

        info!(
            "event=store_load module=service status=ok days={} events={} duration_ms={}",
            store.days().len(),
            store.event_count(),
            started_at.elapsed().as_millis()
        );

        Ok(Self {
            repo,
            clock,
            storage_key,
            store,
        })
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Builds the 42-cell grid for the month of `reference`.
    ///
    /// Cell events are filtered by `search_term`; an empty term keeps all.
    /// Returns `None` for months at the edge of the representable range.
    pub fn get_grid(
        &self,
        reference: NaiveDate,
        selected: Option<NaiveDate>,
        search_term: &str,
    ) -> Option<Vec<CalendarCell>> {
        month_cells(reference, selected, &self.clock, |key| {
            self.store.search(key, search_term)
        })
    }

    /// Day list for display, filtered by `search_term`.
    pub fn get_events_for_display(&self, date: &DateKey, search_term: &str) -> Vec<Event> {
        self.store.search(date, search_term)
    }

    pub fn has_conflict(
        &self,
        start: TimeOfDay,
        end: TimeOfDay,
        date: &DateKey,
        exclude: Option<&EventId>,
    ) -> bool {
        self.store.has_conflict(start, end, date, exclude)
    }

    /// Adds an event and persists the store.
    pub fn submit_new_event(&mut self, date: DateKey, draft: EventDraft) -> ServiceResult<Event> {
        self.mutate("event_add", date, |store| store.add_event(date, draft))
    }

    /// Edits an event in place and persists the store.
    pub fn submit_edited_event(
        &mut self,
        date: DateKey,
        event_id: &EventId,
        draft: EventDraft,
    ) -> ServiceResult<Event> {
        self.mutate("event_edit", date, |store| {
            store.edit_event(date, event_id, draft)
        })
    }

    /// Removes an event; unknown ids are a silent no-op.
    pub fn remove_event(&mut self, date: &DateKey, event_id: &EventId) -> ServiceResult<()> {
        if self.store.find_event(date, event_id).is_none() {
            debug!("event=event_delete module=service status=noop date={date} event_id={event_id}");
            return Ok(());
        }
        self.mutate("event_delete", *date, |store| {
            store.delete_event(date, event_id);
            Ok(())
        })
    }

    /// Re-reads the persisted blob, replacing the live store.
    pub fn reload(&mut self) -> ServiceResult<()> {
        self.store = load_store(&self.repo, &self.storage_key)?;
        info!(
            "event=store_reload module=service status=ok events={}",
            self.store.event_count()
        );
        Ok(())
    }

    fn mutate<T>(
        &mut self,
        operation: &'static str,
        date: DateKey,
        apply: impl FnOnce(&mut EventStore) -> StoreResult<T>,
    ) -> ServiceResult<T> {
        let started_at = Instant::now();
        let mut staged = self.store.clone();

        let result = match apply(&mut staged) {
            Ok(value) => self.persist(&staged).map(|()| value),
            Err(err) => Err(err.into()),
        };

        match &result {
            Ok(_) => {
                self.store = staged;
                info!(
                    "event={operation} module=service status=ok date={date} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
            }
            Err(ServiceError::Conflict(conflict)) => warn!(
                "event={operation} module=service status=rejected error_code=conflict date={date} conflicting_id={}",
                conflict.conflicting_id
            ),
            Err(err) => error!(
                "event={operation} module=service status=error error_code={} date={date} duration_ms={} error={err}",
                err.code(),
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    fn persist(&mut self, store: &EventStore) -> ServiceResult<()> {
        let blob = encode(store)?;
        self.repo.save(&self.storage_key, &blob)?;
        Ok(())
    }
}

/// Loads and decodes the persisted store, failing soft on malformed data.
fn load_store<R: BlobRepository>(repo: &R, storage_key: &str) -> RepoResult<EventStore> {
    match repo.load(storage_key) {
        Ok(blob) => Ok(decode_or_empty(blob.as_deref())),
        Err(err @ RepoError::MalformedBlob { .. }) => {
            warn!("event=store_load module=service status=fallback_empty error={err}");
            Ok(EventStore::new())
        }
        Err(err) => Err(err),
    }
}
