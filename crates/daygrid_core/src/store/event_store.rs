//! Event store operations.
//!
//! # Responsibility
//! - Provide add/edit/delete/query over the day-keyed event mapping.
//! - Reject interval conflicts before mutating.
//!
//! # Invariants
//! - Failed operations leave the store untouched.
//! - Day lists keep insertion order; edits keep list position.
//! - Empty day lists are pruned, so the mapping never holds `key -> []`.

use crate::model::date_key::DateKey;
use crate::model::event::{Event, EventDraft, EventId};
use crate::model::time::TimeOfDay;
use crate::search::substring::filter_events;
use crate::store::conflict::find_conflict;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// New or edited interval overlaps an existing event on the same day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictError {
    pub date: DateKey,
    /// Id of the event the submitted interval collides with.
    pub conflicting_id: EventId,
}

impl Display for ConflictError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "time conflict with existing event {} on {}",
            self.conflicting_id, self.date
        )
    }
}

impl Error for ConflictError {}

/// Store-level error for validated mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Conflict(ConflictError),
    NotFound { date: DateKey, event_id: EventId },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(err) => write!(f, "{err}"),
            Self::NotFound { date, event_id } => {
                write!(f, "event not found: {event_id} on {date}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Conflict(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ConflictError> for StoreError {
    fn from(value: ConflictError) -> Self {
        Self::Conflict(value)
    }
}

/// Day-keyed event mapping.
///
/// Only `Serialize` is derived; decoding goes through
/// [`crate::store::snapshot::decode`] so the key/date invariant is restored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventStore {
    days: BTreeMap<DateKey, Vec<Event>>,
}

impl EventStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a raw mapping, restoring the key/date invariant.
    ///
    /// Events whose `date` disagrees with their key are re-stamped with the
    /// key. Empty day lists are dropped. Returns the store and the number of
    /// re-stamped events.
    pub fn from_days(days: BTreeMap<DateKey, Vec<Event>>) -> (Self, usize) {
        let mut restamped = 0;
        let days = days
            .into_iter()
            .filter(|(_, events)| !events.is_empty())
            .map(|(key, mut events)| {
                for event in events.iter_mut().filter(|event| event.date != key) {
                    event.date = key;
                    restamped += 1;
                }
                (key, events)
            })
            .collect();
        (Self { days }, restamped)
    }

    /// Read-only view of the whole mapping.
    pub fn days(&self) -> &BTreeMap<DateKey, Vec<Event>> {
        &self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total number of events across all days.
    pub fn event_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Events for one day in insertion order; empty when the day has none.
    pub fn events_for(&self, date: &DateKey) -> &[Event] {
        self.days.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find_event(&self, date: &DateKey, event_id: &EventId) -> Option<&Event> {
        self.events_for(date).iter().find(|event| &event.id == event_id)
    }

    /// Returns the event on `date` that collides with `[start, end)`.
    pub fn find_conflict(
        &self,
        start: TimeOfDay,
        end: TimeOfDay,
        date: &DateKey,
        exclude: Option<&EventId>,
    ) -> Option<&Event> {
        find_conflict(self.events_for(date), start, end, exclude)
    }

    /// Returns whether `[start, end)` collides with any event on `date`.
    pub fn has_conflict(
        &self,
        start: TimeOfDay,
        end: TimeOfDay,
        date: &DateKey,
        exclude: Option<&EventId>,
    ) -> bool {
        self.find_conflict(start, end, date, exclude).is_some()
    }

    /// Adds a new event under `date` with a freshly generated id.
    pub fn add_event(&mut self, date: DateKey, draft: EventDraft) -> StoreResult<Event> {
        self.ensure_free(date, draft.start_time, draft.end_time, None)?;

        let event = Event::from_draft(EventId::generate(), date, draft);
        self.days.entry(date).or_default().push(event.clone());
        Ok(event)
    }

    /// Replaces an existing event in place.
    ///
    /// The conflict check runs whenever either bound of the submitted
    /// interval differs from the stored one; the edited event itself is
    /// excluded from the check. `id` and `date` are kept.
    pub fn edit_event(
        &mut self,
        date: DateKey,
        event_id: &EventId,
        draft: EventDraft,
    ) -> StoreResult<Event> {
        let existing = self
            .find_event(&date, event_id)
            .ok_or_else(|| StoreError::NotFound {
                date,
                event_id: event_id.clone(),
            })?;

        if existing.interval_differs(draft.start_time, draft.end_time) {
            self.ensure_free(date, draft.start_time, draft.end_time, Some(event_id))?;
        }

        let updated = Event::from_draft(event_id.clone(), date, draft);
        if let Some(slot) = self
            .days
            .get_mut(&date)
            .and_then(|events| events.iter_mut().find(|event| &event.id == event_id))
        {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Removes an event; returns `false` when nothing matched.
    pub fn delete_event(&mut self, date: &DateKey, event_id: &EventId) -> bool {
        let Some(events) = self.days.get_mut(date) else {
            return false;
        };

        let before = events.len();
        events.retain(|event| &event.id != event_id);
        let removed = events.len() != before;
        if events.is_empty() {
            self.days.remove(date);
        }
        removed
    }

    /// Events on `date` whose title or description contains `term`
    /// (case-insensitive). An empty term returns the full day list.
    pub fn search(&self, date: &DateKey, term: &str) -> Vec<Event> {
        filter_events(self.events_for(date), term)
    }

    fn ensure_free(
        &self,
        date: DateKey,
        start: TimeOfDay,
        end: TimeOfDay,
        exclude: Option<&EventId>,
    ) -> Result<(), ConflictError> {
        match self.find_conflict(start, end, &date, exclude) {
            Some(conflicting) => Err(ConflictError {
                date,
                conflicting_id: conflicting.id.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EventStore, StoreError};
    use crate::model::date_key::DateKey;
    use crate::model::event::{EventDraft, EventId};
    use crate::model::time::TimeOfDay;
    use std::collections::BTreeMap;

    fn key(value: &str) -> DateKey {
        DateKey::parse(value).unwrap()
    }

    fn draft(title: &str, start: &str, end: &str) -> EventDraft {
        EventDraft::new(
            title,
            TimeOfDay::parse(start).unwrap(),
            TimeOfDay::parse(end).unwrap(),
        )
    }

    #[test]
    fn events_for_unknown_day_is_empty_slice() {
        let store = EventStore::new();
        assert!(store.events_for(&key("2024-01-01")).is_empty());
    }

    #[test]
    fn failed_add_does_not_mutate() {
        let mut store = EventStore::new();
        let day = key("2024-01-01");
        store.add_event(day, draft("a", "09:00", "10:00")).unwrap();
        let before = store.clone();

        let err = store.add_event(day, draft("b", "09:30", "09:45")).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store, before);
    }

    #[test]
    fn from_days_restamps_mismatched_dates_and_drops_empty_lists() {
        let mut source = EventStore::new();
        let day = key("2024-01-01");
        let event = source.add_event(day, draft("a", "09:00", "10:00")).unwrap();

        let mut moved = event.clone();
        moved.date = key("2030-06-06");
        let mut raw = BTreeMap::new();
        raw.insert(day, vec![moved]);
        raw.insert(key("2024-01-02"), Vec::new());

        let (store, restamped) = EventStore::from_days(raw);
        assert_eq!(restamped, 1);
        assert_eq!(store.days().len(), 1);
        assert_eq!(store.events_for(&day)[0].date, day);
    }

    #[test]
    fn edit_unknown_id_is_not_found() {
        let mut store = EventStore::new();
        let err = store
            .edit_event(key("2024-01-01"), &EventId::new("nope"), draft("x", "09:00", "10:00"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
