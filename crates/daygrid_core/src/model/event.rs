//! Timed event record and submission draft.
//!
//! # Responsibility
//! - Define the persisted event shape (`id, title, startTime, endTime,
//!   description, date`).
//! - Define the draft payload accepted by add/edit operations.
//!
//! # Invariants
//! - `id` is stable for the event lifetime and never reassigned on edit.
//! - `date` always equals the store key the event is filed under.
//! - `start_time < end_time` is expected but not enforced here.

use crate::model::date_key::DateKey;
use crate::model::time::TimeOfDay;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque event identifier.
///
/// New ids are UUID v4 strings. Numeric ids found in older blobs are kept as
/// their decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawEventId", into = "String")]
pub struct EventId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEventId {
    Text(String),
    Number(u64),
}

impl From<RawEventId> for EventId {
    fn from(value: RawEventId) -> Self {
        match value {
            RawEventId::Text(text) => Self(text),
            RawEventId::Number(number) => Self(number.to_string()),
        }
    }
}

impl From<EventId> for String {
    fn from(value: EventId) -> Self {
        value.0
    }
}

impl EventId {
    /// Generates a fresh, globally unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Event stored under one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    /// Display title; empty titles are allowed by core.
    pub title: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Empty string when the user left it blank.
    #[serde(default)]
    pub description: String,
    pub date: DateKey,
}

impl Event {
    /// Materializes a draft under `date` with the given id.
    pub fn from_draft(id: EventId, date: DateKey, draft: EventDraft) -> Self {
        Self {
            id,
            title: draft.title,
            start_time: draft.start_time,
            end_time: draft.end_time,
            description: draft.description,
            date,
        }
    }

    /// Returns whether `[start_time, end_time)` differs from the given range.
    pub fn interval_differs(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.start_time != start || self.end_time != end
    }

    /// Returns the editable fields as a draft (edit dialog pre-fill).
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description.clone(),
        }
    }
}

/// User-entered event payload pending validation by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub description: String,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            title: title.into(),
            start_time,
            end_time,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
