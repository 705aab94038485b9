//! JSON snapshot codec for the event store.
//!
//! # Responsibility
//! - Serialize the full store as one blob (`{"YYYY-MM-DD": [event, ...]}`).
//! - Decode blobs written by this crate or by the original web widget.
//!
//! # Invariants
//! - Decoding never panics; malformed input is reported as an error value.
//! - A decoded store always satisfies the key/date invariant.

use crate::model::date_key::DateKey;
use crate::model::event::Event;
use crate::store::event_store::EventStore;
use log::warn;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Persisted blob failed to decode.
#[derive(Debug)]
pub struct MalformedStorageError {
    source: serde_json::Error,
}

impl Display for MalformedStorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "malformed calendar blob at line {} column {}: {}",
            self.source.line(),
            self.source.column(),
            self.source
        )
    }
}

impl Error for MalformedStorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Serializes the whole store.
pub fn encode(store: &EventStore) -> Result<String, serde_json::Error> {
    serde_json::to_string(store)
}

/// Decodes a blob into a store.
///
/// Mismatched `event.date` values are repaired from the key, see
/// [`EventStore::from_days`].
pub fn decode(blob: &str) -> Result<EventStore, MalformedStorageError> {
    let days: BTreeMap<DateKey, Vec<Event>> =
        serde_json::from_str(blob).map_err(|source| MalformedStorageError { source })?;
    let (store, restamped) = EventStore::from_days(days);
    if restamped > 0 {
        warn!("event=snapshot_decode module=store status=repaired restamped_events={restamped}");
    }
    Ok(store)
}

/// Decodes a blob, falling back to an empty store when it is malformed.
///
/// `None` (nothing persisted yet) also yields an empty store.
pub fn decode_or_empty(blob: Option<&str>) -> EventStore {
    let Some(blob) = blob else {
        return EventStore::new();
    };
    match decode(blob) {
        Ok(store) => store,
        Err(err) => {
            warn!(
                "event=snapshot_decode module=store status=fallback_empty bytes={} error={err}",
                blob.len()
            );
            EventStore::new()
        }
    }
}
