//! Case-insensitive substring filter over event text.
//!
//! # Invariants
//! - Only the empty term matches everything; whitespace is searched for.
//! - Filtering never reorders events.

use crate::model::event::Event;

/// Normalized search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    needle: Option<String>,
}

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        let needle = (!raw.is_empty()).then(|| raw.to_lowercase());
        Self { needle }
    }

    /// Returns whether this term filters nothing.
    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    /// Matches against `title` OR `description`.
    pub fn matches(&self, event: &Event) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => {
                event.title.to_lowercase().contains(needle.as_str())
                    || event.description.to_lowercase().contains(needle.as_str())
            }
        }
    }
}

/// Returns the events matching `term`, preserving input order.
pub fn filter_events(events: &[Event], term: &str) -> Vec<Event> {
    let term = SearchTerm::new(term);
    if term.is_empty() {
        return events.to_vec();
    }
    events
        .iter()
        .filter(|event| term.matches(event))
        .cloned()
        .collect()
}
