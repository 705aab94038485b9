//! Half-open interval conflict detection.
//!
//! All comparisons are done on minutes since midnight. Intervals are
//! `[start, end)`, so back-to-back events (`end == next start`) never
//! conflict.

use crate::model::event::{Event, EventId};
use crate::model::time::TimeOfDay;

/// Returns whether the new interval collides with the existing one.
///
/// Detects partial overlap from either side and full containment in both
/// directions. Ranges with `start >= end` are evaluated as given.
pub fn intervals_conflict(
    new_start: TimeOfDay,
    new_end: TimeOfDay,
    existing_start: TimeOfDay,
    existing_end: TimeOfDay,
) -> bool {
    let (s1, e1) = (new_start.minutes(), new_end.minutes());
    let (s2, e2) = (existing_start.minutes(), existing_end.minutes());

    (s1 >= s2 && s1 < e2) || (e1 > s2 && e1 <= e2) || (s1 <= s2 && e1 >= e2)
}

/// Returns the first event in `events` that collides with `[start, end)`.
///
/// The event whose id equals `exclude` is skipped (edit-in-place check).
pub fn find_conflict<'a>(
    events: &'a [Event],
    start: TimeOfDay,
    end: TimeOfDay,
    exclude: Option<&EventId>,
) -> Option<&'a Event> {
    events
        .iter()
        .filter(|event| exclude != Some(&event.id))
        .find(|event| intervals_conflict(start, end, event.start_time, event.end_time))
}
