//! Grid cells annotated with day flags and events.

use crate::calendar::clock::Clock;
use crate::calendar::grid::{date_key, days_in_month, is_in_month, is_same_day, is_weekend};
use crate::model::date_key::DateKey;
use crate::model::event::Event;
use chrono::NaiveDate;
use serde::Serialize;

/// Titles shown inline in a month cell before collapsing to `+N more`.
pub const PREVIEW_TITLE_LIMIT: usize = 2;

/// One rendered day of the month grid. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub date_key: DateKey,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_weekend: bool,
    /// Events for this day, already filtered by the active search term.
    pub events: Vec<Event>,
}

/// Compact summary of a cell's events for the month view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPreview {
    pub event_count: usize,
    pub titles: Vec<String>,
    /// Events not covered by `titles`.
    pub overflow: usize,
}

impl CalendarCell {
    pub fn preview(&self) -> CellPreview {
        let titles: Vec<String> = self
            .events
            .iter()
            .take(PREVIEW_TITLE_LIMIT)
            .map(|event| event.title.clone())
            .collect();
        CellPreview {
            event_count: self.events.len(),
            overflow: self.events.len() - titles.len(),
            titles,
        }
    }
}

/// Builds the 42 cells for the month containing `reference`.
///
/// `events_for` supplies the (possibly filtered) events of each day.
/// Returns `None` when the month's grid is not representable.
pub fn month_cells<C, F>(
    reference: NaiveDate,
    selected: Option<NaiveDate>,
    clock: &C,
    mut events_for: F,
) -> Option<Vec<CalendarCell>>
where
    C: Clock + ?Sized,
    F: FnMut(&DateKey) -> Vec<Event>,
{
    let days = days_in_month(reference)?;
    let cells = days
        .into_iter()
        .map(|date| {
            let key = date_key(date);
            CalendarCell {
                date,
                is_current_month: is_in_month(date, reference),
                is_today: clock.is_today(date),
                is_selected: is_same_day(Some(date), selected),
                is_weekend: is_weekend(date),
                events: events_for(&key),
                date_key: key,
            }
        })
        .collect();
    Some(cells)
}
