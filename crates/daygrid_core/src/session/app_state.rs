//! Application state transitions for the calendar view.

use crate::calendar::clock::Clock;
use crate::calendar::grid::{first_of_month, shift_month};
use crate::model::date_key::DateKey;
use crate::model::event::{Event, EventId};
use crate::repo::blob_repo::BlobRepository;
use crate::service::calendar_service::CalendarService;
use crate::session::dialog::{DialogError, DialogMode, DialogState, DraftForm};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Transition attempted from a state that does not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// Add requires a selected day.
    NoSelectedDate,
    /// Another dialog is already open.
    DialogAlreadyOpen,
    /// Draft edits and submit require an open dialog.
    DialogClosed,
    /// Edit target is not in the store.
    UnknownEvent,
}

impl Display for TransitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSelectedDate => write!(f, "select a day before adding an event"),
            Self::DialogAlreadyOpen => write!(f, "event dialog is already open"),
            Self::DialogClosed => write!(f, "event dialog is not open"),
            Self::UnknownEvent => write!(f, "event to edit no longer exists"),
        }
    }
}

impl Error for TransitionError {}

/// Outcome of a rejected submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Submit was not a valid transition; state is unchanged.
    Transition(TransitionError),
    /// Submission was rejected; the dialog stays open with this error.
    Rejected(DialogError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transition(err) => write!(f, "{err}"),
            Self::Rejected(err) => write!(f, "{}", err.message),
        }
    }
}

impl Error for SubmitError {}

impl From<TransitionError> for SubmitError {
    fn from(value: TransitionError) -> Self {
        Self::Transition(value)
    }
}

/// Serializable view state of one calendar session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// First day of the displayed month.
    pub reference_month: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub search_term: String,
    pub dialog: DialogState,
}

impl AppState {
    /// Starts on the month containing `today`, nothing selected.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            reference_month: first_of_month(today),
            selected_date: None,
            search_term: String::new(),
            dialog: DialogState::Closed,
        }
    }

    pub fn with_clock<C: Clock + ?Sized>(clock: &C) -> Self {
        Self::new(clock.today())
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    /// Selected day as a store key.
    pub fn selected_key(&self) -> Option<DateKey> {
        self.selected_date.map(DateKey::from)
    }

    pub fn previous_month(&mut self) {
        self.shift_months(-1);
    }

    pub fn next_month(&mut self) {
        self.shift_months(1);
    }

    /// Jumps to the current month and selects today.
    pub fn go_to_today<C: Clock + ?Sized>(&mut self, clock: &C) {
        let today = clock.today();
        self.reference_month = first_of_month(today);
        self.selected_date = Some(today);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Opens the add dialog for the selected day.
    pub fn open_add(&mut self) -> Result<(), TransitionError> {
        self.ensure_closed()?;
        let date = self.selected_key().ok_or(TransitionError::NoSelectedDate)?;
        self.dialog = DialogState::add(date);
        Ok(())
    }

    /// Opens the edit dialog for a stored event and selects its day.
    pub fn open_edit<R, C>(
        &mut self,
        service: &CalendarService<R, C>,
        date: &DateKey,
        event_id: &EventId,
    ) -> Result<(), TransitionError>
    where
        R: BlobRepository,
        C: Clock,
    {
        self.ensure_closed()?;
        let event = service
            .store()
            .find_event(date, event_id)
            .ok_or(TransitionError::UnknownEvent)?;
        self.selected_date = Some(event.date.date());
        self.dialog = DialogState::edit(event);
        Ok(())
    }

    /// Applies a form edit; any previous inline error is cleared.
    pub fn update_draft(
        &mut self,
        edit: impl FnOnce(&mut DraftForm),
    ) -> Result<(), TransitionError> {
        match &mut self.dialog {
            DialogState::Open { draft, error, .. } => {
                edit(draft);
                *error = None;
                Ok(())
            }
            DialogState::Closed => Err(TransitionError::DialogClosed),
        }
    }

    pub fn cancel(&mut self) {
        self.dialog = DialogState::Closed;
    }

    /// Submits the open dialog through `service`.
    ///
    /// Add mode calls `submit_new_event`, edit mode `submit_edited_event`.
    /// On success the dialog closes and the saved event is returned. On
    /// rejection the dialog stays open with the error attached.
    pub fn submit<R, C>(&mut self, service: &mut CalendarService<R, C>) -> Result<Event, SubmitError>
    where
        R: BlobRepository,
        C: Clock,
    {
        let DialogState::Open { mode, draft, error } = &mut self.dialog else {
            return Err(TransitionError::DialogClosed.into());
        };

        let result = match draft.to_draft() {
            Ok(parsed) => match mode {
                DialogMode::Add { date } => service
                    .submit_new_event(*date, parsed)
                    .map_err(|err| DialogError::from(&err)),
                DialogMode::Edit { date, event_id } => service
                    .submit_edited_event(*date, event_id, parsed)
                    .map_err(|err| DialogError::from(&err)),
            },
            Err(err) => Err(DialogError::from(&err)),
        };

        match result {
            Ok(event) => {
                self.dialog = DialogState::Closed;
                Ok(event)
            }
            Err(rejected) => {
                debug!(
                    "event=dialog_submit module=session status=rejected error_code={:?}",
                    rejected.code
                );
                *error = Some(rejected.clone());
                Err(SubmitError::Rejected(rejected))
            }
        }
    }

    fn ensure_closed(&self) -> Result<(), TransitionError> {
        if self.dialog.is_open() {
            Err(TransitionError::DialogAlreadyOpen)
        } else {
            Ok(())
        }
    }

    fn shift_months(&mut self, delta: i32) {
        if let Some(month) = shift_month(self.reference_month, delta) {
            self.reference_month = month;
        }
    }
}
