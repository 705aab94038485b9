//! Add/edit dialog state machine.
//!
//! `Closed -> Open(Add | Edit)`; a successful submit returns to `Closed`,
//! a rejected one stays `Open` with the error attached.

use crate::model::date_key::DateKey;
use crate::model::event::{Event, EventDraft, EventId};
use crate::model::time::{TimeOfDay, TimeParseError};
use crate::service::calendar_service::ServiceError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftForm {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
}

impl DraftForm {
    /// Pre-fills the form from an existing event.
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            start_time: event.start_time.to_string(),
            end_time: event.end_time.to_string(),
            description: event.description.clone(),
        }
    }

    /// Parses the time fields into a submittable draft.
    pub fn to_draft(&self) -> Result<EventDraft, DraftError> {
        let start_time = TimeOfDay::parse(&self.start_time).map_err(|source| DraftError {
            field: DraftField::StartTime,
            source,
        })?;
        let end_time = TimeOfDay::parse(&self.end_time).map_err(|source| DraftError {
            field: DraftField::EndTime,
            source,
        })?;
        Ok(EventDraft::new(self.title.clone(), start_time, end_time)
            .with_description(self.description.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    StartTime,
    EndTime,
}

/// Form field that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftError {
    pub field: DraftField,
    pub source: TimeParseError,
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let field = match self.field {
            DraftField::StartTime => "start time",
            DraftField::EndTime => "end time",
        };
        write!(f, "{field}: {}", self.source)
    }
}

impl std::error::Error for DraftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// What the open dialog will do on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DialogMode {
    Add { date: DateKey },
    Edit { date: DateKey, event_id: EventId },
}

impl DialogMode {
    pub fn date(&self) -> DateKey {
        match self {
            Self::Add { date } | Self::Edit { date, .. } => *date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogErrorCode {
    Conflict,
    NotFound,
    InvalidDraft,
    Storage,
}

/// Inline error rendered inside the open dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogError {
    pub code: DialogErrorCode,
    pub message: String,
    /// Set for conflicts so the UI can highlight the colliding event.
    pub conflicting_id: Option<EventId>,
}

impl From<&DraftError> for DialogError {
    fn from(value: &DraftError) -> Self {
        Self {
            code: DialogErrorCode::InvalidDraft,
            message: value.to_string(),
            conflicting_id: None,
        }
    }
}

impl From<&ServiceError> for DialogError {
    fn from(value: &ServiceError) -> Self {
        let (code, conflicting_id) = match value {
            ServiceError::Conflict(conflict) => {
                (DialogErrorCode::Conflict, Some(conflict.conflicting_id.clone()))
            }
            ServiceError::NotFound { .. } => (DialogErrorCode::NotFound, None),
            ServiceError::Repo(_) | ServiceError::Encode(_) => (DialogErrorCode::Storage, None),
        };
        Self {
            code,
            message: value.to_string(),
            conflicting_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DialogState {
    #[default]
    Closed,
    Open {
        mode: DialogMode,
        draft: DraftForm,
        error: Option<DialogError>,
    },
}

impl DialogState {
    /// Add dialog with an empty form.
    pub fn add(date: DateKey) -> Self {
        Self::Open {
            mode: DialogMode::Add { date },
            draft: DraftForm::default(),
            error: None,
        }
    }

    /// Edit dialog pre-filled from `event`.
    pub fn edit(event: &Event) -> Self {
        Self::Open {
            mode: DialogMode::Edit {
                date: event.date,
                event_id: event.id.clone(),
            },
            draft: DraftForm::from_event(event),
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn error(&self) -> Option<&DialogError> {
        match self {
            Self::Open { error, .. } => error.as_ref(),
            Self::Closed => None,
        }
    }
}
