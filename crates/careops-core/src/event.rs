//! Domain events consumed by the automation engine.
//!
//! Events arrive as JSON with a `type` discriminator:
//!
//! - `caseCreated` carries the full new case
//! - `formSubmitted` references a submitted form
//! - `appointmentScheduled` carries the booked appointment
//! - `statusChanged` records a case status transition
//!
//! The engine treats events as immutable facts. Processing one never
//! mutates the event itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::appointment::Appointment;
use crate::case::Case;
use crate::error::CoreError;
use crate::id::generate_id;

/// Discriminator for the supported event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    CaseCreated,
    FormSubmitted,
    AppointmentScheduled,
    StatusChanged,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CaseCreated => "caseCreated",
            Self::FormSubmitted => "formSubmitted",
            Self::AppointmentScheduled => "appointmentScheduled",
            Self::StatusChanged => "statusChanged",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "caseCreated" => Ok(Self::CaseCreated),
            "formSubmitted" => Ok(Self::FormSubmitted),
            "appointmentScheduled" => Ok(Self::AppointmentScheduled),
            "statusChanged" => Ok(Self::StatusChanged),
            other => Err(CoreError::unknown_event_kind(other)),
        }
    }
}

/// A form a patient or staff member submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub form_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

impl FormSubmission {
    pub fn new(form_name: impl Into<String>, submitted_at: OffsetDateTime) -> Self {
        Self {
            id: generate_id(),
            case_id: None,
            patient_id: None,
            form_name: form_name.into(),
            submitted_at,
        }
    }

    #[must_use]
    pub fn with_case(mut self, case_id: impl Into<String>) -> Self {
        self.case_id = Some(case_id.into());
        self
    }

    #[must_use]
    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }
}

/// A recorded case status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub case_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub new_status: String,
}

impl StatusChange {
    pub fn new(case_id: impl Into<String>, new_status: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            patient_id: None,
            new_status: new_status.into(),
        }
    }

    #[must_use]
    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }
}

/// Something that happened in the practice, as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DomainEvent {
    CaseCreated(Case),
    FormSubmitted(FormSubmission),
    AppointmentScheduled(Appointment),
    StatusChanged(StatusChange),
}

impl DomainEvent {
    pub fn case_created(case: Case) -> Self {
        Self::CaseCreated(case)
    }

    pub fn form_submitted(form: FormSubmission) -> Self {
        Self::FormSubmitted(form)
    }

    pub fn appointment_scheduled(appointment: Appointment) -> Self {
        Self::AppointmentScheduled(appointment)
    }

    pub fn status_changed(change: StatusChange) -> Self {
        Self::StatusChanged(change)
    }

    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::CaseCreated(_) => EventKind::CaseCreated,
            Self::FormSubmitted(_) => EventKind::FormSubmitted,
            Self::AppointmentScheduled(_) => EventKind::AppointmentScheduled,
            Self::StatusChanged(_) => EventKind::StatusChanged,
        }
    }

    /// Patient the event concerns, when it names one.
    #[must_use]
    pub fn patient_id(&self) -> Option<&str> {
        match self {
            Self::CaseCreated(case) => case.patient_id.as_deref(),
            Self::FormSubmitted(form) => form.patient_id.as_deref(),
            Self::AppointmentScheduled(appointment) => Some(&appointment.patient_id),
            Self::StatusChanged(change) => change.patient_id.as_deref(),
        }
    }

    /// Case the event concerns, when it names one.
    #[must_use]
    pub fn case_id(&self) -> Option<&str> {
        match self {
            Self::CaseCreated(case) => Some(&case.id),
            Self::FormSubmitted(form) => form.case_id.as_deref(),
            Self::AppointmentScheduled(_) => None,
            Self::StatusChanged(change) => Some(&change.case_id),
        }
    }

    /// The embedded case for `caseCreated` events.
    #[must_use]
    pub fn as_case(&self) -> Option<&Case> {
        match self {
            Self::CaseCreated(case) => Some(case),
            _ => None,
        }
    }
}
