//! Appointments and their confirmation state.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

use crate::id::generate_id;

/// Scheduling status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no-show",
        }
    }

    /// Whether the appointment has reached a final state. Terminal
    /// appointments reject further status changes.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked visit for one patient with one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub provider_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
    pub status: AppointmentStatus,
    /// When the confirmation request went out. Set at most once.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub confirmation_sent_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<OffsetDateTime>,
    /// Prior authorization whose units this visit draws from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_prior_auth_id: Option<String>,
}

impl Appointment {
    /// Creates a newly scheduled appointment.
    pub fn new(
        patient_id: impl Into<String>,
        provider_id: impl Into<String>,
        date_time: OffsetDateTime,
    ) -> Self {
        Self {
            id: generate_id(),
            patient_id: patient_id.into(),
            provider_id: provider_id.into(),
            date_time,
            status: AppointmentStatus::Scheduled,
            confirmation_sent_at: None,
            confirmed_at: None,
            linked_prior_auth_id: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_linked_auth(mut self, auth_id: impl Into<String>) -> Self {
        self.linked_prior_auth_id = Some(auth_id.into());
        self
    }

    /// Whether the visit still needs a confirmation request sent.
    #[must_use]
    pub fn awaiting_confirmation(&self) -> bool {
        self.status == AppointmentStatus::Scheduled && self.confirmation_sent_at.is_none()
    }
}
