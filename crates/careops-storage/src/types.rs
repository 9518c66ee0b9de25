//! Write payloads accepted by the store port.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use careops_core::{AppointmentStatus, PriorAuthorization};

/// A targeted change to one appointment.
///
/// Patches carry only the fields they change, so a backend can apply them
/// atomically without read-modify-write races on unrelated fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum AppointmentPatch {
    /// Record that the confirmation request went out at `at`. Applies at
    /// most once per appointment.
    ConfirmationSent {
        #[serde(with = "time::serde::rfc3339")]
        at: OffsetDateTime,
    },
    /// Record the patient's confirmation at `at`.
    Confirmed {
        #[serde(with = "time::serde::rfc3339")]
        at: OffsetDateTime,
    },
    /// Move the appointment to a new status.
    Status { status: AppointmentStatus },
}

/// A full replacement of one authorization, guarded by the unit count the
/// caller observed.
///
/// The guard makes unit consumption safe against concurrent writers: a
/// backend must reject the update when the stored `used_units` no longer
/// matches `expected_used_units`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationUpdate {
    pub authorization: PriorAuthorization,
    pub expected_used_units: u32,
}

impl AuthorizationUpdate {
    pub fn new(authorization: PriorAuthorization, expected_used_units: u32) -> Self {
        Self {
            authorization,
            expected_used_units,
        }
    }
}
