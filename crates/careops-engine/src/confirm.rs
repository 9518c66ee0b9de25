//! Appointment confirmation scheduling and patient replies.
//!
//! [`due_confirmations`] is a pure selection query: it lists what should be
//! sent but records nothing. Callers mark dispatch through
//! [`mark_confirmation_sent`], whose store contract enforces the
//! at-most-once send. Actual SMS delivery belongs to an external
//! collaborator; this module only produces and consumes payloads.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, warn};

use careops_core::time::hours_until;
use careops_core::{Appointment, Patient};
use careops_storage::{AppointmentPatch, CareStore, StoreError};

use crate::config::EngineConfig;

/// What an outbound confirmation message needs to say.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    pub appointment_id: String,
    pub patient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
}

/// Lists appointments whose confirmation should go out now.
///
/// An appointment qualifies when it is still scheduled, no confirmation has
/// been sent, and the visit is strictly in the future but within the
/// configured window. Appointments whose patient is not in the snapshot are
/// skipped rather than failing the batch.
pub fn due_confirmations(
    appointments: &[Appointment],
    patients: &[Patient],
    now: OffsetDateTime,
    config: &EngineConfig,
) -> Vec<ConfirmationRequest> {
    let window = config.confirmation_window_hours as f64;
    let mut requests = Vec::new();

    for appointment in appointments.iter().filter(|a| a.awaiting_confirmation()) {
        let hours = hours_until(now, appointment.date_time);
        if hours <= 0.0 || hours > window {
            continue;
        }
        let Some(patient) = patients.iter().find(|p| p.id == appointment.patient_id) else {
            warn!(
                appointment_id = %appointment.id,
                patient_id = %appointment.patient_id,
                "appointment references unknown patient, skipping confirmation"
            );
            continue;
        };
        requests.push(ConfirmationRequest {
            appointment_id: appointment.id.clone(),
            patient_name: patient.full_name(),
            phone_number: patient.phone.clone(),
            date_time: appointment.date_time,
        });
    }

    debug!(count = requests.len(), "selected confirmations due");
    requests
}

/// Records that the confirmation for an appointment went out at `now`.
///
/// # Errors
///
/// Returns [`StoreError::AlreadySent`] when a send is already recorded, so
/// two senders racing on the same appointment cannot both succeed, and
/// [`StoreError::NotFound`] for an unknown appointment.
pub fn mark_confirmation_sent(
    appointment_id: &str,
    store: &mut dyn CareStore,
    now: OffsetDateTime,
) -> Result<Appointment, StoreError> {
    store.patch_appointment(appointment_id, AppointmentPatch::ConfirmationSent { at: now })
}

/// A patient's keypad reply to a confirmation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsReply {
    Confirm,
    Reschedule,
}

impl SmsReply {
    /// Parses a reply body. `1` confirms, `2` requests rescheduling,
    /// anything else is unrecognized.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        match body.trim() {
            "1" => Some(Self::Confirm),
            "2" => Some(Self::Reschedule),
            _ => None,
        }
    }
}

/// Outcome reported back over the SMS channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsReceipt {
    pub success: bool,
    pub message: String,
}

impl SmsReceipt {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Applies a patient's reply to their appointment.
///
/// Never fails the caller: every outcome, including an unknown appointment
/// or an unrecognized reply, is rendered as a receipt suitable for sending
/// straight back to the patient. A confirm reply transitions the
/// appointment through the store; a reschedule reply changes nothing and
/// leaves follow-up to staff.
pub fn apply_sms_reply(
    appointment_id: &str,
    body: &str,
    appointments: &[Appointment],
    store: &mut dyn CareStore,
    now: OffsetDateTime,
) -> SmsReceipt {
    let Some(appointment) = appointments.iter().find(|a| a.id == appointment_id) else {
        return SmsReceipt::failed("We could not find your appointment. Please call the office.");
    };

    match SmsReply::parse(body) {
        Some(SmsReply::Confirm) => {
            match store.patch_appointment(appointment_id, AppointmentPatch::Confirmed { at: now }) {
                Ok(updated) => SmsReceipt::ok(format!(
                    "Your appointment on {} is confirmed. Thank you!",
                    updated.date_time.date()
                )),
                Err(err) => {
                    warn!(
                        appointment_id = %appointment_id,
                        error = %err,
                        "could not apply confirmation reply"
                    );
                    SmsReceipt::failed("We could not confirm your appointment. Please call the office.")
                }
            }
        }
        Some(SmsReply::Reschedule) => {
            debug!(appointment_id = %appointment.id, "patient requested reschedule");
            SmsReceipt::ok(
                "Your request to reschedule has been received. Our staff will call you to find a new time.",
            )
        }
        None => SmsReceipt::failed(
            "Sorry, we did not understand your reply. Reply 1 to confirm or 2 to reschedule.",
        ),
    }
}
