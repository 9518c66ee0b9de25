//! `HashMap`-backed store for tests and in-process embedding.

use std::collections::HashMap;

use tracing::{debug, warn};

use careops_core::{Appointment, AppointmentStatus, PriorAuthorization, Task};

use crate::error::StoreError;
use crate::traits::CareStore;
use crate::types::{AppointmentPatch, AuthorizationUpdate};

/// In-memory implementation of [`CareStore`].
///
/// State is keyed by record id. All operations are plain map lookups, so
/// the store doubles as the reference semantics for real backends.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    appointments: HashMap<String, Appointment>,
    authorizations: HashMap<String, PriorAuthorization>,
    tasks: Vec<Task>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        for appointment in appointments {
            self.appointments.insert(appointment.id.clone(), appointment);
        }
        self
    }

    #[must_use]
    pub fn with_authorizations(mut self, authorizations: Vec<PriorAuthorization>) -> Self {
        for authorization in authorizations {
            self.authorizations.insert(authorization.id.clone(), authorization);
        }
        self
    }

    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn insert_appointment(&mut self, appointment: Appointment) {
        self.appointments.insert(appointment.id.clone(), appointment);
    }

    pub fn insert_authorization(&mut self, authorization: PriorAuthorization) {
        self.authorizations.insert(authorization.id.clone(), authorization);
    }

    #[must_use]
    pub fn appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.get(id)
    }

    #[must_use]
    pub fn authorization(&self, id: &str) -> Option<&PriorAuthorization> {
        self.authorizations.get(id)
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

impl CareStore for InMemoryStore {
    fn patch_appointment(
        &mut self,
        id: &str,
        patch: AppointmentPatch,
    ) -> Result<Appointment, StoreError> {
        let appointment = self
            .appointments
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("appointment", id))?;

        match patch {
            AppointmentPatch::ConfirmationSent { at } => {
                if appointment.confirmation_sent_at.is_some() {
                    return Err(StoreError::already_sent(id));
                }
                appointment.confirmation_sent_at = Some(at);
            }
            AppointmentPatch::Confirmed { at } => {
                if appointment.status != AppointmentStatus::Scheduled {
                    return Err(StoreError::invalid_transition(
                        "appointment",
                        id,
                        format!("cannot confirm from status {}", appointment.status),
                    ));
                }
                appointment.status = AppointmentStatus::Confirmed;
                appointment.confirmed_at = Some(at);
            }
            AppointmentPatch::Status { status } => {
                if appointment.status.is_terminal() && status != appointment.status {
                    return Err(StoreError::invalid_transition(
                        "appointment",
                        id,
                        format!("cannot move {} appointment to {status}", appointment.status),
                    ));
                }
                appointment.status = status;
            }
        }

        debug!(appointment_id = %id, status = %appointment.status, "applied appointment patch");
        Ok(appointment.clone())
    }

    fn update_authorization(
        &mut self,
        update: AuthorizationUpdate,
    ) -> Result<PriorAuthorization, StoreError> {
        let id = update.authorization.id.clone();
        let current = self
            .authorizations
            .get(&id)
            .ok_or_else(|| StoreError::not_found("prior authorization", id.clone()))?;

        if current.used_units != update.expected_used_units {
            warn!(
                auth_id = %id,
                expected = update.expected_used_units,
                actual = current.used_units,
                "stale unit count on authorization update"
            );
            return Err(StoreError::units_conflict(
                id,
                update.expected_used_units,
                current.used_units,
            ));
        }

        self.authorizations.insert(id, update.authorization.clone());
        Ok(update.authorization)
    }

    fn insert_task(&mut self, task: Task) -> Result<(), StoreError> {
        debug!(task_id = %task.id, title = %task.title, "inserting task");
        self.tasks.push(task);
        Ok(())
    }
}
