//! Read-side snapshot handed to the dispatcher.
//!
//! A [`Snapshot`] is the engine's view of current practice state at one
//! instant. Dispatch reads it and never writes it, so callers can reuse a
//! snapshot across several events processed at the same logical time.

use serde::{Deserialize, Serialize};

use crate::appointment::Appointment;
use crate::authorization::PriorAuthorization;
use crate::patient::Patient;
use crate::provider::Provider;
use crate::task::Task;
use crate::vitals::VitalSigns;
use crate::workflow::WorkflowTemplate;

/// Current practice state as input to event dispatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorizations: Vec<PriorAuthorization>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub appointments: Vec<Appointment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patients: Vec<Patient>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vitals: Vec<VitalSigns>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<Provider>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<WorkflowTemplate>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    #[must_use]
    pub fn with_authorizations(mut self, authorizations: Vec<PriorAuthorization>) -> Self {
        self.authorizations = authorizations;
        self
    }

    #[must_use]
    pub fn with_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        self.appointments = appointments;
        self
    }

    #[must_use]
    pub fn with_patients(mut self, patients: Vec<Patient>) -> Self {
        self.patients = patients;
        self
    }

    #[must_use]
    pub fn with_vitals(mut self, vitals: Vec<VitalSigns>) -> Self {
        self.vitals = vitals;
        self
    }

    #[must_use]
    pub fn with_providers(mut self, providers: Vec<Provider>) -> Self {
        self.providers = providers;
        self
    }

    #[must_use]
    pub fn with_templates(mut self, templates: Vec<WorkflowTemplate>) -> Self {
        self.templates = templates;
        self
    }
}
