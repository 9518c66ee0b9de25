//! Point-in-time vital sign measurements.
//!
//! Each field is optional because intake stations record different subsets.
//! Threshold checks treat a missing measurement as not alertable.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One set of vital signs captured for a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_sat: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl VitalSigns {
    /// Creates an empty reading for a patient at `recorded_at`.
    pub fn new(patient_id: impl Into<String>, recorded_at: OffsetDateTime) -> Self {
        Self {
            patient_id: patient_id.into(),
            appointment_id: None,
            systolic: None,
            diastolic: None,
            heart_rate: None,
            temperature: None,
            bmi: None,
            oxygen_sat: None,
            recorded_at,
        }
    }

    #[must_use]
    pub fn with_appointment(mut self, appointment_id: impl Into<String>) -> Self {
        self.appointment_id = Some(appointment_id.into());
        self
    }

    #[must_use]
    pub fn with_blood_pressure(mut self, systolic: u16, diastolic: u16) -> Self {
        self.systolic = Some(systolic);
        self.diastolic = Some(diastolic);
        self
    }

    #[must_use]
    pub fn with_heart_rate(mut self, bpm: u16) -> Self {
        self.heart_rate = Some(bpm);
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = Some(celsius);
        self
    }

    #[must_use]
    pub fn with_bmi(mut self, bmi: f64) -> Self {
        self.bmi = Some(bmi);
        self
    }

    #[must_use]
    pub fn with_oxygen_sat(mut self, percent: f64) -> Self {
        self.oxygen_sat = Some(percent);
        self
    }
}
