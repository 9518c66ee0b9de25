//! Panel analysis: preventive care gaps and acute vital alerts.
//!
//! Gaps are recomputed from scratch on every call and never persisted; the
//! caller decides what to surface. The vitals check returns at most one
//! alert per reading, chosen by a fixed priority order, so the message a
//! clinician sees is always the same for the same reading.

use time::OffsetDateTime;
use tracing::debug;

use serde::{Deserialize, Serialize};

use careops_core::time::months_between;
use careops_core::{CareGap, GapKind, Patient, Severity, VitalSigns};

use crate::config::EngineConfig;

/// Scans the patient panel for overdue preventive screenings.
///
/// Two screenings are checked per patient: a colonoscopy once the patient
/// reaches the configured age, and an HbA1c for patients with active
/// diabetes whose last result is older than the configured number of
/// months. A missing result counts as infinitely old.
pub fn check_care_gaps(
    patients: &[Patient],
    now: OffsetDateTime,
    config: &EngineConfig,
) -> Vec<CareGap> {
    let today = now.date();
    let mut gaps = Vec::new();

    for patient in patients {
        let age = patient.age_on(now);
        if age >= config.colonoscopy_min_age && patient.last_colonoscopy_date.is_none() {
            gaps.push(CareGap::new(
                &patient.id,
                GapKind::Colonoscopy,
                "Colonoscopy Screening Due",
                format!(
                    "{}, age {age}, has no colonoscopy on record. Screening is \
                     recommended from age {}.",
                    patient.full_name(),
                    config.colonoscopy_min_age
                ),
                Severity::Warning,
                now,
            ));
        }

        if patient.has_active_diabetes() {
            let overdue = match patient.last_a1c_date {
                Some(last) => months_between(last, today) > config.a1c_max_age_months,
                None => true,
            };
            if overdue {
                let description = match patient.last_a1c_date {
                    Some(last) => format!(
                        "Last HbA1c was {} months ago. Patients with diabetes need \
                         testing every {} months.",
                        months_between(last, today),
                        config.a1c_max_age_months
                    ),
                    None => "No HbA1c on record for a patient with active diabetes.".to_string(),
                };
                gaps.push(CareGap::new(
                    &patient.id,
                    GapKind::A1c,
                    "HbA1c Test Overdue",
                    description,
                    Severity::Urgent,
                    now,
                ));
            }
        }
    }

    debug!(patients = patients.len(), gaps = gaps.len(), "care gap scan complete");
    gaps
}

/// Which vital threshold a reading breached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalAlertKind {
    Hypertension,
    Obesity,
    Hypoxia,
}

impl VitalAlertKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hypertension => "hypertension",
            Self::Obesity => "obesity",
            Self::Hypoxia => "hypoxia",
        }
    }
}

impl std::fmt::Display for VitalAlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An acute finding on a single vitals reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalAlert {
    pub patient_id: String,
    pub kind: VitalAlertKind,
    pub severity: Severity,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

/// Checks one vitals reading against the alert thresholds.
///
/// Conditions are evaluated in a fixed priority order: hypertension, then
/// obesity, then hypoxia. Only the first breach is reported, even when
/// several co-occur, and a missing measurement never alerts.
pub fn check_vital_alerts(vitals: &VitalSigns, config: &EngineConfig) -> Option<VitalAlert> {
    let thresholds = &config.vitals;

    let hypertensive = vitals
        .systolic
        .is_some_and(|s| s >= thresholds.systolic_urgent)
        || vitals
            .diastolic
            .is_some_and(|d| d >= thresholds.diastolic_urgent);
    if hypertensive {
        let reading = match (vitals.systolic, vitals.diastolic) {
            (Some(s), Some(d)) => format!("{s}/{d} mmHg"),
            (Some(s), None) => format!("systolic {s} mmHg"),
            (None, Some(d)) => format!("diastolic {d} mmHg"),
            (None, None) => String::new(),
        };
        return Some(VitalAlert {
            patient_id: vitals.patient_id.clone(),
            kind: VitalAlertKind::Hypertension,
            severity: Severity::Urgent,
            message: format!("Hypertensive reading: {reading}"),
            recorded_at: vitals.recorded_at,
        });
    }

    if let Some(bmi) = vitals.bmi.filter(|b| *b >= thresholds.bmi_warning) {
        return Some(VitalAlert {
            patient_id: vitals.patient_id.clone(),
            kind: VitalAlertKind::Obesity,
            severity: Severity::Warning,
            message: format!("BMI {bmi:.1} meets the obesity threshold"),
            recorded_at: vitals.recorded_at,
        });
    }

    if let Some(sat) = vitals.oxygen_sat.filter(|o| *o < thresholds.oxygen_sat_urgent) {
        return Some(VitalAlert {
            patient_id: vitals.patient_id.clone(),
            kind: VitalAlertKind::Hypoxia,
            severity: Severity::Urgent,
            message: format!("Oxygen saturation {sat:.1}% is below the safe range"),
            recorded_at: vitals.recorded_at,
        });
    }

    None
}
