//! Patient cases, the unit of intake work that events reference.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

use crate::id::generate_id;

/// Broad category of a case, used to route rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseType {
    ClinicalConcern,
    MedicationRefill,
    Administrative,
    Billing,
}

impl CaseType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClinicalConcern => "clinicalConcern",
            Self::MedicationRefill => "medicationRefill",
            Self::Administrative => "administrative",
            Self::Billing => "billing",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How quickly a case needs a human response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseUrgency {
    Routine,
    Urgent,
}

impl CaseUrgency {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Routine => "routine",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for CaseUrgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An open piece of intake work tied to at most one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub title: String,
    pub case_type: CaseType,
    pub urgency: CaseUrgency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_provider_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Case {
    /// Creates a new case with a generated identifier.
    pub fn new(
        title: impl Into<String>,
        case_type: CaseType,
        urgency: CaseUrgency,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id: generate_id(),
            patient_id: None,
            title: title.into(),
            case_type,
            urgency,
            assigned_provider_id: None,
            created_at: now,
        }
    }

    #[must_use]
    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    #[must_use]
    pub fn with_provider(mut self, provider_id: impl Into<String>) -> Self {
        self.assigned_provider_id = Some(provider_id.into());
        self
    }

    #[must_use]
    pub fn is_urgent(&self) -> bool {
        self.urgency == CaseUrgency::Urgent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_new_case() {
        let now = datetime!(2024-06-01 10:00:00 UTC);
        let case = Case::new(
            "Chest pain callback",
            CaseType::ClinicalConcern,
            CaseUrgency::Urgent,
            now,
        )
        .with_patient("patient-1")
        .with_provider("provider-1");

        assert!(case.is_urgent());
        assert_eq!(case.patient_id.as_deref(), Some("patient-1"));
        assert_eq!(case.assigned_provider_id.as_deref(), Some("provider-1"));
        assert_eq!(case.created_at, now);
    }

    #[test]
    fn test_routine_case_is_not_urgent() {
        let now = datetime!(2024-06-01 10:00:00 UTC);
        let case = Case::new("Refill request", CaseType::MedicationRefill, CaseUrgency::Routine, now);
        assert!(!case.is_urgent());
    }

    #[test]
    fn test_case_type_wire_format() {
        assert_eq!(
            serde_json::to_value(CaseType::ClinicalConcern).unwrap(),
            serde_json::json!("clinicalConcern")
        );
        assert_eq!(CaseType::MedicationRefill.as_str(), "medicationRefill");
        assert_eq!(CaseUrgency::Urgent.as_str(), "urgent");
    }

    #[test]
    fn test_case_serialization_skips_empty_options() {
        let now = datetime!(2024-06-01 10:00:00 UTC);
        let case = Case::new("Billing question", CaseType::Billing, CaseUrgency::Routine, now);
        let value = serde_json::to_value(&case).unwrap();

        assert_eq!(value["caseType"], "billing");
        assert_eq!(value["urgency"], "routine");
        assert!(value.get("patientId").is_none());
        assert!(value.get("assignedProviderId").is_none());
    }
}
