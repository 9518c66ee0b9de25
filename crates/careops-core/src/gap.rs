//! Preventive care gaps surfaced by panel analysis.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

use crate::id::generate_id;

/// Kind of screening a care gap refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapKind {
    Colonoscopy,
    A1c,
}

impl GapKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Colonoscopy => "colonoscopy",
            Self::A1c => "a1c",
        }
    }
}

impl fmt::Display for GapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How strongly a finding should be surfaced. Ordered from least to most
/// severe so findings can be ranked with plain comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Urgent,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A screening a patient is due or overdue for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareGap {
    pub id: String,
    pub patient_id: String,
    pub gap_type: GapKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[serde(with = "time::serde::rfc3339")]
    pub detected_at: OffsetDateTime,
}

impl CareGap {
    /// Creates a care gap detected at `now`.
    pub fn new(
        patient_id: impl Into<String>,
        gap_type: GapKind,
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id: generate_id(),
            patient_id: patient_id.into(),
            gap_type,
            title: title.into(),
            description: description.into(),
            severity,
            detected_at: now,
        }
    }
}
