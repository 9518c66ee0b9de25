//! Prior authorizations and their consumable unit counts.
//!
//! A prior authorization grants a fixed number of service units inside a
//! validity window. The unit ledger in the engine is the only writer of
//! `used_units`; the helpers here are read-only views over the counts.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;

use crate::error::{CoreError, Result};
use crate::id::generate_id;

/// Payer-side status of a prior authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationStatus {
    Pending,
    Active,
    Expired,
    Denied,
}

impl AuthorizationStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Denied => "denied",
        }
    }

    /// Whether the authorization can never become usable again.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired | Self::Denied)
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payer-granted allowance of service units for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorAuthorization {
    pub id: String,
    pub patient_id: String,
    /// Payer-issued reference number, surfaced verbatim in task text.
    pub auth_number: String,
    pub service_code: String,
    pub service_name: String,
    pub total_units: u32,
    pub used_units: u32,
    pub status: AuthorizationStatus,
    pub start_date: Date,
    pub end_date: Date,
}

impl PriorAuthorization {
    /// Creates a pending authorization with no units consumed.
    pub fn new(
        patient_id: impl Into<String>,
        auth_number: impl Into<String>,
        service_code: impl Into<String>,
        service_name: impl Into<String>,
        total_units: u32,
        start_date: Date,
        end_date: Date,
    ) -> Self {
        Self {
            id: generate_id(),
            patient_id: patient_id.into(),
            auth_number: auth_number.into(),
            service_code: service_code.into(),
            service_name: service_name.into(),
            total_units,
            used_units: 0,
            status: AuthorizationStatus::Pending,
            start_date,
            end_date,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: AuthorizationStatus) -> Self {
        self.status = status;
        self
    }

    /// Units still available. Never underflows, even if the stored counts
    /// are inconsistent.
    #[must_use]
    pub fn remaining_units(&self) -> u32 {
        self.total_units.saturating_sub(self.used_units)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AuthorizationStatus::Active
    }

    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.remaining_units() == 0
    }

    /// Checks the unit counts are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnitsOutOfRange`] when more units are recorded
    /// as used than were ever granted.
    pub fn validate(&self) -> Result<()> {
        if self.used_units > self.total_units {
            return Err(CoreError::units_out_of_range(self.used_units, self.total_units));
        }
        Ok(())
    }
}
