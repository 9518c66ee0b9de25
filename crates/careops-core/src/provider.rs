//! Staff members that tasks can be assigned to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a staff member plays in the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderRole {
    Physician,
    Nurse,
    Billing,
    FrontDesk,
}

impl ProviderRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Physician => "physician",
            Self::Nurse => "nurse",
            Self::Billing => "billing",
            Self::FrontDesk => "frontDesk",
        }
    }
}

impl fmt::Display for ProviderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staff member eligible for task assignment.
///
/// Inactive providers stay on file for historical assignments but are never
/// chosen for new work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub role: ProviderRole,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Provider {
    /// Creates an active provider.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: ProviderRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            active: true,
        }
    }

    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}
