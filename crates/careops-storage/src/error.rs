//! Errors shared by every store backend.

use thiserror::Error;

/// Failures a [`crate::CareStore`] implementation can report.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The caller's view of an authorization's consumed units was stale.
    #[error("Unit conflict on authorization {auth_id}: expected {expected} used, found {actual}")]
    UnitsConflict {
        auth_id: String,
        expected: u32,
        actual: u32,
    },

    #[error("Confirmation already sent for appointment {appointment_id}")]
    AlreadySent { appointment_id: String },

    #[error("Invalid transition for {entity} {id}: {detail}")]
    InvalidTransition {
        entity: &'static str,
        id: String,
        detail: String,
    },

    #[error("Internal store error: {message}")]
    Internal { message: String },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn units_conflict(auth_id: impl Into<String>, expected: u32, actual: u32) -> Self {
        Self::UnitsConflict {
            auth_id: auth_id.into(),
            expected,
            actual,
        }
    }

    pub fn already_sent(appointment_id: impl Into<String>) -> Self {
        Self::AlreadySent {
            appointment_id: appointment_id.into(),
        }
    }

    pub fn invalid_transition(
        entity: &'static str,
        id: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvalidTransition {
            entity,
            id: id.into(),
            detail: detail.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub fn is_units_conflict(&self) -> bool {
        matches!(self, Self::UnitsConflict { .. })
    }

    #[must_use]
    pub fn is_already_sent(&self) -> bool {
        matches!(self, Self::AlreadySent { .. })
    }

    /// Coarse classification for logging and retry decisions.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::UnitsConflict { .. } | Self::AlreadySent { .. } => ErrorCategory::Conflict,
            Self::InvalidTransition { .. } => ErrorCategory::Validation,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Coarse store error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Conflict,
    Validation,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::Internal => "internal",
        };
        f.write_str(s)
    }
}
