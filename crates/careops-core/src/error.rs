use thiserror::Error;

/// Core error types for CareOps domain data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),

    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("Unit count out of range: {used} used of {total} total")]
    UnitsOutOfRange { used: u32, total: u32 },
}

impl CoreError {
    /// Create a new UnknownEventKind error
    pub fn unknown_event_kind(kind: impl Into<String>) -> Self {
        Self::UnknownEventKind(kind.into())
    }

    /// Create a new InvalidDateTime error
    pub fn invalid_date_time(message: impl Into<String>) -> Self {
        Self::InvalidDateTime(message.into())
    }

    /// Create a new UnitsOutOfRange error
    pub fn units_out_of_range(used: u32, total: u32) -> Self {
        Self::UnitsOutOfRange { used, total }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::unknown_event_kind("caseClosed");
        assert_eq!(err.to_string(), "Unknown event kind: caseClosed");

        let err = CoreError::units_out_of_range(12, 10);
        assert_eq!(err.to_string(), "Unit count out of range: 12 used of 10 total");
    }

    #[test]
    fn test_error_debug_format() {
        let err = CoreError::invalid_date_time("not-a-date");
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("InvalidDateTime"));
        assert!(debug_str.contains("not-a-date"));
    }
}
