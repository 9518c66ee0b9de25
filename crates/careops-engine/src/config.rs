//! Engine tuning knobs, loadable from TOML.
//!
//! Every threshold the rules consult lives here so a clinic can adjust
//! behavior without code changes. All fields have production defaults; a
//! config file only needs to name what it overrides:
//!
//! ```toml
//! urgent_due_hours = 12
//!
//! [vitals]
//! systolic_urgent = 150
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Vital sign alert thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalThresholds {
    /// Systolic pressure at or above this is alertable.
    pub systolic_urgent: u16,
    /// Diastolic pressure at or above this is alertable.
    pub diastolic_urgent: u16,
    /// BMI at or above this is alertable.
    pub bmi_warning: f64,
    /// Oxygen saturation strictly below this is alertable.
    pub oxygen_sat_urgent: f64,
}

impl Default for VitalThresholds {
    fn default() -> Self {
        Self {
            systolic_urgent: 140,
            diastolic_urgent: 90,
            bmi_warning: 30.0,
            oxygen_sat_urgent: 95.0,
        }
    }
}

/// Tuning knobs for rule evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hours until an urgent-case escalation task is due.
    pub urgent_due_hours: i64,
    /// Hours until a missing-authorization check task is due.
    pub auth_check_due_hours: i64,
    /// Days ahead the expiration watch looks for ending authorizations.
    pub expiring_auth_window_days: i64,
    /// Remaining-unit count at or below which the low-units watch fires.
    /// Zero disables the watch.
    pub low_units_threshold: u32,
    /// Days until a low-units task is due.
    pub low_units_due_days: i64,
    /// Hours before a visit inside which confirmations go out.
    pub confirmation_window_hours: i64,
    /// Age from which a colonoscopy screening is expected.
    pub colonoscopy_min_age: i64,
    /// Months after which an HbA1c result counts as stale.
    pub a1c_max_age_months: i64,
    pub vitals: VitalThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            urgent_due_hours: 24,
            auth_check_due_hours: 48,
            expiring_auth_window_days: 30,
            low_units_threshold: 3,
            low_units_due_days: 7,
            confirmation_window_hours: 72,
            colonoscopy_min_age: 50,
            a1c_max_age_months: 6,
            vitals: VitalThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a config from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML and
    /// [`ConfigError::Invalid`] when a value fails validation.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, plus the
    /// errors of [`EngineConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Checks every value is usable by the rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.urgent_due_hours <= 0 {
            return Err(ConfigError::invalid("urgent_due_hours", "must be positive"));
        }
        if self.auth_check_due_hours <= 0 {
            return Err(ConfigError::invalid("auth_check_due_hours", "must be positive"));
        }
        if self.expiring_auth_window_days < 0 {
            return Err(ConfigError::invalid(
                "expiring_auth_window_days",
                "must not be negative",
            ));
        }
        if self.low_units_due_days <= 0 {
            return Err(ConfigError::invalid("low_units_due_days", "must be positive"));
        }
        if self.confirmation_window_hours <= 0 {
            return Err(ConfigError::invalid(
                "confirmation_window_hours",
                "must be positive",
            ));
        }
        if self.colonoscopy_min_age < 0 {
            return Err(ConfigError::invalid("colonoscopy_min_age", "must not be negative"));
        }
        if self.a1c_max_age_months <= 0 {
            return Err(ConfigError::invalid("a1c_max_age_months", "must be positive"));
        }
        if self.vitals.bmi_warning <= 0.0 {
            return Err(ConfigError::invalid("vitals.bmi_warning", "must be positive"));
        }
        if self.vitals.oxygen_sat_urgent <= 0.0 || self.vitals.oxygen_sat_urgent > 100.0 {
            return Err(ConfigError::invalid(
                "vitals.oxygen_sat_urgent",
                "must be a percentage in (0, 100]",
            ));
        }
        Ok(())
    }
}
