//! Error types for mechsim.
//!
//! Every fallible operation returns `Result<T, SimError>` instead of
//! panicking. Missing scenario parameters are never errors (they take
//! documented defaults); malformed ones are.

use thiserror::Error;

/// Result type alias for mechsim operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all mechsim operations.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Input Errors =====
    /// A scenario parameter is non-numeric or not a finite number.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter key as supplied by the caller.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    // ===== Jidoka Violations =====
    /// Numerical instability detected (NaN or Inf).
    #[error("Jidoka: non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location where the non-finite value was detected.
        location: String,
    },

    /// Energy conservation violated beyond tolerance.
    #[error("Jidoka: energy drift {drift:.6e} exceeds tolerance {tolerance:.6e}")]
    EnergyDrift {
        /// Relative energy drift from the first sample.
        drift: f64,
        /// Configured tolerance threshold.
        tolerance: f64,
    },

    /// Physical constraint violated.
    #[error("Jidoka: constraint '{name}' violated by {violation:.6e} (tolerance: {tolerance:.6e})")]
    ConstraintViolation {
        /// Name of the violated constraint.
        name: String,
        /// Amount of violation.
        violation: f64,
        /// Configured tolerance.
        tolerance: f64,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SimError {
    /// Create an invalid-parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error is a Jidoka violation (generation was stopped).
    #[must_use]
    pub const fn is_jidoka_violation(&self) -> bool {
        matches!(
            self,
            Self::NonFiniteValue { .. }
                | Self::EnergyDrift { .. }
                | Self::ConstraintViolation { .. }
        )
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_jidoka_violation_detection() {
        let non_finite = SimError::NonFiniteValue {
            location: "samples[3].velocityX".to_string(),
        };
        assert!(non_finite.is_jidoka_violation());

        let energy = SimError::EnergyDrift {
            drift: 0.2,
            tolerance: 0.01,
        };
        assert!(energy.is_jidoka_violation());

        let constraint = SimError::ConstraintViolation {
            name: "kinetic_energy_non_negative".to_string(),
            violation: -1.0,
            tolerance: 0.0,
        };
        assert!(constraint.is_jidoka_violation());

        assert!(!SimError::config("invalid").is_jidoka_violation());
        assert!(!SimError::invalid_parameter("mass", "not a number").is_jidoka_violation());
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = SimError::invalid_parameter("velocity", "expected a number, got \"fast\"");
        let msg = err.to_string();
        assert!(msg.contains("Invalid parameter 'velocity'"));
        assert!(msg.contains("fast"));
    }

    #[test]
    fn test_error_display() {
        let err = SimError::EnergyDrift {
            drift: 0.001_234_567,
            tolerance: 0.000_001,
        };
        let msg = err.to_string();
        assert!(msg.contains("energy drift"));
        assert!(msg.contains("1.234567e-3"));
    }

    #[test]
    fn test_error_config() {
        let err = SimError::config("timestep must be positive");
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("timestep must be positive"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<f64>("not json").unwrap_err();
        let err = SimError::from(json_err);
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_from_io() {
        let err = SimError::from(std::io::Error::other("missing scenario"));
        assert!(err.to_string().contains("I/O error"));
        assert!(!err.is_jidoka_violation());
    }

    #[test]
    fn test_error_constraint_violation_display() {
        let err = SimError::ConstraintViolation {
            name: "kinetic_energy_non_negative".to_string(),
            violation: -5.0,
            tolerance: 0.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("kinetic_energy_non_negative"));
        assert!(msg.contains("violated"));
    }
}
