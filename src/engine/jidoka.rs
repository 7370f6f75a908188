//! Jidoka (自働化) - Autonomous anomaly detection.
//!
//! The generator stops the line as soon as a sample is unfit for the
//! renderer or the graphs, instead of handing back a trajectory with NaN in
//! it.
//!
//! # Anomaly Types
//!
//! 1. **Non-finite values**: NaN or Inf in any sample field (always stops)
//! 2. **Negative kinetic energy**: only reachable through a negative mass
//! 3. **Energy bookkeeping**: total energy not equal to kinetic + potential
//! 4. **Energy drift**: conservative models whose total energy wanders from
//!    the first sample; graduated, logged, and only fatal when configured
//!
//! # Severity Levels
//!
//! - **Acceptable**: Within tolerance, continue normally
//! - **Warning**: Approaching tolerance, log and continue
//! - **Critical**: Tolerance exceeded, log (or stop when configured)
//! - **Fatal**: Unrecoverable state, halt immediately

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::engine::trajectory::MotionSample;
use crate::error::{SimError, SimResult};

/// Severity levels for Jidoka violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViolationSeverity {
    /// Acceptable variance within tolerance (continue).
    Acceptable,
    /// Warning: approaching tolerance boundary (log, continue).
    Warning,
    /// Critical: tolerance exceeded.
    Critical,
    /// Fatal: unrecoverable state (halt immediately).
    Fatal,
}

/// Classifier for graduated Jidoka responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityClassifier {
    /// Warning threshold as fraction of tolerance (e.g., 0.8 = warn at 80%).
    pub warning_fraction: f64,
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self {
            warning_fraction: 0.8,
        }
    }
}

impl SeverityClassifier {
    /// Create a new severity classifier.
    #[must_use]
    pub const fn new(warning_fraction: f64) -> Self {
        Self { warning_fraction }
    }

    /// Classify energy drift severity.
    #[must_use]
    pub fn classify_energy_drift(&self, drift: f64, tolerance: f64) -> ViolationSeverity {
        if drift.is_nan() || drift.is_infinite() {
            ViolationSeverity::Fatal
        } else if drift > tolerance {
            ViolationSeverity::Critical
        } else if drift > tolerance * self.warning_fraction {
            ViolationSeverity::Warning
        } else {
            ViolationSeverity::Acceptable
        }
    }
}

/// Jidoka violation types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JidokaViolation {
    /// Non-finite value (NaN or Inf) detected.
    NonFiniteValue {
        /// Location of the non-finite value (e.g., "samples[3].velocityX").
        location: String,
        /// The non-finite value itself.
        value: f64,
    },
    /// Energy conservation violated.
    EnergyDrift {
        /// Current energy.
        current: f64,
        /// Initial energy.
        initial: f64,
        /// Relative drift.
        drift: f64,
        /// Configured tolerance.
        tolerance: f64,
    },
    /// Constraint violated.
    ConstraintViolation {
        /// Constraint name.
        name: String,
        /// Current value.
        value: f64,
        /// Violation amount.
        violation: f64,
        /// Configured tolerance.
        tolerance: f64,
    },
}

impl From<JidokaViolation> for SimError {
    fn from(v: JidokaViolation) -> Self {
        match v {
            JidokaViolation::NonFiniteValue { location, .. } => Self::NonFiniteValue { location },
            JidokaViolation::EnergyDrift {
                drift, tolerance, ..
            } => Self::EnergyDrift { drift, tolerance },
            JidokaViolation::ConstraintViolation {
                name,
                violation,
                tolerance,
                ..
            } => Self::ConstraintViolation {
                name,
                violation,
                tolerance,
            },
        }
    }
}

/// Jidoka guard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JidokaConfig {
    /// NaN/Inf detection enabled.
    pub check_finite: bool,
    /// Reject samples whose kinetic energy is negative.
    pub check_kinetic_energy: bool,
    /// Absolute tolerance on `total - (kinetic + potential)` (J).
    pub bookkeeping_tolerance: f64,
    /// Monitor energy drift on conservative models.
    pub check_energy: bool,
    /// Maximum allowed relative energy drift.
    pub energy_tolerance: f64,
    /// Stop generation when drift exceeds the tolerance (otherwise log).
    pub stop_on_energy_drift: bool,
    /// Severity classifier for graduated responses.
    pub severity_classifier: SeverityClassifier,
}

impl Default for JidokaConfig {
    fn default() -> Self {
        Self {
            check_finite: true,
            check_kinetic_energy: true,
            bookkeeping_tolerance: 1e-9,
            check_energy: true,
            energy_tolerance: 0.05,
            stop_on_energy_drift: false,
            severity_classifier: SeverityClassifier::default(),
        }
    }
}

/// Jidoka guard for autonomous anomaly detection.
///
/// One guard watches one trajectory; it remembers the first sample's
/// energy as the drift baseline.
///
/// # Example
///
/// ```rust
/// use mechsim::engine::jidoka::{JidokaConfig, JidokaGuard};
/// use mechsim::engine::state::Vec2;
/// use mechsim::engine::trajectory::{BodyKinematics, MotionSample};
///
/// let mut guard = JidokaGuard::new(JidokaConfig::default());
/// let body = BodyKinematics::new(Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::zero());
/// let sample = MotionSample::new(0.0, body, 0.5, 0.0);
///
/// assert!(guard.check(0, &sample).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct JidokaGuard {
    /// Configuration.
    config: JidokaConfig,
    /// Whether the model being watched should conserve energy.
    monitor_energy: bool,
    /// Initial energy (set on first check).
    initial_energy: Option<f64>,
    /// Largest relative drift seen so far.
    max_drift: f64,
    /// Worst drift severity already reported.
    reported: ViolationSeverity,
}

impl JidokaGuard {
    /// Create a new Jidoka guard with given configuration.
    #[must_use]
    pub const fn new(config: JidokaConfig) -> Self {
        Self {
            config,
            monitor_energy: false,
            initial_energy: None,
            max_drift: 0.0,
            reported: ViolationSeverity::Acceptable,
        }
    }

    /// Create from engine configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.jidoka.clone())
    }

    /// Enable drift monitoring (for models that conserve energy).
    #[must_use]
    pub const fn monitor_energy(mut self, enabled: bool) -> Self {
        self.monitor_energy = enabled;
        self
    }

    /// Check one sample for anomalies (Jidoka inspection).
    ///
    /// Called by the generator for every sample before it is appended.
    ///
    /// # Errors
    ///
    /// Returns `SimError` if any anomaly is detected:
    /// - `NonFiniteValue`: NaN or Inf found
    /// - `ConstraintViolation`: negative kinetic energy or broken bookkeeping
    /// - `EnergyDrift`: drift beyond tolerance with `stop_on_energy_drift`
    pub fn check(&mut self, index: usize, sample: &MotionSample) -> SimResult<()> {
        // Check 1: Non-finite values (Poka-Yoke)
        if self.config.check_finite {
            Self::check_finite(index, sample)?;
        }

        // Check 2: Physical constraints
        self.check_constraints(sample)?;

        // Check 3: Energy drift
        if self.config.check_energy && self.monitor_energy {
            self.check_energy(index, sample)?;
        }

        Ok(())
    }

    fn check_finite(index: usize, sample: &MotionSample) -> SimResult<()> {
        for (name, value) in sample.fields() {
            if !value.is_finite() {
                return Err(JidokaViolation::NonFiniteValue {
                    location: format!("samples[{index}].{name}"),
                    value,
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_constraints(&self, sample: &MotionSample) -> SimResult<()> {
        if self.config.check_kinetic_energy && sample.kinetic_energy < 0.0 {
            return Err(JidokaViolation::ConstraintViolation {
                name: "kinetic_energy_non_negative".to_string(),
                value: sample.kinetic_energy,
                violation: sample.kinetic_energy,
                tolerance: 0.0,
            }
            .into());
        }

        let bookkeeping =
            sample.total_energy - (sample.kinetic_energy + sample.potential_energy);
        if bookkeeping.abs() > self.config.bookkeeping_tolerance {
            return Err(JidokaViolation::ConstraintViolation {
                name: "energy_bookkeeping".to_string(),
                value: sample.total_energy,
                violation: bookkeeping,
                tolerance: self.config.bookkeeping_tolerance,
            }
            .into());
        }

        Ok(())
    }

    fn check_energy(&mut self, index: usize, sample: &MotionSample) -> SimResult<()> {
        let current = sample.total_energy;

        let Some(initial) = self.initial_energy else {
            self.initial_energy = Some(current);
            return Ok(());
        };
        // Skip if no energy defined
        if initial.abs() < f64::EPSILON {
            return Ok(());
        }

        let drift = (current - initial).abs() / initial.abs();
        self.max_drift = self.max_drift.max(drift);

        let tolerance = self.config.energy_tolerance;
        let severity = self
            .config
            .severity_classifier
            .classify_energy_drift(drift, tolerance);

        if severity >= ViolationSeverity::Critical && self.config.stop_on_energy_drift {
            return Err(JidokaViolation::EnergyDrift {
                current,
                initial,
                drift,
                tolerance,
            }
            .into());
        }

        // Log each escalation once rather than every tick.
        if severity > self.reported {
            match severity {
                ViolationSeverity::Warning => {
                    debug!(index, drift, tolerance, "energy drift approaching tolerance");
                }
                ViolationSeverity::Critical | ViolationSeverity::Fatal => {
                    warn!(index, drift, tolerance, "energy drift exceeds tolerance");
                }
                ViolationSeverity::Acceptable => {}
            }
            self.reported = severity;
        }

        Ok(())
    }

    /// Largest relative energy drift observed so far.
    #[must_use]
    pub const fn max_energy_drift(&self) -> f64 {
        self.max_drift
    }

    /// Reset the guard (clear the drift baseline).
    #[allow(clippy::missing_const_for_fn)]
    pub fn reset(&mut self) {
        self.initial_energy = None;
        self.max_drift = 0.0;
        self.reported = ViolationSeverity::Acceptable;
    }

    /// Get current configuration.
    #[must_use]
    pub const fn config(&self) -> &JidokaConfig {
        &self.config
    }
}
