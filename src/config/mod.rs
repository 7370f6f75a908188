//! Engine configuration with YAML schema and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs
//! - Schema validation via serde (`deny_unknown_fields`) and `validator`
//! - Runtime semantic validation
//!
//! Scenario parameters are *not* configuration: they live in
//! [`crate::scenarios::ScenarioParameters`] and change on every UI event.
//! The engine configuration fixes how every trajectory is generated.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::jidoka::JidokaConfig;
use crate::error::{SimError, SimResult};

/// Output step of every trajectory (s).
pub const DEFAULT_DT: f64 = 0.02;

/// Maximum simulated duration per trajectory (s).
pub const DEFAULT_MAX_DURATION: f64 = 10.0;

/// Static friction coefficient as a multiple of the kinetic one.
///
/// Not measured independently: μs = 1.2·μk everywhere a model needs a
/// static coefficient.
pub const STATIC_FRICTION_RATIO: f64 = 1.2;

/// Upper bound on samples per trajectory, initial sample included.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Speed below which a friction-bearing body counts as "at rest" (m/s).
pub const VELOCITY_EPSILON: f64 = 1e-3;

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Fixed-step timing.
    #[validate(nested)]
    #[serde(default)]
    pub timestep: TimestepConfig,

    /// Coulomb friction model settings.
    #[validate(nested)]
    #[serde(default)]
    pub friction: FrictionConfig,

    /// Jidoka (stop-on-anomaly) configuration.
    #[serde(default)]
    pub jidoka: JidokaConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn check(&self) -> SimResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> SimResult<()> {
        let dt = self.timestep.dt;
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimError::config("Timestep must be positive"));
        }
        if dt > 1.0 {
            return Err(SimError::config("Timestep should not exceed 1 second"));
        }
        if self.timestep.max_duration < dt {
            return Err(SimError::config(format!(
                "Maximum duration {} s is shorter than one timestep ({} s)",
                self.timestep.max_duration, dt
            )));
        }
        if self.timestep.max_duration / dt >= MAX_SAMPLES as f64 {
            return Err(SimError::config(format!(
                "{} s at {} s per step exceeds the limit of {MAX_SAMPLES} samples",
                self.timestep.max_duration, dt
            )));
        }
        if self.friction.static_friction_ratio < 1.0 {
            return Err(SimError::config(
                "Static friction ratio below 1.0 would make static friction weaker than kinetic",
            ));
        }
        Ok(())
    }

    /// Get the timestep in seconds.
    #[must_use]
    pub const fn dt(&self) -> f64 {
        self.timestep.dt
    }

    /// Get the duration cap in seconds.
    #[must_use]
    pub const fn max_duration(&self) -> f64 {
        self.timestep.max_duration
    }

    /// Number of steps after the initial sample that fit in the duration cap.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        // Nudge before flooring so 10.0 / 0.02 lands on 500, not 499.
        (self.timestep.max_duration / self.timestep.dt + 1e-9).floor() as usize
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            timestep: TimestepConfig::default(),
            friction: FrictionConfig::default(),
            jidoka: JidokaConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    dt: Option<f64>,
    max_duration: Option<f64>,
    static_friction_ratio: Option<f64>,
    velocity_epsilon: Option<f64>,
    jidoka: Option<JidokaConfig>,
}

impl EngineConfigBuilder {
    /// Set the timestep in seconds.
    #[must_use]
    pub const fn timestep(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Set the duration cap in seconds.
    #[must_use]
    pub const fn max_duration(mut self, seconds: f64) -> Self {
        self.max_duration = Some(seconds);
        self
    }

    /// Set the static-to-kinetic friction ratio.
    #[must_use]
    pub const fn static_friction_ratio(mut self, ratio: f64) -> Self {
        self.static_friction_ratio = Some(ratio);
        self
    }

    /// Set the at-rest velocity threshold.
    #[must_use]
    pub const fn velocity_epsilon(mut self, epsilon: f64) -> Self {
        self.velocity_epsilon = Some(epsilon);
        self
    }

    /// Set Jidoka configuration.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // JidokaConfig doesn't impl Copy
    pub fn jidoka(mut self, config: JidokaConfig) -> Self {
        self.jidoka = Some(config);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> EngineConfig {
        let mut config = EngineConfig::default();

        if let Some(dt) = self.dt {
            config.timestep.dt = dt;
        }
        if let Some(max_duration) = self.max_duration {
            config.timestep.max_duration = max_duration;
        }
        if let Some(ratio) = self.static_friction_ratio {
            config.friction.static_friction_ratio = ratio;
        }
        if let Some(epsilon) = self.velocity_epsilon {
            config.friction.velocity_epsilon = epsilon;
        }
        if let Some(jidoka) = self.jidoka {
            config.jidoka = jidoka;
        }

        config
    }
}

/// Fixed-step timing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TimestepConfig {
    /// Output step in seconds.
    #[validate(range(min = 0.000_001, max = 1.0))]
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Duration cap in seconds.
    #[validate(range(min = 0.000_001, max = 3600.0))]
    #[serde(default = "default_max_duration")]
    pub max_duration: f64,
}

const fn default_dt() -> f64 {
    DEFAULT_DT
}

const fn default_max_duration() -> f64 {
    DEFAULT_MAX_DURATION
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            max_duration: DEFAULT_MAX_DURATION,
        }
    }
}

/// Coulomb friction settings shared by the friction-bearing models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FrictionConfig {
    /// μs / μk.
    #[validate(range(min = 1.0, max = 10.0))]
    #[serde(default = "default_static_friction_ratio")]
    pub static_friction_ratio: f64,
    /// At-rest velocity threshold (m/s).
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_velocity_epsilon")]
    pub velocity_epsilon: f64,
}

const fn default_static_friction_ratio() -> f64 {
    STATIC_FRICTION_RATIO
}

const fn default_velocity_epsilon() -> f64 {
    VELOCITY_EPSILON
}

impl Default for FrictionConfig {
    fn default() -> Self {
        Self {
            static_friction_ratio: STATIC_FRICTION_RATIO,
            velocity_epsilon: VELOCITY_EPSILON,
        }
    }
}
