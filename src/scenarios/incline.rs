//! Block on an inclined plane with Coulomb friction.
//!
//! The block moves along the slope coordinate `s` (0 at the top, positive
//! down-slope, `length` at the bottom). Gravity along the slope is
//! `m·g·sin θ`; an optional applied force pushes up-slope. Friction follows
//! the shared regime machine in [`crate::domains::physics`].

use serde::{Deserialize, Serialize};

use crate::config::FrictionConfig;
use crate::domains::physics::{CoulombContact, FrictionRegime};
use crate::engine::state::Vec2;
use crate::engine::trajectory::{BodyKinematics, MotionSample, Termination};
use crate::engine::MotionModel;
use crate::scenarios::params::{keys, ScenarioParameters};
use crate::scenarios::MotionModelKind;

/// Incline length used when `inclineLength` is absent (m).
pub const DEFAULT_INCLINE_LENGTH: f64 = 10.0;

/// Which way the block is moving at `t = 0`, and so where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlopeDirection {
    /// Starts at the top, moving down.
    DownSlope,
    /// Starts at the bottom, moving up.
    UpSlope,
}

impl SlopeDirection {
    /// `+1` (or any non-negative value) is down-slope; negative is up-slope.
    #[must_use]
    pub fn from_sign(value: f64) -> Self {
        if value < 0.0 {
            Self::UpSlope
        } else {
            Self::DownSlope
        }
    }

    /// Sign in the slope coordinate (positive down-slope).
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::DownSlope => 1.0,
            Self::UpSlope => -1.0,
        }
    }
}

/// Configuration for a block on an incline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InclineConfig {
    /// Incline angle above horizontal (radians).
    pub angle: f64,
    /// Length of the slope (m).
    pub length: f64,
    /// Block mass (kg).
    pub mass: f64,
    /// Gravitational acceleration (m/s²).
    pub g: f64,
    /// Kinetic friction coefficient.
    pub kinetic_friction: f64,
    /// Static / kinetic coefficient ratio.
    pub static_friction_ratio: f64,
    /// Speed below which the block counts as at rest (m/s).
    pub velocity_epsilon: f64,
    /// Initial direction of motion.
    pub direction: SlopeDirection,
    /// Initial speed along the slope (m/s).
    pub speed: f64,
    /// Applied force pushing up-slope (N).
    pub applied_force: f64,
}

impl Default for InclineConfig {
    fn default() -> Self {
        let friction = FrictionConfig::default();
        Self {
            angle: 30f64.to_radians(),
            length: DEFAULT_INCLINE_LENGTH,
            mass: 1.0,
            g: 9.8,
            kinetic_friction: 0.0,
            static_friction_ratio: friction.static_friction_ratio,
            velocity_epsilon: friction.velocity_epsilon,
            direction: SlopeDirection::DownSlope,
            speed: 0.0,
            applied_force: 0.0,
        }
    }
}

impl InclineConfig {
    /// Build from scenario parameters.
    #[must_use]
    pub fn from_parameters(params: &ScenarioParameters, friction: &FrictionConfig) -> Self {
        Self {
            angle: params.angle_or(keys::INCLINE_ANGLE, 30.0),
            length: params.get_or(keys::INCLINE_LENGTH, DEFAULT_INCLINE_LENGTH),
            mass: params.mass(),
            g: params.gravity(),
            kinetic_friction: params.friction(),
            static_friction_ratio: friction.static_friction_ratio,
            velocity_epsilon: friction.velocity_epsilon,
            direction: SlopeDirection::from_sign(params.get_or(keys::DIRECTION, 1.0)),
            speed: params.get_or(keys::VELOCITY, 0.0).abs(),
            applied_force: params.get_or(keys::FORCE, 0.0),
        }
    }

    /// Normal force from the slope (N).
    #[must_use]
    pub fn normal_force(&self) -> f64 {
        self.mass * self.g * self.angle.cos()
    }

    /// Net non-friction force along the slope, positive down-slope (N).
    #[must_use]
    pub fn driving_force(&self) -> f64 {
        self.mass * self.g * self.angle.sin() - self.applied_force
    }

    /// Height of the top of the slope above its bottom (m).
    #[must_use]
    pub fn height(&self) -> f64 {
        self.length * self.angle.sin()
    }
}

/// Slope position, velocity and friction regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclineState {
    /// Distance from the top, positive down-slope (m).
    pub distance: f64,
    /// Velocity along the slope, positive down-slope (m/s).
    pub velocity: f64,
    /// Acceleration applied on the step that produced this state (m/s²).
    pub acceleration: f64,
    /// Friction regime.
    pub regime: FrictionRegime,
}

/// Block-on-incline model.
#[derive(Debug, Clone, PartialEq)]
pub struct InclineModel {
    config: InclineConfig,
    contact: CoulombContact,
    driving_force: f64,
    /// Unit vector pointing down-slope.
    down_slope: Vec2,
}

impl InclineModel {
    /// Create a new incline model.
    #[must_use]
    pub fn new(config: InclineConfig) -> Self {
        let contact = CoulombContact::new(
            config.kinetic_friction,
            config.static_friction_ratio,
            config.normal_force(),
            config.velocity_epsilon,
        );
        let driving_force = config.driving_force();
        let down_slope = Vec2::new(config.angle.cos(), -config.angle.sin());
        Self {
            config,
            contact,
            driving_force,
            down_slope,
        }
    }

    /// Get configuration.
    #[must_use]
    pub const fn config(&self) -> &InclineConfig {
        &self.config
    }

    /// Friction contact between block and slope.
    #[must_use]
    pub const fn contact(&self) -> &CoulombContact {
        &self.contact
    }
}

impl MotionModel for InclineModel {
    type State = InclineState;

    fn kind(&self) -> MotionModelKind {
        MotionModelKind::InclineFriction
    }

    fn initial_state(&self) -> InclineState {
        let InclineConfig {
            direction,
            speed,
            length,
            velocity_epsilon,
            mass,
            ..
        } = self.config;
        let distance = match direction {
            SlopeDirection::DownSlope => 0.0,
            SlopeDirection::UpSlope => length,
        };
        let velocity = direction.sign() * speed;
        let regime = FrictionRegime::from_velocity(velocity, velocity_epsilon);
        let (_, acceleration) = self.contact.balance(regime, velocity, self.driving_force, mass);
        InclineState {
            distance,
            velocity,
            acceleration,
            regime,
        }
    }

    fn step(&self, state: &InclineState, dt: f64) -> InclineState {
        let step = self
            .contact
            .step(state.regime, state.velocity, self.driving_force, self.config.mass, dt);
        InclineState {
            distance: state.distance + step.velocity * dt,
            velocity: step.velocity,
            acceleration: step.acceleration,
            regime: step.regime,
        }
    }

    fn sample(&self, state: &InclineState, time: f64) -> MotionSample {
        let InclineConfig {
            angle, length, mass, g, ..
        } = self.config;
        let height = (length - state.distance) * angle.sin();
        let position = Vec2::new(state.distance * angle.cos(), height);
        let body = BodyKinematics::new(
            position,
            self.down_slope * state.velocity,
            self.down_slope * state.acceleration,
        );
        let kinetic = 0.5 * mass * state.velocity * state.velocity;
        MotionSample::new(time, body, kinetic, mass * g * height)
    }

    fn termination(&self, previous: &InclineState, current: &InclineState) -> Option<Termination> {
        if current.distance < 0.0 || current.distance > self.config.length {
            Some(Termination::LeftSurface)
        } else if previous.regime.is_sliding() && current.regime == FrictionRegime::Locked {
            Some(Termination::CameToRest)
        } else {
            None
        }
    }

    fn conserves_energy(&self) -> bool {
        self.config.kinetic_friction == 0.0 && self.config.applied_force == 0.0
    }
}
