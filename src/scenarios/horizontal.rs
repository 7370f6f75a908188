//! Block on a horizontal surface pushed by a constant force.

use serde::{Deserialize, Serialize};

use crate::config::FrictionConfig;
use crate::domains::physics::{CoulombContact, FrictionRegime};
use crate::engine::state::Vec2;
use crate::engine::trajectory::{BodyKinematics, MotionSample, Termination};
use crate::engine::MotionModel;
use crate::scenarios::params::{keys, ScenarioParameters};
use crate::scenarios::MotionModelKind;

/// Configuration for a pushed block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizontalFrictionConfig {
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
    /// Applied force along +x (N).
    pub force: f64,
    /// Initial signed velocity (m/s).
    pub initial_velocity: f64,
}

impl Default for HorizontalFrictionConfig {
    fn default() -> Self {
        let friction = FrictionConfig::default();
        Self {
            mass: 1.0,
            g: 9.8,
            kinetic_friction: 0.0,
            static_friction_ratio: friction.static_friction_ratio,
            velocity_epsilon: friction.velocity_epsilon,
            force: 0.0,
            initial_velocity: 0.0,
        }
    }
}

impl HorizontalFrictionConfig {
    /// Build from scenario parameters.
    #[must_use]
    pub fn from_parameters(params: &ScenarioParameters, friction: &FrictionConfig) -> Self {
        Self {
            mass: params.mass(),
            g: params.gravity(),
            kinetic_friction: params.friction(),
            static_friction_ratio: friction.static_friction_ratio,
            velocity_epsilon: friction.velocity_epsilon,
            force: params.get_or(keys::FORCE, 0.0),
            initial_velocity: params.get_or(keys::VELOCITY, 0.0),
        }
    }

    /// Normal force from the surface (N).
    #[must_use]
    pub fn normal_force(&self) -> f64 {
        self.mass * self.g
    }
}

/// Position, velocity and friction regime along x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalState {
    /// Position (m).
    pub position: f64,
    /// Velocity (m/s).
    pub velocity: f64,
    /// Acceleration applied on the step that produced this state (m/s²).
    pub acceleration: f64,
    /// Friction regime.
    pub regime: FrictionRegime,
}

/// Pushed-block model.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalFrictionModel {
    config: HorizontalFrictionConfig,
    contact: CoulombContact,
}

impl HorizontalFrictionModel {
    /// Create a new pushed-block model.
    #[must_use]
    pub fn new(config: HorizontalFrictionConfig) -> Self {
        let contact = CoulombContact::new(
            config.kinetic_friction,
            config.static_friction_ratio,
            config.normal_force(),
            config.velocity_epsilon,
        );
        Self { config, contact }
    }

    /// Get configuration.
    #[must_use]
    pub const fn config(&self) -> &HorizontalFrictionConfig {
        &self.config
    }
}

impl MotionModel for HorizontalFrictionModel {
    type State = HorizontalState;

    fn kind(&self) -> MotionModelKind {
        MotionModelKind::HorizontalFriction
    }

    fn initial_state(&self) -> HorizontalState {
        let velocity = self.config.initial_velocity;
        let regime = FrictionRegime::from_velocity(velocity, self.config.velocity_epsilon);
        let (_, acceleration) = self
            .contact
            .balance(regime, velocity, self.config.force, self.config.mass);
        HorizontalState {
            position: 0.0,
            velocity,
            acceleration,
            regime,
        }
    }

    fn step(&self, state: &HorizontalState, dt: f64) -> HorizontalState {
        let step = self
            .contact
            .step(state.regime, state.velocity, self.config.force, self.config.mass, dt);
        HorizontalState {
            position: state.position + step.velocity * dt,
            velocity: step.velocity,
            acceleration: step.acceleration,
            regime: step.regime,
        }
    }

    fn sample(&self, state: &HorizontalState, time: f64) -> MotionSample {
        let body = BodyKinematics::new(
            Vec2::new(state.position, 0.0),
            Vec2::new(state.velocity, 0.0),
            Vec2::new(state.acceleration, 0.0),
        );
        let kinetic = 0.5 * self.config.mass * state.velocity * state.velocity;
        MotionSample::new(time, body, kinetic, 0.0)
    }

    fn termination(&self, previous: &HorizontalState, current: &HorizontalState) -> Option<Termination> {
        (previous.regime.is_sliding() && current.regime == FrictionRegime::Locked).then_some(Termination::CameToRest)
    }
}
