//! Incline with a pulley: a block on the slope tied to a hanging mass.
//!
//! The pulley sits at the top of the slope. Both bodies share one rope
//! coordinate `s` (0 with the block halfway up the slope, positive when the
//! hanging mass descends and the block moves up).

use serde::{Deserialize, Serialize};

use crate::config::FrictionConfig;
use crate::domains::physics::{CoulombContact, FrictionRegime};
use crate::engine::state::Vec2;
use crate::engine::trajectory::{BodyKinematics, MotionSample, Termination};
use crate::engine::MotionModel;
use crate::scenarios::incline::DEFAULT_INCLINE_LENGTH;
use crate::scenarios::params::{keys, ScenarioParameters};
use crate::scenarios::MotionModelKind;

/// Hanging mass used when `mass2` is absent (kg).
pub const DEFAULT_HANGING_MASS: f64 = 1.0;

/// Configuration for the incline-pulley system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InclinePulleyConfig {
    /// Incline angle above horizontal (radians).
    pub angle: f64,
    /// Length of the slope (m).
    pub length: f64,
    /// Block on the slope (kg).
    pub block_mass: f64,
    /// Hanging mass (kg).
    pub hanging_mass: f64,
    /// Gravitational acceleration (m/s²).
    pub g: f64,
    /// Kinetic friction coefficient between block and slope.
    pub kinetic_friction: f64,
    /// Static / kinetic coefficient ratio.
    pub static_friction_ratio: f64,
    /// Speed below which the system counts as at rest (m/s).
    pub velocity_epsilon: f64,
    /// Initial rope velocity, positive with the hanging mass descending (m/s).
    pub initial_velocity: f64,
}

impl Default for InclinePulleyConfig {
    fn default() -> Self {
        let friction = FrictionConfig::default();
        Self {
            angle: 30f64.to_radians(),
            length: DEFAULT_INCLINE_LENGTH,
            block_mass: 1.0,
            hanging_mass: DEFAULT_HANGING_MASS,
            g: 9.8,
            kinetic_friction: 0.0,
            static_friction_ratio: friction.static_friction_ratio,
            velocity_epsilon: friction.velocity_epsilon,
            initial_velocity: 0.0,
        }
    }
}

impl InclinePulleyConfig {
    /// Build from scenario parameters.
    #[must_use]
    pub fn from_parameters(params: &ScenarioParameters, friction: &FrictionConfig) -> Self {
        Self {
            angle: params.angle_or(keys::INCLINE_ANGLE, 30.0),
            length: params.get_or(keys::INCLINE_LENGTH, DEFAULT_INCLINE_LENGTH),
            block_mass: params.mass(),
            hanging_mass: params.get_or(keys::MASS2, DEFAULT_HANGING_MASS),
            g: params.gravity(),
            kinetic_friction: params.friction(),
            static_friction_ratio: friction.static_friction_ratio,
            velocity_epsilon: friction.velocity_epsilon,
            initial_velocity: params.get_or(keys::VELOCITY, 0.0),
        }
    }

    /// Net non-friction force along the rope (N).
    #[must_use]
    pub fn driving_force(&self) -> f64 {
        self.hanging_mass * self.g - self.block_mass * self.g * self.angle.sin()
    }

    /// Normal force on the block (N).
    #[must_use]
    pub fn normal_force(&self) -> f64 {
        self.block_mass * self.g * self.angle.cos()
    }

    /// Mass accelerated by the driving force (kg).
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.block_mass + self.hanging_mass
    }
}

/// Rope coordinate, velocity and friction regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulleyState {
    /// Rope displacement from the start (m).
    pub displacement: f64,
    /// Rope velocity (m/s).
    pub velocity: f64,
    /// Acceleration applied on the step that produced this state (m/s²).
    pub acceleration: f64,
    /// Friction regime of the block on the slope.
    pub regime: FrictionRegime,
}

/// Incline-pulley model.
#[derive(Debug, Clone, PartialEq)]
pub struct InclinePulleyModel {
    config: InclinePulleyConfig,
    contact: CoulombContact,
    driving_force: f64,
    /// Unit vector pointing up the slope.
    up_slope: Vec2,
}

impl InclinePulleyModel {
    /// Create a new incline-pulley model.
    #[must_use]
    pub fn new(config: InclinePulleyConfig) -> Self {
        let contact = CoulombContact::new(
            config.kinetic_friction,
            config.static_friction_ratio,
            config.normal_force(),
            config.velocity_epsilon,
        );
        let driving_force = config.driving_force();
        let up_slope = Vec2::from_polar(1.0, config.angle);
        Self {
            config,
            contact,
            driving_force,
            up_slope,
        }
    }

    /// Get configuration.
    #[must_use]
    pub const fn config(&self) -> &InclinePulleyConfig {
        &self.config
    }

    /// Block distance from the bottom of the slope (m).
    #[must_use]
    pub fn block_distance(&self, state: &PulleyState) -> f64 {
        0.5 * self.config.length + state.displacement
    }

    /// Hanging mass position; the pulley is at the top of the slope.
    #[must_use]
    pub fn hanging_position(&self, state: &PulleyState) -> Vec2 {
        let pulley = self.up_slope * self.config.length;
        Vec2::new(pulley.x, pulley.y - (0.5 * self.config.length + state.displacement))
    }
}

impl MotionModel for InclinePulleyModel {
    type State = PulleyState;

    fn kind(&self) -> MotionModelKind {
        MotionModelKind::InclinePulley
    }

    fn initial_state(&self) -> PulleyState {
        let velocity = self.config.initial_velocity;
        let regime = FrictionRegime::from_velocity(velocity, self.config.velocity_epsilon);
        let (_, acceleration) =
            self.contact
                .balance(regime, velocity, self.driving_force, self.config.total_mass());
        PulleyState {
            displacement: 0.0,
            velocity,
            acceleration,
            regime,
        }
    }

    fn step(&self, state: &PulleyState, dt: f64) -> PulleyState {
        let step = self.contact.step(
            state.regime,
            state.velocity,
            self.driving_force,
            self.config.total_mass(),
            dt,
        );
        PulleyState {
            displacement: state.displacement + step.velocity * dt,
            velocity: step.velocity,
            acceleration: step.acceleration,
            regime: step.regime,
        }
    }

    fn sample(&self, state: &PulleyState, time: f64) -> MotionSample {
        let InclinePulleyConfig {
            angle,
            length,
            block_mass,
            hanging_mass,
            g,
            ..
        } = self.config;
        let distance = self.block_distance(state);

        let block = BodyKinematics::new(
            self.up_slope * distance,
            self.up_slope * state.velocity,
            self.up_slope * state.acceleration,
        );
        let hanging = BodyKinematics::new(
            self.hanging_position(state),
            Vec2::new(0.0, -state.velocity),
            Vec2::new(0.0, -state.acceleration),
        );

        let kinetic = 0.5 * (block_mass + hanging_mass) * state.velocity * state.velocity;
        // Each body is referenced to its lowest reachable point.
        let block_potential = block_mass * g * distance * angle.sin();
        let hanging_potential = hanging_mass * g * (0.5 * length - state.displacement);
        MotionSample::new(time, block, kinetic, block_potential + hanging_potential).with_companion(hanging)
    }

    fn termination(&self, previous: &PulleyState, current: &PulleyState) -> Option<Termination> {
        let distance = self.block_distance(current);
        if distance < 0.0 || distance > self.config.length {
            Some(Termination::LeftSurface)
        } else if previous.regime.is_sliding() && current.regime == FrictionRegime::Locked {
            Some(Termination::CameToRest)
        } else {
            None
        }
    }

    fn conserves_energy(&self) -> bool {
        self.config.kinetic_friction == 0.0
    }
}
