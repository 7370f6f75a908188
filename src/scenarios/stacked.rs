//! Stacked blocks: a force on the bottom block, friction between the two.
//!
//! The applied force is constant and both blocks start at rest, so the
//! contact state is resolved once and holds for the whole run.

use serde::{Deserialize, Serialize};

use crate::domains::physics::semi_implicit_euler;
use crate::engine::state::Vec2;
use crate::engine::trajectory::{BodyKinematics, MotionSample, Termination};
use crate::engine::MotionModel;
use crate::scenarios::params::{keys, ScenarioParameters};
use crate::scenarios::MotionModelKind;

/// How the two blocks move relative to each other and the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockContact {
    /// Ground friction holds the applied force; nothing moves.
    Resting,
    /// Both blocks accelerate together.
    Rigid,
    /// The top block slips and lags behind the bottom one.
    Slipping,
}

/// Configuration for the stacked blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBlockConfig {
    /// Top block (kg).
    pub top_mass: f64,
    /// Bottom block (kg).
    pub bottom_mass: f64,
    /// Force on the bottom block (N).
    pub force: f64,
    /// Friction coefficient between the blocks.
    pub block_friction: f64,
    /// Friction coefficient between the bottom block and the ground.
    pub ground_friction: f64,
    /// Gravitational acceleration (m/s²).
    pub g: f64,
}

impl Default for StackedBlockConfig {
    fn default() -> Self {
        Self {
            top_mass: 1.0,
            bottom_mass: 1.0,
            force: 0.0,
            block_friction: 0.0,
            ground_friction: 0.0,
            g: 9.8,
        }
    }
}

impl StackedBlockConfig {
    /// Build from scenario parameters.
    #[must_use]
    pub fn from_parameters(params: &ScenarioParameters) -> Self {
        Self {
            top_mass: params.mass(),
            bottom_mass: params.get_or(keys::MASS2, 1.0),
            force: params.get_or(keys::FORCE, 0.0),
            block_friction: params.friction(),
            ground_friction: params.get_or(keys::GROUND_FRICTION, 0.0),
            g: params.gravity(),
        }
    }

    /// Kinetic friction on the bottom block from the ground (N).
    #[must_use]
    pub fn ground_friction_force(&self) -> f64 {
        self.ground_friction * (self.top_mass + self.bottom_mass) * self.g
    }

    /// Largest friction force the bottom block can exert on the top one (N).
    #[must_use]
    pub fn max_block_friction(&self) -> f64 {
        self.block_friction * self.top_mass * self.g
    }

    /// Contact state and the accelerations `(top, bottom)` it implies.
    #[must_use]
    pub fn resolve(&self) -> (BlockContact, f64, f64) {
        let ground = self.ground_friction_force();
        if self.force <= ground {
            return (BlockContact::Resting, 0.0, 0.0);
        }

        let common = (self.force - ground) / (self.top_mass + self.bottom_mass);
        let max_block = self.max_block_friction();
        if self.top_mass * common <= max_block {
            return (BlockContact::Rigid, common, common);
        }

        let top = max_block / self.top_mass;
        let bottom = (self.force - ground - max_block) / self.bottom_mass;
        (BlockContact::Slipping, top, bottom)
    }
}

/// Positions and velocities of both blocks along x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedState {
    /// Top block position (m).
    pub top_position: f64,
    /// Top block velocity (m/s).
    pub top_velocity: f64,
    /// Bottom block position (m).
    pub bottom_position: f64,
    /// Bottom block velocity (m/s).
    pub bottom_velocity: f64,
}

/// Stacked-block model.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedBlockModel {
    config: StackedBlockConfig,
    contact: BlockContact,
    top_acceleration: f64,
    bottom_acceleration: f64,
}

impl StackedBlockModel {
    /// Create a new stacked-block model.
    #[must_use]
    pub fn new(config: StackedBlockConfig) -> Self {
        let (contact, top_acceleration, bottom_acceleration) = config.resolve();
        Self {
            config,
            contact,
            top_acceleration,
            bottom_acceleration,
        }
    }

    /// Get configuration.
    #[must_use]
    pub const fn config(&self) -> &StackedBlockConfig {
        &self.config
    }

    /// Contact state for the whole run.
    #[must_use]
    pub const fn contact(&self) -> BlockContact {
        self.contact
    }

    /// Accelerations `(top, bottom)` (m/s²).
    #[must_use]
    pub const fn accelerations(&self) -> (f64, f64) {
        (self.top_acceleration, self.bottom_acceleration)
    }
}

impl MotionModel for StackedBlockModel {
    type State = StackedState;

    fn kind(&self) -> MotionModelKind {
        MotionModelKind::StackedBlock
    }

    fn initial_state(&self) -> StackedState {
        StackedState {
            top_position: 0.0,
            top_velocity: 0.0,
            bottom_position: 0.0,
            bottom_velocity: 0.0,
        }
    }

    fn step(&self, state: &StackedState, dt: f64) -> StackedState {
        let (top_position, top_velocity) =
            semi_implicit_euler(state.top_position, state.top_velocity, self.top_acceleration, dt);
        let (bottom_position, bottom_velocity) = semi_implicit_euler(
            state.bottom_position,
            state.bottom_velocity,
            self.bottom_acceleration,
            dt,
        );
        StackedState {
            top_position,
            top_velocity,
            bottom_position,
            bottom_velocity,
        }
    }

    fn sample(&self, state: &StackedState, time: f64) -> MotionSample {
        let top = BodyKinematics::new(
            Vec2::new(state.top_position, 0.0),
            Vec2::new(state.top_velocity, 0.0),
            Vec2::new(self.top_acceleration, 0.0),
        );
        let bottom = BodyKinematics::new(
            Vec2::new(state.bottom_position, 0.0),
            Vec2::new(state.bottom_velocity, 0.0),
            Vec2::new(self.bottom_acceleration, 0.0),
        );
        let kinetic = 0.5 * self.config.top_mass * state.top_velocity.powi(2)
            + 0.5 * self.config.bottom_mass * state.bottom_velocity.powi(2);
        MotionSample::new(time, top, kinetic, 0.0).with_companion(bottom)
    }

    fn termination(&self, _previous: &StackedState, _current: &StackedState) -> Option<Termination> {
        None
    }
}
