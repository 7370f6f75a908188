//! Conical pendulum scenario.
//!
//! The bob circles steadily at a fixed half-angle φ, so the motion has a
//! closed form and nothing is integrated. Samples report the top view: the
//! lateral coordinate goes in `position_y`.

use serde::{Deserialize, Serialize};

use crate::engine::state::Vec2;
use crate::engine::trajectory::{BodyKinematics, MotionSample, Termination};
use crate::engine::MotionModel;
use crate::scenarios::params::{keys, ScenarioParameters};
use crate::scenarios::MotionModelKind;

/// Half-angle used when `coneAngle` is absent (deg).
pub const DEFAULT_CONE_ANGLE_DEG: f64 = 30.0;

/// Configuration for a conical pendulum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConicalPendulumConfig {
    /// String length (m).
    pub length: f64,
    /// Half-angle of the cone (radians).
    pub cone_angle: f64,
    /// Mass of bob (kg).
    pub mass: f64,
    /// Gravitational acceleration (m/s²).
    pub g: f64,
}

impl Default for ConicalPendulumConfig {
    fn default() -> Self {
        Self {
            length: 1.0,
            cone_angle: DEFAULT_CONE_ANGLE_DEG.to_radians(),
            mass: 1.0,
            g: 9.8,
        }
    }
}

impl ConicalPendulumConfig {
    /// Build from scenario parameters.
    #[must_use]
    pub fn from_parameters(params: &ScenarioParameters) -> Self {
        Self {
            length: params.get_or(keys::LENGTH, 1.0),
            cone_angle: params.angle_or(keys::CONE_ANGLE, DEFAULT_CONE_ANGLE_DEG),
            mass: params.mass(),
            g: params.gravity(),
        }
    }

    /// Radius of the circle (m).
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.length * self.cone_angle.sin()
    }

    /// Depth of the circle below the pivot (m).
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.length * self.cone_angle.cos()
    }

    /// Angular speed around the vertical axis (rad/s).
    #[must_use]
    pub fn angular_speed(&self) -> f64 {
        (self.g / self.depth()).sqrt()
    }

    /// Time for one revolution (s).
    #[must_use]
    pub fn period(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.angular_speed()
    }
}

/// Conical pendulum model.
#[derive(Debug, Clone, PartialEq)]
pub struct ConicalPendulumModel {
    config: ConicalPendulumConfig,
    radius: f64,
    omega: f64,
}

impl ConicalPendulumModel {
    /// Create a new conical pendulum model.
    #[must_use]
    pub fn new(config: ConicalPendulumConfig) -> Self {
        let radius = config.radius();
        let omega = config.angular_speed();
        Self { config, radius, omega }
    }

    /// Get configuration.
    #[must_use]
    pub const fn config(&self) -> &ConicalPendulumConfig {
        &self.config
    }
}

impl MotionModel for ConicalPendulumModel {
    /// Ticks taken; the motion itself is a function of time.
    type State = u64;

    fn kind(&self) -> MotionModelKind {
        MotionModelKind::ConicalPendulum
    }

    fn initial_state(&self) -> u64 {
        0
    }

    fn step(&self, state: &u64, _dt: f64) -> u64 {
        state + 1
    }

    fn sample(&self, _state: &u64, time: f64) -> MotionSample {
        let ConicalPendulumConfig {
            length, cone_angle, mass, g,
        } = self.config;
        let (sin, cos) = (self.omega * time).sin_cos();
        let r = self.radius;
        let omega = self.omega;

        let position = Vec2::new(r * cos, r * sin);
        let velocity = Vec2::new(-r * omega * sin, r * omega * cos);
        let acceleration = position * -(omega * omega);

        let kinetic = 0.5 * mass * (omega * r).powi(2);
        let potential = mass * g * length * (1.0 - cone_angle.cos());
        MotionSample::new(
            time,
            BodyKinematics::new(position, velocity, acceleration),
            kinetic,
            potential,
        )
    }

    fn termination(&self, _previous: &u64, _current: &u64) -> Option<Termination> {
        None
    }

    fn conserves_energy(&self) -> bool {
        true
    }
}
