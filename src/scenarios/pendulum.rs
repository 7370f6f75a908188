//! Simple pendulum scenario.
//!
//! Integrates the exact nonlinear equation `θ'' = -(g/L)·sin θ - (b/m)·θ'`
//! in angle space and projects onto the plane with the pivot at the
//! origin:
//! - `x = L·sin θ`
//! - `y = -L·cos θ` (y up, so the bob hangs below the pivot)

use serde::{Deserialize, Serialize};

use crate::domains::physics::semi_implicit_euler;
use crate::engine::state::Vec2;
use crate::engine::trajectory::{BodyKinematics, MotionSample, Termination};
use crate::engine::MotionModel;
use crate::scenarios::params::{keys, ScenarioParameters};
use crate::scenarios::MotionModelKind;

/// Sub-steps integrated per output tick.
///
/// Keeps the undamped energy error well under 1% at the default tick.
pub const PENDULUM_SUBSTEPS: u32 = 10;

/// Release angle used when `initialAngle` is absent (deg).
pub const DEFAULT_INITIAL_ANGLE_DEG: f64 = 30.0;

/// Configuration for a simple pendulum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendulumConfig {
    /// Length of pendulum (m).
    pub length: f64,
    /// Mass of bob (kg).
    pub mass: f64,
    /// Gravitational acceleration (m/s²).
    pub g: f64,
    /// Damping coefficient (kg/s).
    pub damping: f64,
    /// Initial angle (radians, 0 = hanging down).
    pub initial_angle: f64,
    /// Initial angular velocity (rad/s).
    pub initial_angular_velocity: f64,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            length: 1.0,
            mass: 1.0,
            g: 9.8,
            damping: 0.0,
            initial_angle: DEFAULT_INITIAL_ANGLE_DEG.to_radians(),
            initial_angular_velocity: 0.0,
        }
    }
}

impl PendulumConfig {
    /// Build from scenario parameters.
    #[must_use]
    pub fn from_parameters(params: &ScenarioParameters) -> Self {
        Self {
            length: params.get_or(keys::LENGTH, 1.0),
            mass: params.mass(),
            g: params.gravity(),
            damping: params.get_or(keys::DAMPING, 0.0),
            initial_angle: params.angle_or(keys::INITIAL_ANGLE, DEFAULT_INITIAL_ANGLE_DEG),
            initial_angular_velocity: params.get_or(keys::ANGULAR_VELOCITY, 0.0),
        }
    }

    /// Create a small-angle pendulum (linearized regime).
    #[must_use]
    pub fn small_angle() -> Self {
        Self {
            initial_angle: 0.1, // ~6 degrees
            ..Default::default()
        }
    }

    /// Create a large-angle pendulum (nonlinear regime).
    #[must_use]
    pub fn large_angle() -> Self {
        Self {
            initial_angle: std::f64::consts::FRAC_PI_2,
            ..Default::default()
        }
    }

    /// Create a damped pendulum.
    #[must_use]
    pub fn damped(damping: f64) -> Self {
        Self {
            damping,
            ..Default::default()
        }
    }

    /// Get theoretical period for small oscillations.
    #[must_use]
    pub fn small_angle_period(&self) -> f64 {
        2.0 * std::f64::consts::PI * (self.length / self.g).sqrt()
    }
}

/// Angle and angular velocity of the bob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumState {
    /// Angle from the downward vertical (rad).
    pub theta: f64,
    /// Angular velocity (rad/s).
    pub omega: f64,
}

/// Simple pendulum model.
#[derive(Debug, Clone, PartialEq)]
pub struct PendulumModel {
    config: PendulumConfig,
}

impl PendulumModel {
    /// Create a new pendulum model.
    #[must_use]
    pub const fn new(config: PendulumConfig) -> Self {
        Self { config }
    }

    /// Get configuration.
    #[must_use]
    pub const fn config(&self) -> &PendulumConfig {
        &self.config
    }

    /// Angular acceleration at `state` (rad/s²).
    #[must_use]
    pub fn angular_acceleration(&self, state: &PendulumState) -> f64 {
        let PendulumConfig {
            length, mass, g, damping, ..
        } = self.config;
        -(g / length) * state.theta.sin() - (damping / mass) * state.omega
    }

    /// Bob position relative to the pivot.
    #[must_use]
    pub fn position(&self, state: &PendulumState) -> Vec2 {
        let length = self.config.length;
        Vec2::new(length * state.theta.sin(), -length * state.theta.cos())
    }

    /// Height of the bob above its lowest point (m).
    #[must_use]
    pub fn height(&self, state: &PendulumState) -> f64 {
        self.config.length * (1.0 - state.theta.cos())
    }
}

impl MotionModel for PendulumModel {
    type State = PendulumState;

    fn kind(&self) -> MotionModelKind {
        MotionModelKind::Pendulum
    }

    fn initial_state(&self) -> PendulumState {
        PendulumState {
            theta: self.config.initial_angle,
            omega: self.config.initial_angular_velocity,
        }
    }

    fn step(&self, state: &PendulumState, dt: f64) -> PendulumState {
        let h = dt / f64::from(PENDULUM_SUBSTEPS);
        let mut next = *state;
        for _ in 0..PENDULUM_SUBSTEPS {
            let alpha = self.angular_acceleration(&next);
            let (theta, omega) = semi_implicit_euler(next.theta, next.omega, alpha, h);
            next = PendulumState { theta, omega };
        }
        next
    }

    fn sample(&self, state: &PendulumState, time: f64) -> MotionSample {
        let PendulumConfig { length, mass, g, .. } = self.config;
        let (sin, cos) = state.theta.sin_cos();
        let alpha = self.angular_acceleration(state);

        // Tangent (cos θ, sin θ) and inward normal (-sin θ, cos θ).
        let velocity = Vec2::new(length * state.omega * cos, length * state.omega * sin);
        let tangential = length * alpha;
        let centripetal = length * state.omega * state.omega;
        let acceleration = Vec2::new(
            tangential * cos - centripetal * sin,
            tangential * sin + centripetal * cos,
        );

        let kinetic = 0.5 * mass * length * length * state.omega * state.omega;
        let potential = mass * g * self.height(state);
        MotionSample::new(
            time,
            BodyKinematics::new(self.position(state), velocity, acceleration),
            kinetic,
            potential,
        )
    }

    fn termination(&self, _previous: &PendulumState, _current: &PendulumState) -> Option<Termination> {
        None
    }

    fn conserves_energy(&self) -> bool {
        self.config.damping == 0.0
    }
}
