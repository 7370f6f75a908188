//! Projectile and free-flight scenarios.
//!
//! Covers the whole "free flight" family with one model:
//! - oblique and vertical throws (ballistic, gravity only)
//! - free fall (launch angle 270°, zero speed)
//! - 1-D uniform acceleration along the launch line (no gravity)

use serde::{Deserialize, Serialize};

use crate::domains::physics::semi_implicit_euler_2d;
use crate::engine::state::Vec2;
use crate::engine::trajectory::{BodyKinematics, MotionSample, Termination};
use crate::engine::MotionModel;
use crate::scenarios::params::{keys, ScenarioParameters};
use crate::scenarios::MotionModelKind;

/// Launch speed used when `velocity` is absent (m/s).
pub const DEFAULT_SPEED: f64 = 20.0;

/// Launch angle used when `angle` is absent (deg).
pub const DEFAULT_ANGLE_DEG: f64 = 45.0;

/// Floor for downward launches from ground level (m).
///
/// Gives a free fall room to develop before it is cut off.
pub const FREE_FALL_FLOOR: f64 = -50.0;

const DIRECTION_EPSILON: f64 = 1e-9;

/// What accelerates the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum ProjectileMode {
    /// Gravity only: acceleration `(0, -g)`.
    Ballistic,
    /// Constant acceleration along the launch line, no gravity.
    UniformAcceleration {
        /// Signed magnitude along the launch direction (m/s²).
        acceleration: f64,
    },
}

/// Configuration for a projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileConfig {
    /// Launch speed (m/s).
    pub speed: f64,
    /// Launch angle above +x (radians).
    pub angle: f64,
    /// Launch height (m).
    pub height: f64,
    /// Mass (kg).
    pub mass: f64,
    /// Gravitational acceleration (m/s²).
    pub g: f64,
    /// Height below which flight ends (m).
    pub floor: f64,
    /// Acceleration model.
    pub mode: ProjectileMode,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            angle: DEFAULT_ANGLE_DEG.to_radians(),
            height: 0.0,
            mass: 1.0,
            g: 9.8,
            floor: 0.0,
            mode: ProjectileMode::Ballistic,
        }
    }
}

impl ProjectileConfig {
    /// Build from scenario parameters.
    ///
    /// Uniform-acceleration mode is selected by an `acceleration` key, or
    /// by a horizontal launch from ground level (which under gravity would
    /// end on the first tick).
    #[must_use]
    pub fn from_parameters(params: &ScenarioParameters) -> Self {
        let speed = params.get_or(keys::VELOCITY, DEFAULT_SPEED);
        let angle = params.angle_or(keys::ANGLE, DEFAULT_ANGLE_DEG);
        let height = params.get_or(keys::HEIGHT, 0.0);

        let at_ground = height.abs() < DIRECTION_EPSILON;
        let horizontal = angle.sin().abs() < DIRECTION_EPSILON;
        let mode = match params.get(keys::ACCELERATION) {
            Some(acceleration) => ProjectileMode::UniformAcceleration { acceleration },
            None if horizontal && at_ground => ProjectileMode::UniformAcceleration { acceleration: 0.0 },
            None => ProjectileMode::Ballistic,
        };

        let downward = angle.sin() < -DIRECTION_EPSILON;
        let floor = params.get(keys::FLOOR).unwrap_or(
            if downward && at_ground && mode == ProjectileMode::Ballistic {
                FREE_FALL_FLOOR
            } else {
                0.0
            },
        );

        Self {
            speed,
            angle,
            height,
            mass: params.mass(),
            g: params.gravity(),
            floor,
            mode,
        }
    }

    /// Vertical throw (90°).
    #[must_use]
    pub fn vertical(speed: f64) -> Self {
        Self {
            speed,
            angle: std::f64::consts::FRAC_PI_2,
            ..Default::default()
        }
    }

    /// Drop from rest at ground level (270°, zero speed).
    #[must_use]
    pub fn free_fall() -> Self {
        Self {
            speed: 0.0,
            angle: 1.5 * std::f64::consts::PI,
            floor: FREE_FALL_FLOOR,
            ..Default::default()
        }
    }

    /// Initial velocity vector.
    #[must_use]
    pub fn launch_velocity(&self) -> Vec2 {
        Vec2::from_polar(self.speed, self.angle)
    }

    /// Acceleration acting on the body (constant in both modes).
    #[must_use]
    pub fn acceleration(&self) -> Vec2 {
        match self.mode {
            ProjectileMode::Ballistic => Vec2::new(0.0, -self.g),
            ProjectileMode::UniformAcceleration { acceleration } => Vec2::from_polar(acceleration, self.angle),
        }
    }

    /// Analytical time of flight back to the launch height (ballistic only).
    #[must_use]
    pub fn time_of_flight(&self) -> Option<f64> {
        match self.mode {
            ProjectileMode::Ballistic if self.g > 0.0 => {
                let vy = self.speed * self.angle.sin();
                (vy > 0.0).then(|| 2.0 * vy / self.g)
            }
            _ => None,
        }
    }

    /// Analytical range on level ground (ballistic only).
    #[must_use]
    pub fn range(&self) -> Option<f64> {
        self.time_of_flight()
            .map(|t| self.speed * self.angle.cos() * t)
    }
}

/// Position and velocity of the projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileState {
    /// Position (m).
    pub position: Vec2,
    /// Velocity (m/s).
    pub velocity: Vec2,
}

/// Projectile motion model.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileModel {
    config: ProjectileConfig,
    acceleration: Vec2,
}

impl ProjectileModel {
    /// Create a new projectile model.
    #[must_use]
    pub fn new(config: ProjectileConfig) -> Self {
        let acceleration = config.acceleration();
        Self { config, acceleration }
    }

    /// Get configuration.
    #[must_use]
    pub const fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    fn potential_energy(&self, y: f64) -> f64 {
        match self.config.mode {
            ProjectileMode::Ballistic => self.config.mass * self.config.g * (y - self.config.floor),
            ProjectileMode::UniformAcceleration { .. } => 0.0,
        }
    }
}

impl MotionModel for ProjectileModel {
    type State = ProjectileState;

    fn kind(&self) -> MotionModelKind {
        MotionModelKind::Projectile
    }

    fn initial_state(&self) -> ProjectileState {
        ProjectileState {
            position: Vec2::new(0.0, self.config.height),
            velocity: self.config.launch_velocity(),
        }
    }

    fn step(&self, state: &ProjectileState, dt: f64) -> ProjectileState {
        let (position, velocity) = semi_implicit_euler_2d(state.position, state.velocity, self.acceleration, dt);
        ProjectileState { position, velocity }
    }

    fn sample(&self, state: &ProjectileState, time: f64) -> MotionSample {
        let kinetic = 0.5 * self.config.mass * state.velocity.magnitude_squared();
        let potential = self.potential_energy(state.position.y);
        MotionSample::new(
            time,
            BodyKinematics::new(state.position, state.velocity, self.acceleration),
            kinetic,
            potential,
        )
    }

    fn termination(&self, _previous: &ProjectileState, current: &ProjectileState) -> Option<Termination> {
        (current.position.y < self.config.floor).then_some(Termination::Floor)
    }

    fn conserves_energy(&self) -> bool {
        self.config.mode == ProjectileMode::Ballistic
    }
}
