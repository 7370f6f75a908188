//! Shared physics for the motion models.
//!
//! - Semi-implicit (symplectic) Euler: kick the velocity with the current
//!   acceleration, then drift the position with the *new* velocity.
//! - Coulomb contact: the Locked ⇄ Sliding regime machine used by every
//!   friction-bearing model.
//!
//! # Regime machine
//!
//! The regime is carried from tick to tick instead of being re-derived
//! from the sign of a velocity that may have just crossed zero. A sliding
//! body whose kinetic friction would reverse its velocity within one tick
//! stops at exactly `v = 0`; the static test then decides whether it locks
//! or slides away in the direction of the driving force.
//!
//! ```text
//!            |F| <= μs·N                         |F| > μs·N
//! Locked ─────────────── Locked     Locked ─────────────── Sliding(sign F)
//! Sliding ── v crosses 0 and |F| <= μs·N ──► Locked
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::state::Vec2;

/// Driving forces within this band of the static limit count as held (N).
///
/// Absorbs round-off in balances such as `m2·g - m1·g·sin θ` that are
/// analytically zero.
pub const FORCE_EPSILON: f64 = 1e-9;

/// One semi-implicit Euler step for a scalar coordinate.
///
/// Returns `(position, velocity)` after the step.
#[must_use]
pub fn semi_implicit_euler(position: f64, velocity: f64, acceleration: f64, dt: f64) -> (f64, f64) {
    let velocity = velocity + acceleration * dt;
    (position + velocity * dt, velocity)
}

/// One semi-implicit Euler step for a planar body.
///
/// Returns `(position, velocity)` after the step.
#[must_use]
pub fn semi_implicit_euler_2d(position: Vec2, velocity: Vec2, acceleration: Vec2, dt: f64) -> (Vec2, Vec2) {
    let velocity = velocity + acceleration * dt;
    (position + velocity * dt, velocity)
}

/// Friction regime of a body in contact with a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrictionRegime {
    /// At rest, held by static friction.
    Locked,
    /// Sliding in the positive coordinate direction.
    SlidingPositive,
    /// Sliding in the negative coordinate direction.
    SlidingNegative,
}

impl FrictionRegime {
    /// Sliding regime for the sign of `value` (Locked for zero).
    #[must_use]
    pub fn sliding_toward(value: f64) -> Self {
        if value > 0.0 {
            Self::SlidingPositive
        } else if value < 0.0 {
            Self::SlidingNegative
        } else {
            Self::Locked
        }
    }

    /// Initial regime for a body launched with `velocity`.
    #[must_use]
    pub fn from_velocity(velocity: f64, velocity_epsilon: f64) -> Self {
        if velocity.abs() < velocity_epsilon {
            Self::Locked
        } else {
            Self::sliding_toward(velocity)
        }
    }

    /// True for either sliding direction.
    #[must_use]
    pub const fn is_sliding(self) -> bool {
        matches!(self, Self::SlidingPositive | Self::SlidingNegative)
    }

    /// +1, -1, or 0 when locked.
    #[must_use]
    pub const fn direction(self) -> f64 {
        match self {
            Self::Locked => 0.0,
            Self::SlidingPositive => 1.0,
            Self::SlidingNegative => -1.0,
        }
    }
}

/// Outcome of one contact step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactStep {
    /// Regime after the step.
    pub regime: FrictionRegime,
    /// Acceleration applied during the step.
    pub acceleration: f64,
    /// Velocity after the step.
    pub velocity: f64,
}

/// Coulomb friction between a body and its surface along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoulombContact {
    /// Kinetic friction magnitude μk·N (N).
    kinetic: f64,
    /// Maximum static friction μs·N (N).
    static_limit: f64,
    /// Speed below which the body counts as at rest (m/s).
    velocity_epsilon: f64,
}

impl CoulombContact {
    /// Create a contact from the kinetic coefficient and the normal force.
    ///
    /// The static coefficient is `kinetic_coefficient * static_ratio`.
    #[must_use]
    pub fn new(kinetic_coefficient: f64, static_ratio: f64, normal_force: f64, velocity_epsilon: f64) -> Self {
        Self {
            kinetic: kinetic_coefficient * normal_force,
            static_limit: kinetic_coefficient * static_ratio * normal_force,
            velocity_epsilon,
        }
    }

    /// Kinetic friction magnitude (N).
    #[must_use]
    pub const fn kinetic_friction(&self) -> f64 {
        self.kinetic
    }

    /// Maximum static friction (N).
    #[must_use]
    pub const fn static_limit(&self) -> f64 {
        self.static_limit
    }

    /// True when static friction can hold against `driving_force`.
    #[must_use]
    pub fn holds(&self, driving_force: f64) -> bool {
        driving_force.abs() <= self.static_limit + FORCE_EPSILON
    }

    fn at_rest(&self, regime: FrictionRegime, velocity: f64) -> bool {
        regime == FrictionRegime::Locked || velocity.abs() < self.velocity_epsilon
    }

    /// Force balance without integrating: the regime and acceleration the
    /// body is subject to right now.
    ///
    /// `driving_force` is every non-friction force along the axis and
    /// `inertia` the mass that force accelerates.
    #[must_use]
    pub fn balance(&self, regime: FrictionRegime, velocity: f64, driving_force: f64, inertia: f64) -> (FrictionRegime, f64) {
        if self.at_rest(regime, velocity) {
            if self.holds(driving_force) {
                return (FrictionRegime::Locked, 0.0);
            }
            let direction = driving_force.signum();
            let acceleration = (driving_force - direction * self.kinetic) / inertia;
            return (FrictionRegime::sliding_toward(direction), acceleration);
        }

        let direction = velocity.signum();
        let acceleration = (driving_force - direction * self.kinetic) / inertia;
        (FrictionRegime::sliding_toward(direction), acceleration)
    }

    /// Advance the velocity by one tick.
    #[must_use]
    pub fn step(&self, regime: FrictionRegime, velocity: f64, driving_force: f64, inertia: f64, dt: f64) -> ContactStep {
        let start = if self.at_rest(regime, velocity) { 0.0 } else { velocity };
        let (next_regime, acceleration) = self.balance(regime, velocity, driving_force, inertia);

        if next_regime == FrictionRegime::Locked {
            return ContactStep {
                regime: FrictionRegime::Locked,
                acceleration: 0.0,
                velocity: 0.0,
            };
        }

        let velocity = start + acceleration * dt;
        if velocity * next_regime.direction() <= 0.0 {
            // Kinetic friction can stop the body but never reverse it.
            let regime = if self.holds(driving_force) {
                FrictionRegime::Locked
            } else {
                FrictionRegime::sliding_toward(driving_force)
            };
            return ContactStep {
                regime,
                acceleration: -start / dt,
                velocity: 0.0,
            };
        }

        ContactStep {
            regime: next_regime,
            acceleration,
            velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.02;

    #[test]
    fn test_semi_implicit_euler_uses_new_velocity() {
        let (x, v) = semi_implicit_euler(0.0, 1.0, 2.0, 0.5);
        assert!((v - 2.0).abs() < f64::EPSILON);
        assert!((x - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_semi_implicit_euler_2d() {
        let (p, v) = semi_implicit_euler_2d(Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(0.0, -10.0), 0.1);
        assert!((v.y + 1.0).abs() < 1e-12);
        assert!((p.x - 0.1).abs() < 1e-12);
        assert!((p.y + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_regime_helpers() {
        assert_eq!(FrictionRegime::from_velocity(0.0005, 1e-3), FrictionRegime::Locked);
        assert_eq!(FrictionRegime::from_velocity(-2.0, 1e-3), FrictionRegime::SlidingNegative);
        assert!(FrictionRegime::SlidingPositive.is_sliding());
        assert!(!FrictionRegime::Locked.is_sliding());
        assert!((FrictionRegime::SlidingNegative.direction() + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_static_friction_holds() {
        // μk = 0.5, μs = 0.6, N = 10: holds up to 6 N
        let contact = CoulombContact::new(0.5, 1.2, 10.0, 1e-3);
        let step = contact.step(FrictionRegime::Locked, 0.0, 5.9, 1.0, DT);
        assert_eq!(step.regime, FrictionRegime::Locked);
        assert!(step.velocity.abs() < f64::EPSILON);
        assert!(step.acceleration.abs() < f64::EPSILON);
    }

    #[test]
    fn test_breakaway_uses_kinetic_friction() {
        let contact = CoulombContact::new(0.5, 1.2, 10.0, 1e-3);
        let step = contact.step(FrictionRegime::Locked, 0.0, 8.0, 2.0, DT);
        assert_eq!(step.regime, FrictionRegime::SlidingPositive);
        // (8 - 5) / 2
        assert!((step.acceleration - 1.5).abs() < 1e-12);
        assert!((step.velocity - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_breakaway_negative_direction() {
        let contact = CoulombContact::new(0.5, 1.2, 10.0, 1e-3);
        let step = contact.step(FrictionRegime::Locked, 0.0, -8.0, 2.0, DT);
        assert_eq!(step.regime, FrictionRegime::SlidingNegative);
        assert!((step.acceleration + 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_sliding_friction_opposes_velocity() {
        let contact = CoulombContact::new(0.2, 1.2, 10.0, 1e-3);
        let step = contact.step(FrictionRegime::SlidingNegative, -3.0, 0.0, 1.0, DT);
        assert_eq!(step.regime, FrictionRegime::SlidingNegative);
        assert!((step.acceleration - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_stops_without_reversing_and_locks() {
        let contact = CoulombContact::new(0.5, 1.2, 10.0, 1e-3);
        // Deceleration of 5 m/s² would take 0.01 m/s to -0.09 m/s in one tick
        let step = contact.step(FrictionRegime::SlidingPositive, 0.01, 0.0, 1.0, DT);
        assert_eq!(step.regime, FrictionRegime::Locked);
        assert!(step.velocity.abs() < f64::EPSILON);
        assert!((step.acceleration + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_stops_then_slides_back_when_static_fails() {
        // Moving up against a driving force larger than static friction
        let contact = CoulombContact::new(0.1, 1.2, 10.0, 1e-3);
        let step = contact.step(FrictionRegime::SlidingNegative, -0.01, 5.0, 1.0, DT);
        assert!(step.velocity.abs() < f64::EPSILON);
        assert_eq!(step.regime, FrictionRegime::SlidingPositive);

        let next = contact.step(step.regime, step.velocity, 5.0, 1.0, DT);
        assert_eq!(next.regime, FrictionRegime::SlidingPositive);
        assert!((next.acceleration - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_frictionless_balance_within_epsilon_locks() {
        let contact = CoulombContact::new(0.0, 1.2, 10.0, 1e-3);
        assert!(contact.holds(1e-12));
        assert!(!contact.holds(1e-6));
    }
}
