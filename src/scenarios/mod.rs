//! Motion models and the classifier that picks one.
//!
//! Provides the seven canonical motion systems:
//! - Projectile / free flight (vertical throw, free fall, 1-D uniform acceleration)
//! - Simple pendulum (exact nonlinear equation)
//! - Conical pendulum (closed form)
//! - Block on an incline with Coulomb friction
//! - Block on a horizontal surface pushed by a constant force
//! - Incline with a pulley and a hanging mass (two bodies)
//! - Stacked blocks with slip between them (two bodies)

pub mod conical;
pub mod horizontal;
pub mod incline;
pub mod params;
pub mod pendulum;
pub mod projectile;
pub mod pulley;
pub mod stacked;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FrictionConfig;

pub use conical::{ConicalPendulumConfig, ConicalPendulumModel};
pub use horizontal::{HorizontalFrictionConfig, HorizontalFrictionModel};
pub use incline::{InclineConfig, InclineModel, SlopeDirection};
pub use params::{keys, ScenarioParameters};
pub use pendulum::{PendulumConfig, PendulumModel};
pub use projectile::{ProjectileConfig, ProjectileMode, ProjectileModel};
pub use pulley::{InclinePulleyConfig, InclinePulleyModel};
pub use stacked::{BlockContact, StackedBlockConfig, StackedBlockModel};

/// Closed set of motion models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionModelKind {
    /// Free flight under gravity (or uniform acceleration along a line).
    Projectile,
    /// Planar pendulum.
    Pendulum,
    /// Pendulum bob on a steady horizontal circle.
    ConicalPendulum,
    /// Block on an incline with friction.
    InclineFriction,
    /// Block on a horizontal surface with an applied force.
    HorizontalFriction,
    /// Incline block tied over a pulley to a hanging mass.
    InclinePulley,
    /// Two stacked blocks, force on the bottom one.
    StackedBlock,
}

impl MotionModelKind {
    /// Every kind, in classification order.
    pub const ALL: [Self; 7] = [
        Self::ConicalPendulum,
        Self::Pendulum,
        Self::InclinePulley,
        Self::InclineFriction,
        Self::StackedBlock,
        Self::HorizontalFriction,
        Self::Projectile,
    ];

    /// Pick the model for a parameter set, most specific first.
    ///
    /// Never fails: anything unrecognised is a projectile with defaults.
    #[must_use]
    pub fn classify(params: &ScenarioParameters) -> Self {
        let kind = if params.is_pendulum() {
            if params.contains(keys::CONE_ANGLE) && params.contains(keys::LENGTH) {
                Self::ConicalPendulum
            } else {
                Self::Pendulum
            }
        } else if params.contains(keys::INCLINE_ANGLE) {
            if params.contains(keys::MASS2) {
                Self::InclinePulley
            } else {
                Self::InclineFriction
            }
        } else if params.contains(keys::MASS2) && params.contains(keys::FORCE) {
            Self::StackedBlock
        } else if params.contains(keys::FORCE) {
            Self::HorizontalFriction
        } else {
            Self::Projectile
        };
        debug!(%kind, parameters = params.len(), "scenario classified");
        kind
    }

    /// Stable identifier (matches the serialized form).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Projectile => "projectile",
            Self::Pendulum => "pendulum",
            Self::ConicalPendulum => "conical-pendulum",
            Self::InclineFriction => "incline-friction",
            Self::HorizontalFriction => "horizontal-friction",
            Self::InclinePulley => "incline-pulley",
            Self::StackedBlock => "stacked-block",
        }
    }

    /// True for the models with a second body.
    #[must_use]
    pub const fn is_two_body(self) -> bool {
        matches!(self, Self::InclinePulley | Self::StackedBlock)
    }
}

impl std::fmt::Display for MotionModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully parameterised motion model, ready to run.
#[derive(Debug, Clone, PartialEq)]
pub enum Scenario {
    /// See [`ProjectileModel`].
    Projectile(ProjectileModel),
    /// See [`PendulumModel`].
    Pendulum(PendulumModel),
    /// See [`ConicalPendulumModel`].
    ConicalPendulum(ConicalPendulumModel),
    /// See [`InclineModel`].
    InclineFriction(InclineModel),
    /// See [`HorizontalFrictionModel`].
    HorizontalFriction(HorizontalFrictionModel),
    /// See [`InclinePulleyModel`].
    InclinePulley(InclinePulleyModel),
    /// See [`StackedBlockModel`].
    StackedBlock(StackedBlockModel),
}

impl Scenario {
    /// Classify `params` and build the matching model with defaults filled in.
    #[must_use]
    pub fn from_parameters(params: &ScenarioParameters, friction: &FrictionConfig) -> Self {
        match MotionModelKind::classify(params) {
            MotionModelKind::Projectile => {
                Self::Projectile(ProjectileModel::new(ProjectileConfig::from_parameters(params)))
            }
            MotionModelKind::Pendulum => {
                Self::Pendulum(PendulumModel::new(PendulumConfig::from_parameters(params)))
            }
            MotionModelKind::ConicalPendulum => Self::ConicalPendulum(ConicalPendulumModel::new(
                ConicalPendulumConfig::from_parameters(params),
            )),
            MotionModelKind::InclineFriction => Self::InclineFriction(InclineModel::new(
                InclineConfig::from_parameters(params, friction),
            )),
            MotionModelKind::HorizontalFriction => Self::HorizontalFriction(
                HorizontalFrictionModel::new(HorizontalFrictionConfig::from_parameters(params, friction)),
            ),
            MotionModelKind::InclinePulley => Self::InclinePulley(InclinePulleyModel::new(
                InclinePulleyConfig::from_parameters(params, friction),
            )),
            MotionModelKind::StackedBlock => Self::StackedBlock(StackedBlockModel::new(
                StackedBlockConfig::from_parameters(params),
            )),
        }
    }

    /// Tag of the contained model.
    #[must_use]
    pub const fn kind(&self) -> MotionModelKind {
        match self {
            Self::Projectile(_) => MotionModelKind::Projectile,
            Self::Pendulum(_) => MotionModelKind::Pendulum,
            Self::ConicalPendulum(_) => MotionModelKind::ConicalPendulum,
            Self::InclineFriction(_) => MotionModelKind::InclineFriction,
            Self::HorizontalFriction(_) => MotionModelKind::HorizontalFriction,
            Self::InclinePulley(_) => MotionModelKind::InclinePulley,
            Self::StackedBlock(_) => MotionModelKind::StackedBlock,
        }
    }
}
