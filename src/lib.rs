//! # mechsim
//!
//! Deterministic mechanics simulation for canonical textbook systems.
//!
//! Given a flat set of named scenario parameters, the engine picks one of
//! seven motion models and produces a fixed-step trajectory of kinematic
//! and energetic samples:
//! - free flight (projectile, vertical throw, free fall, uniform acceleration)
//! - simple and conical pendulums
//! - blocks on inclines and floors with Coulomb friction
//! - two-body systems: incline with pulley, stacked blocks
//!
//! Every generated sample passes through a Jidoka guard that stops on
//! non-finite values and physically impossible energies.
//!
//! ## Example
//!
//! ```rust
//! use mechsim::prelude::*;
//!
//! let params = ScenarioParameters::from_pairs([("inclineAngle", 15.0), ("friction", 0.3)])?;
//! let trajectory = generate_trajectory(&params)?;
//!
//! assert_eq!(trajectory.kind(), MotionModelKind::InclineFriction);
//! assert!(trajectory.iter().all(|s| s.speed() == 0.0));
//! # Ok::<(), mechsim::SimError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Formulas are written the way they read on paper
    clippy::imprecise_flops,
    clippy::float_cmp,         // Exact zero checks select regimes
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod config;
pub mod domains;
pub mod engine;
pub mod error;
pub mod scenarios;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{EngineConfig, EngineConfigBuilder};
    pub use crate::engine::jidoka::{JidokaGuard, JidokaViolation};
    pub use crate::engine::{
        generate_trajectory, MotionModel, MotionSample, Termination, Trajectory, TrajectoryGenerator,
    };
    pub use crate::error::{SimError, SimResult};
    pub use crate::scenarios::{MotionModelKind, Scenario, ScenarioParameters};
}

/// Re-export for public API
pub use engine::generate_trajectory;
pub use error::{SimError, SimResult};
