//! Core trajectory engine.
//!
//! Every motion model is a pure stepper `(State, dt) -> State`; the
//! generator owns the one driver loop that runs any of them:
//!
//! 1. sample the initial state at `t = 0`
//! 2. step, sample at `t = i·dt`, pass the sample through the Jidoka guard
//! 3. stop when the model's termination predicate fires or the duration cap
//!    is reached
//!
//! Generation is synchronous and side-effect free. A generator holds only
//! its immutable configuration, so one instance can be shared across
//! threads and each call returns a freshly allocated [`Trajectory`].

pub mod jidoka;
pub mod state;
pub mod trajectory;

use tracing::debug;

pub use jidoka::{JidokaConfig, JidokaGuard, JidokaViolation};
pub use state::Vec2;
pub use trajectory::{BodyKinematics, MotionSample, Termination, Trajectory};

use crate::config::EngineConfig;
use crate::error::SimResult;
use crate::scenarios::{MotionModelKind, Scenario, ScenarioParameters};

/// Samples reserved up front; longer runs grow the buffer as they go.
const PREALLOCATED_SAMPLES: usize = 4096;

/// A motion system that can be advanced in fixed steps.
pub trait MotionModel {
    /// Everything the model needs to carry from one tick to the next.
    type State: Clone + std::fmt::Debug;

    /// Which model this is.
    fn kind(&self) -> MotionModelKind;

    /// State at `t = 0`.
    fn initial_state(&self) -> Self::State;

    /// Advance one tick.
    fn step(&self, state: &Self::State, dt: f64) -> Self::State;

    /// Observable sample of `state` at `time`.
    fn sample(&self, state: &Self::State, time: f64) -> MotionSample;

    /// Model-specific stop condition, checked after every step.
    fn termination(&self, previous: &Self::State, current: &Self::State) -> Option<Termination>;

    /// True if total energy should stay constant (enables drift monitoring).
    fn conserves_energy(&self) -> bool {
        false
    }
}

/// Generate a trajectory with the default engine configuration.
///
/// Classifies the parameters, builds the matching model, and runs it at
/// `dt = 0.02 s` for at most 10 s.
///
/// # Errors
///
/// Returns a Jidoka violation if a sample comes out non-finite or with
/// negative kinetic energy (e.g. from a zero or negative mass).
///
/// # Example
///
/// ```rust
/// use mechsim::prelude::*;
///
/// let params = ScenarioParameters::from_pairs([("velocity", 10.0), ("angle", 90.0)])?;
/// let trajectory = generate_trajectory(&params)?;
///
/// assert_eq!(trajectory.kind(), MotionModelKind::Projectile);
/// assert!((trajectory.duration() - 2.04).abs() < 0.021);
/// # Ok::<(), mechsim::SimError>(())
/// ```
pub fn generate_trajectory(params: &ScenarioParameters) -> SimResult<Trajectory> {
    TrajectoryGenerator::default().generate(params)
}

/// Drives motion models with a fixed engine configuration.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryGenerator {
    config: EngineConfig,
}

impl TrajectoryGenerator {
    /// Create a generator.
    ///
    /// # Errors
    ///
    /// Returns error if configuration validation fails.
    pub fn new(config: EngineConfig) -> SimResult<Self> {
        config.check()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify `params`, build the model and run it.
    ///
    /// # Errors
    ///
    /// Returns a Jidoka violation if any sample fails inspection.
    pub fn generate(&self, params: &ScenarioParameters) -> SimResult<Trajectory> {
        let scenario = Scenario::from_parameters(params, &self.config.friction);
        self.run_scenario(&scenario)
    }

    /// Run an already-built scenario.
    ///
    /// # Errors
    ///
    /// Returns a Jidoka violation if any sample fails inspection.
    pub fn run_scenario(&self, scenario: &Scenario) -> SimResult<Trajectory> {
        match scenario {
            Scenario::Projectile(model) => self.run_model(model),
            Scenario::Pendulum(model) => self.run_model(model),
            Scenario::ConicalPendulum(model) => self.run_model(model),
            Scenario::InclineFriction(model) => self.run_model(model),
            Scenario::HorizontalFriction(model) => self.run_model(model),
            Scenario::InclinePulley(model) => self.run_model(model),
            Scenario::StackedBlock(model) => self.run_model(model),
        }
    }

    /// Run any motion model through the fixed-step driver loop.
    ///
    /// # Errors
    ///
    /// Returns a Jidoka violation if any sample fails inspection.
    pub fn run_model<M: MotionModel>(&self, model: &M) -> SimResult<Trajectory> {
        let dt = self.config.dt();
        let max_steps = self.config.max_steps();

        let mut guard = JidokaGuard::from_config(&self.config).monitor_energy(model.conserves_energy());
        let mut trajectory = Trajectory::with_capacity(model.kind(), dt, (max_steps + 1).min(PREALLOCATED_SAMPLES));

        let mut state = model.initial_state();
        let initial = model.sample(&state, 0.0);
        guard.check(0, &initial)?;
        trajectory.push(initial)?;

        let mut termination = Termination::DurationCap;
        for step in 1..=max_steps {
            let next = model.step(&state, dt);
            // Times are computed, not accumulated, so every gap is exactly dt.
            let time = step as f64 * dt;
            let sample = model.sample(&next, time);
            guard.check(step, &sample)?;
            trajectory.push(sample)?;

            let stop = model.termination(&state, &next);
            state = next;
            if let Some(reason) = stop {
                termination = reason;
                break;
            }
        }
        trajectory.set_termination(termination);

        debug!(
            kind = %model.kind(),
            samples = trajectory.len(),
            duration = trajectory.duration(),
            %termination,
            max_energy_drift = guard.max_energy_drift(),
            "trajectory generated"
        );
        Ok(trajectory)
    }
}
