//! Motion samples and the trajectories built from them.
//!
//! A [`Trajectory`] is append-only: the generator pushes one
//! [`MotionSample`] per tick and hands the finished sequence to the caller,
//! who replaces any previous trajectory wholesale.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::engine::state::Vec2;
use crate::error::{SimError, SimResult};
use crate::scenarios::MotionModelKind;

/// Kinematics of one body at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyKinematics {
    /// Horizontal position (m).
    pub position_x: f64,
    /// Vertical (or lateral) position (m).
    pub position_y: f64,
    /// Horizontal velocity (m/s).
    pub velocity_x: f64,
    /// Vertical (or lateral) velocity (m/s).
    pub velocity_y: f64,
    /// Horizontal acceleration (m/s²).
    pub acceleration_x: f64,
    /// Vertical (or lateral) acceleration (m/s²).
    pub acceleration_y: f64,
}

impl BodyKinematics {
    /// Build from position, velocity and acceleration vectors.
    #[must_use]
    pub const fn new(position: Vec2, velocity: Vec2, acceleration: Vec2) -> Self {
        Self {
            position_x: position.x,
            position_y: position.y,
            velocity_x: velocity.x,
            velocity_y: velocity.y,
            acceleration_x: acceleration.x,
            acceleration_y: acceleration.y,
        }
    }

    /// Position vector.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.position_x, self.position_y)
    }

    /// Velocity vector.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        Vec2::new(self.velocity_x, self.velocity_y)
    }

    /// Acceleration vector.
    #[must_use]
    pub const fn acceleration(&self) -> Vec2 {
        Vec2::new(self.acceleration_x, self.acceleration_y)
    }

    fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("positionX", self.position_x),
            ("positionY", self.position_y),
            ("velocityX", self.velocity_x),
            ("velocityY", self.velocity_y),
            ("accelerationX", self.acceleration_x),
            ("accelerationY", self.acceleration_y),
        ]
    }
}

/// State of the system at one tick, as consumed by renderers and graphs.
///
/// `total_energy` is always `kinetic_energy + potential_energy`; the only
/// constructor computes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionSample {
    /// Simulated time (s).
    pub time: f64,
    /// Horizontal position of the primary body (m).
    pub position_x: f64,
    /// Vertical (or lateral) position of the primary body (m).
    pub position_y: f64,
    /// Horizontal velocity of the primary body (m/s).
    pub velocity_x: f64,
    /// Vertical (or lateral) velocity of the primary body (m/s).
    pub velocity_y: f64,
    /// Horizontal acceleration of the primary body (m/s²).
    pub acceleration_x: f64,
    /// Vertical (or lateral) acceleration of the primary body (m/s²).
    pub acceleration_y: f64,
    /// Kinetic energy of the whole system (J).
    pub kinetic_energy: f64,
    /// Potential energy of the whole system above its baseline (J).
    pub potential_energy: f64,
    /// Kinetic plus potential energy (J).
    pub total_energy: f64,
    /// Second body of the two-body models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion: Option<BodyKinematics>,
}

impl MotionSample {
    /// Create a sample for the primary body.
    #[must_use]
    pub fn new(time: f64, body: BodyKinematics, kinetic_energy: f64, potential_energy: f64) -> Self {
        Self {
            time,
            position_x: body.position_x,
            position_y: body.position_y,
            velocity_x: body.velocity_x,
            velocity_y: body.velocity_y,
            acceleration_x: body.acceleration_x,
            acceleration_y: body.acceleration_y,
            kinetic_energy,
            potential_energy,
            total_energy: kinetic_energy + potential_energy,
            companion: None,
        }
    }

    /// Attach the second body's kinematics.
    #[must_use]
    pub const fn with_companion(mut self, companion: BodyKinematics) -> Self {
        self.companion = Some(companion);
        self
    }

    /// Kinematics of the primary body.
    #[must_use]
    pub const fn primary(&self) -> BodyKinematics {
        BodyKinematics {
            position_x: self.position_x,
            position_y: self.position_y,
            velocity_x: self.velocity_x,
            velocity_y: self.velocity_y,
            acceleration_x: self.acceleration_x,
            acceleration_y: self.acceleration_y,
        }
    }

    /// Speed of the primary body (m/s).
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.primary().velocity().magnitude()
    }

    /// All numeric fields with their serialized names, companion included.
    #[must_use]
    pub fn fields(&self) -> Vec<(String, f64)> {
        let mut fields: Vec<(String, f64)> = vec![("time".to_string(), self.time)];
        fields.extend(
            self.primary()
                .fields()
                .iter()
                .map(|(name, value)| ((*name).to_string(), *value)),
        );
        fields.push(("kineticEnergy".to_string(), self.kinetic_energy));
        fields.push(("potentialEnergy".to_string(), self.potential_energy));
        fields.push(("totalEnergy".to_string(), self.total_energy));
        if let Some(companion) = &self.companion {
            fields.extend(
                companion
                    .fields()
                    .iter()
                    .map(|(name, value)| (format!("companion.{name}"), *value)),
            );
        }
        fields
    }
}

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// The maximum simulated duration was reached.
    DurationCap,
    /// A projectile crossed below its floor.
    Floor,
    /// A body ran off the end of its surface or rope.
    LeftSurface,
    /// A sliding body was caught by static friction.
    CameToRest,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::DurationCap => "duration cap reached",
            Self::Floor => "crossed below floor",
            Self::LeftSurface => "left the surface",
            Self::CameToRest => "came to rest",
        };
        f.write_str(text)
    }
}

/// Ordered, fixed-step sequence of motion samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trajectory {
    kind: MotionModelKind,
    dt: f64,
    termination: Termination,
    samples: Vec<MotionSample>,
}

impl Trajectory {
    /// Create an empty trajectory.
    #[must_use]
    pub fn with_capacity(kind: MotionModelKind, dt: f64, capacity: usize) -> Self {
        Self {
            kind,
            dt,
            termination: Termination::DurationCap,
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Append a sample.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` if the sample's time does not come
    /// strictly after the previous one.
    pub fn push(&mut self, sample: MotionSample) -> SimResult<()> {
        if let Some(last) = self.samples.last() {
            if sample.time <= last.time {
                return Err(SimError::ConstraintViolation {
                    name: "time_monotonic".to_string(),
                    violation: sample.time - last.time,
                    tolerance: 0.0,
                });
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    pub(crate) fn set_termination(&mut self, termination: Termination) {
        self.termination = termination;
    }

    /// Motion model that produced this trajectory.
    #[must_use]
    pub const fn kind(&self) -> MotionModelKind {
        self.kind
    }

    /// Fixed step between samples (s).
    #[must_use]
    pub const fn dt(&self) -> f64 {
        self.dt
    }

    /// Why generation stopped.
    #[must_use]
    pub const fn termination(&self) -> Termination {
        self.termination
    }

    /// All samples in time order.
    #[must_use]
    pub fn samples(&self) -> &[MotionSample] {
        &self.samples
    }

    /// Consume into the sample vector.
    #[must_use]
    pub fn into_samples(self) -> Vec<MotionSample> {
        self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no sample has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First sample.
    #[must_use]
    pub fn first(&self) -> Option<&MotionSample> {
        self.samples.first()
    }

    /// Last sample.
    #[must_use]
    pub fn last(&self) -> Option<&MotionSample> {
        self.samples.last()
    }

    /// Iterate over samples.
    pub fn iter(&self) -> std::slice::Iter<'_, MotionSample> {
        self.samples.iter()
    }

    /// Time of the last sample (s).
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.last().map_or(0.0, |s| s.time)
    }

    /// Largest relative deviation of total energy from the first sample.
    ///
    /// Zero when the initial energy is (numerically) zero.
    #[must_use]
    pub fn max_energy_drift(&self) -> f64 {
        let Some(initial) = self.first().map(|s| s.total_energy) else {
            return 0.0;
        };
        if initial.abs() < f64::EPSILON {
            return 0.0;
        }
        self.samples
            .iter()
            .map(|s| (s.total_energy - initial).abs() / initial.abs())
            .fold(0.0, f64::max)
    }

    /// Render as CSV with the serialized field names as header.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        let two_body = self.samples.iter().any(|s| s.companion.is_some());

        let Some(first) = self.first() else {
            return out;
        };
        let mut header: Vec<String> = first
            .fields()
            .into_iter()
            .map(|(name, _)| name)
            .filter(|name| !name.starts_with("companion."))
            .collect();
        if two_body {
            header.extend(
                BodyKinematics::default()
                    .fields()
                    .iter()
                    .map(|(name, _)| format!("companion.{name}")),
            );
        }
        out.push_str(&header.join(","));
        out.push('\n');

        for sample in &self.samples {
            let mut values: Vec<f64> = sample
                .fields()
                .into_iter()
                .filter(|(name, _)| !name.starts_with("companion."))
                .map(|(_, value)| value)
                .collect();
            if two_body {
                let companion = sample.companion.unwrap_or_default();
                values.extend(companion.fields().iter().map(|(_, value)| *value));
            }
            let line: Vec<String> = values.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "{}", line.join(","));
        }
        out
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a MotionSample;
    type IntoIter = std::slice::Iter<'a, MotionSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
