//! Scenario parameters: the flat name → number mapping every model reads.
//!
//! Parameters arrive from a preset catalog or as deltas from a UI control
//! panel. Missing keys are never an error; each model falls back to a
//! documented default. Malformed values (non-numeric text, NaN, infinities)
//! are rejected at the boundary with [`SimError::InvalidParameter`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Canonical parameter names (camelCase, as emitted by the control panel).
///
/// Angles are in degrees; everything else is SI.
pub mod keys {
    /// Object type tag (the only non-numeric entry).
    pub const OBJECT_TYPE: &str = "objectType";
    /// Initial speed (m/s).
    pub const VELOCITY: &str = "velocity";
    /// Launch angle above +x (deg).
    pub const ANGLE: &str = "angle";
    /// Launch height (m).
    pub const HEIGHT: &str = "height";
    /// Projectile floor (m).
    pub const FLOOR: &str = "floor";
    /// Uniform acceleration along the launch line (m/s²).
    pub const ACCELERATION: &str = "acceleration";
    /// Primary mass (kg).
    pub const MASS: &str = "mass";
    /// Second body's mass (kg).
    pub const MASS2: &str = "mass2";
    /// Gravitational acceleration (m/s²).
    pub const GRAVITY: &str = "gravity";
    /// Kinetic friction coefficient (between blocks for stacked blocks).
    pub const FRICTION: &str = "friction";
    /// Friction coefficient between the bottom block and the ground.
    pub const GROUND_FRICTION: &str = "groundFriction";
    /// Applied force (N).
    pub const FORCE: &str = "force";
    /// Pendulum string length (m).
    pub const LENGTH: &str = "length";
    /// Pendulum release angle from vertical (deg).
    pub const INITIAL_ANGLE: &str = "initialAngle";
    /// Pendulum initial angular velocity (rad/s).
    pub const ANGULAR_VELOCITY: &str = "angularVelocity";
    /// Pendulum viscous damping (kg/s).
    pub const DAMPING: &str = "damping";
    /// Conical pendulum half-angle (deg).
    pub const CONE_ANGLE: &str = "coneAngle";
    /// Incline angle (deg).
    pub const INCLINE_ANGLE: &str = "inclineAngle";
    /// Incline length (m).
    pub const INCLINE_LENGTH: &str = "inclineLength";
    /// Initial direction on an incline: +1 down-slope, -1 up-slope.
    pub const DIRECTION: &str = "direction";
}

/// Standard gravity used when `gravity` is absent (m/s²).
pub const DEFAULT_GRAVITY: f64 = 9.8;

/// Mass used when `mass` is absent (kg).
pub const DEFAULT_MASS: f64 = 1.0;

/// Friction coefficient used when none is given.
pub const DEFAULT_FRICTION: f64 = 0.0;

/// Object type tag selecting the pendulum family.
pub const PENDULUM_TAG: &str = "pendulum";

/// Flat mapping from parameter name to a finite number, plus an optional
/// object type tag.
///
/// Insertion order is preserved so serialized scenarios read back in the
/// order they were written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<String, serde_json::Value>",
    into = "IndexMap<String, serde_json::Value>"
)]
pub struct ScenarioParameters {
    object_type: Option<String>,
    values: IndexMap<String, f64>,
}

impl ScenarioParameters {
    /// Empty parameter set (every model default applies).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for the first non-finite value.
    pub fn from_pairs<I, K>(pairs: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut params = Self::new();
        for (name, value) in pairs {
            params.insert(name, value)?;
        }
        Ok(params)
    }

    /// Build from raw text pairs, as a control panel emits them.
    ///
    /// `objectType` is taken verbatim; every other value must parse as a
    /// finite number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first malformed entry.
    pub fn from_text_pairs<I, K, V>(pairs: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::new();
        for (name, text) in pairs {
            let name = name.as_ref();
            let text = text.as_ref().trim();
            if name == keys::OBJECT_TYPE {
                params.object_type = Some(text.to_string());
                continue;
            }
            let value: f64 = text.parse().map_err(|_| {
                SimError::invalid_parameter(name, format!("expected a number, got {text:?}"))
            })?;
            params.insert(name, value)?;
        }
        Ok(params)
    }

    /// Set a numeric parameter, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `value` is NaN or infinite.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> SimResult<()> {
        let name = name.into();
        if name == keys::OBJECT_TYPE {
            return Err(SimError::invalid_parameter(
                name,
                "the object type is a tag, not a number",
            ));
        }
        if !value.is_finite() {
            return Err(SimError::invalid_parameter(
                name,
                format!("expected a finite number, got {value}"),
            ));
        }
        self.values.insert(name, value);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `value` is NaN or infinite.
    pub fn try_with(mut self, name: impl Into<String>, value: f64) -> SimResult<Self> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Set the object type tag.
    #[must_use]
    pub fn with_object_type(mut self, tag: impl Into<String>) -> Self {
        self.object_type = Some(tag.into());
        self
    }

    /// Apply a control-panel delta, returning a fresh parameter set.
    ///
    /// Keys in `delta` override keys in `self`; `self` is untouched.
    #[must_use]
    pub fn merged(&self, delta: &Self) -> Self {
        let mut merged = self.clone();
        if delta.object_type.is_some() {
            merged.object_type.clone_from(&delta.object_type);
        }
        for (name, value) in &delta.values {
            merged.values.insert(name.clone(), *value);
        }
        merged
    }

    /// Value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Value of `name`, or `default`.
    #[must_use]
    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }

    /// Angle parameter in radians; the stored value and default are degrees.
    #[must_use]
    pub fn angle_or(&self, name: &str, default_degrees: f64) -> f64 {
        self.get_or(name, default_degrees).to_radians()
    }

    /// True if `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Gravitational acceleration (default 9.8 m/s²).
    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.get_or(keys::GRAVITY, DEFAULT_GRAVITY)
    }

    /// Primary mass (default 1 kg).
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.get_or(keys::MASS, DEFAULT_MASS)
    }

    /// Kinetic friction coefficient (default 0).
    #[must_use]
    pub fn friction(&self) -> f64 {
        self.get_or(keys::FRICTION, DEFAULT_FRICTION)
    }

    /// Object type tag, if any.
    #[must_use]
    pub fn object_type(&self) -> Option<&str> {
        self.object_type.as_deref()
    }

    /// True if the object type tag names a pendulum (case-insensitive).
    #[must_use]
    pub fn is_pendulum(&self) -> bool {
        self.object_type()
            .is_some_and(|tag| tag.trim().eq_ignore_ascii_case(PENDULUM_TAG))
    }

    /// Number of numeric parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no numeric parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over numeric parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl TryFrom<IndexMap<String, serde_json::Value>> for ScenarioParameters {
    type Error = SimError;

    fn try_from(raw: IndexMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut params = Self::new();
        for (name, value) in raw {
            if name == keys::OBJECT_TYPE {
                match value {
                    serde_json::Value::String(tag) => params.object_type = Some(tag),
                    other => {
                        return Err(SimError::invalid_parameter(
                            name,
                            format!("expected a string tag, got {other}"),
                        ))
                    }
                }
                continue;
            }
            let Some(number) = value.as_f64() else {
                return Err(SimError::invalid_parameter(
                    name,
                    format!("expected a number, got {value}"),
                ));
            };
            params.insert(name, number)?;
        }
        Ok(params)
    }
}

impl From<ScenarioParameters> for IndexMap<String, serde_json::Value> {
    fn from(params: ScenarioParameters) -> Self {
        let mut raw = Self::with_capacity(params.values.len() + 1);
        if let Some(tag) = params.object_type {
            raw.insert(keys::OBJECT_TYPE.to_string(), serde_json::Value::String(tag));
        }
        for (name, value) in params.values {
            raw.insert(name, serde_json::Value::from(value));
        }
        raw
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let params = ScenarioParameters::new();
        assert!((params.gravity() - 9.8).abs() < f64::EPSILON);
        assert!((params.mass() - 1.0).abs() < f64::EPSILON);
        assert!(params.friction().abs() < f64::EPSILON);
        assert!(params.is_empty());
        assert!(params.object_type().is_none());
    }

    #[test]
    fn test_from_pairs_and_lookup() {
        let params = ScenarioParameters::from_pairs([("velocity", 12.0), ("angle", 90.0)]).unwrap();
        assert_eq!(params.len(), 2);
        assert!(params.contains(keys::VELOCITY));
        assert!((params.get_or(keys::VELOCITY, 0.0) - 12.0).abs() < f64::EPSILON);
        assert!((params.angle_or(keys::ANGLE, 0.0) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((params.angle_or(keys::CONE_ANGLE, 180.0) - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_nan_rejected() {
        let err = ScenarioParameters::from_pairs([("mass", f64::NAN)]).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter { ref name, .. } if name == "mass"));
    }

    #[test]
    fn test_infinity_rejected() {
        let err = ScenarioParameters::new()
            .try_with("force", f64::INFINITY)
            .unwrap_err();
        assert!(err.to_string().contains("force"));
    }

    #[test]
    fn test_object_type_not_numeric() {
        let mut params = ScenarioParameters::new();
        assert!(params.insert(keys::OBJECT_TYPE, 1.0).is_err());
    }

    #[test]
    fn test_from_text_pairs() {
        let params = ScenarioParameters::from_text_pairs([
            ("objectType", "Pendulum"),
            ("length", " 2.5 "),
            ("initialAngle", "30"),
        ])
        .unwrap();
        assert!(params.is_pendulum());
        assert!((params.get_or(keys::LENGTH, 0.0) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_text_pairs_rejects_non_numeric() {
        let err = ScenarioParameters::from_text_pairs([("velocity", "fast")]).unwrap_err();
        match err {
            SimError::InvalidParameter { name, reason } => {
                assert_eq!(name, "velocity");
                assert!(reason.contains("fast"));
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_from_text_pairs_rejects_nan_text() {
        assert!(ScenarioParameters::from_text_pairs([("angle", "NaN")]).is_err());
    }

    #[test]
    fn test_merged_leaves_original_untouched() {
        let base = ScenarioParameters::from_pairs([("velocity", 10.0), ("angle", 45.0)]).unwrap();
        let delta = ScenarioParameters::from_pairs([("angle", 60.0)]).unwrap();

        let merged = base.merged(&delta);
        assert!((merged.get_or(keys::ANGLE, 0.0) - 60.0).abs() < f64::EPSILON);
        assert!((merged.get_or(keys::VELOCITY, 0.0) - 10.0).abs() < f64::EPSILON);
        assert!((base.get_or(keys::ANGLE, 0.0) - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_yaml() {
        let yaml = "objectType: pendulum\nlength: 1\ninitialAngle: 30.5\n";
        let params: ScenarioParameters = serde_yaml::from_str(yaml).unwrap();
        assert!(params.is_pendulum());
        assert!((params.get_or(keys::LENGTH, 0.0) - 1.0).abs() < f64::EPSILON);
        assert!((params.get_or(keys::INITIAL_ANGLE, 0.0) - 30.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_rejects_text_value() {
        let result: Result<ScenarioParameters, _> =
            serde_json::from_str(r#"{"velocity": "ten"}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("velocity"));
    }

    #[test]
    fn test_deserialize_rejects_non_string_tag() {
        let result: Result<ScenarioParameters, _> = serde_json::from_str(r#"{"objectType": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_roundtrip_preserves_order() {
        let params = ScenarioParameters::from_pairs([("mass2", 3.0), ("force", 14.0), ("mass", 2.0)])
            .unwrap()
            .with_object_type("block");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(
            json,
            r#"{"objectType":"block","mass2":3.0,"force":14.0,"mass":2.0}"#
        );
        let restored: ScenarioParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, restored);
    }
}
