//! Scenario files: an optional engine section plus the parameter map.
//!
//! ```yaml
//! engine:
//!   timestep:
//!     dt: 0.01
//! parameters:
//!   inclineAngle: 30
//!   friction: 0.2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::EngineConfig;
use crate::error::SimResult;
use crate::scenarios::ScenarioParameters;

/// Contents of a scenario file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    /// Engine configuration (defaults when absent).
    #[serde(default)]
    pub engine: EngineConfig,
    /// Scenario parameters (an empty map selects the default projectile).
    #[serde(default)]
    pub parameters: ScenarioParameters,
}

impl ScenarioFile {
    /// Load a scenario from a YAML (or JSON) file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsing fails, a parameter
    /// is malformed, or the engine section fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a scenario from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let file: Self = serde_yaml::from_str(yaml)?;
        file.engine.check()?;
        Ok(file)
    }
}
