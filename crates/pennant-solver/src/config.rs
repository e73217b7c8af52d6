//! Simulator configuration.
//!
//! Every field has a default, so a TOML file only needs to mention what
//! it changes:
//!
//! ```toml
//! gravity = 1373.4
//! pins = "top_corners"
//!
//! [grid]
//! width = 20
//! height = 12
//!
//! [wind]
//! strength = 60.0
//! oscillate = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use pennant_mesh::GridConfig;
use pennant_types::constants::{DEFAULT_TIME_STEP, GRAVITY};
use pennant_types::{PennantError, PennantResult};

use crate::pins::PinLayout;
use crate::wind::WindConfig;

/// Configuration for a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Gravitational acceleration `g`; each particle feels `(0, -g·mass, 0)`.
    pub gravity: f32,

    /// Fixed timestep in seconds.
    pub time_step: f32,

    /// Which particles are held at their rest positions.
    pub pins: PinLayout,

    pub grid: GridConfig,

    pub wind: WindConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            time_step: DEFAULT_TIME_STEP,
            pins: PinLayout::TopRow,
            grid: GridConfig::default(),
            wind: WindConfig::default(),
        }
    }
}

impl SimulatorConfig {
    /// Default banner with the fan switched off.
    pub fn calm() -> Self {
        Self {
            wind: WindConfig::calm(),
            ..Default::default()
        }
    }

    /// `time_step²`, the integration factor applied to acceleration.
    #[inline]
    pub fn time_step_squared(&self) -> f32 {
        self.time_step * self.time_step
    }

    pub fn validate(&self) -> PennantResult<()> {
        self.grid.validate()?;
        self.wind.validate()?;
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(PennantError::InvalidConfig(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        if !self.gravity.is_finite() {
            return Err(PennantError::InvalidConfig(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> PennantResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| PennantError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> PennantResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> PennantResult<String> {
        toml::to_string(self).map_err(|e| PennantError::Serialization(e.to_string()))
    }
}
