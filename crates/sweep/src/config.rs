//! Sweep Configuration
//!
//! Loads the base run parameters and sweep settings from `sweep.toml`.

use std::path::{Path, PathBuf};

use culture_core::SimulationConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SweepError;

/// Default sweep file path
pub const DEFAULT_SWEEP_PATH: &str = "sweep.toml";

/// Complete sweep configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Parameters shared by every run; the initial fraction and seed are
    /// overridden per run
    pub simulation: SimulationConfig,
    pub sweep: SweepSettings,
}

/// How the initial prisonized fraction is varied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Fractions run are `i / intervals` for `i` in `0..=intervals`
    pub intervals: u32,
    /// Runs per fraction
    pub replicates: u32,
    /// Seed of the first run; later runs use consecutive seeds
    pub base_seed: Option<u64>,
    /// Where to write the results table as JSON
    pub output_path: Option<PathBuf>,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            intervals: 20,
            replicates: 1,
            base_seed: None,
            output_path: None,
        }
    }
}

impl SweepConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SweepError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SweepError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from the default path, or use defaults if it is missing or invalid
    pub fn load_or_default() -> Self {
        if !Path::new(DEFAULT_SWEEP_PATH).exists() {
            debug!("no {} found, using defaults", DEFAULT_SWEEP_PATH);
            return Self::default();
        }
        Self::from_file(DEFAULT_SWEEP_PATH).unwrap_or_else(|e| {
            warn!("Could not load {}: {}. Using defaults.", DEFAULT_SWEEP_PATH, e);
            Self::default()
        })
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, SweepError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the sweep settings and the base run parameters
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.sweep.intervals == 0 {
            return Err(SweepError::NoIntervals);
        }
        if self.sweep.replicates == 0 {
            return Err(SweepError::NoReplicates);
        }
        self.simulation.validate()?;
        Ok(())
    }
}
