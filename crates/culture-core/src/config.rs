//! Run Configuration
//!
//! Parameters of a single simulation run. Deserializable so drivers can load
//! it from TOML or JSON; missing fields fall back to the reference values.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lattice::MIN_SIDE_LENGTH;
use crate::schema::FeatureSchema;
use crate::seeding::SeedingStrategy;

/// Default grid side length
pub const DEFAULT_GRID_SIDE_LENGTH: usize = 10;
/// Default number of features, prisonization included
pub const DEFAULT_FEATURE_COUNT: usize = 4;
/// Default number of traits for each non-prisonization feature
pub const DEFAULT_TRAITS_PER_FEATURE: u32 = 4;
/// Default number of steps between equilibrium checks
pub const DEFAULT_EQUILIBRIUM_CHECK_INTERVAL: u64 = 10;

/// Configuration of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Side length N of the N x N lattice
    pub grid_side_length: usize,
    /// Chance that a qualifying interaction results in inheritance
    pub contagion_probability: f64,
    /// Total features, including prisonization at index 0
    pub feature_count: usize,
    /// Trait count of every non-prisonization feature
    pub traits_per_feature: u32,
    /// Share of agents prisonized before the first step
    pub initial_prisonized_fraction: f64,
    /// Seed for the run's generator; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Stop without equilibrium after this many steps
    pub max_steps: Option<u64>,
    /// Steps between equilibrium scans
    pub equilibrium_check_interval: u64,
    pub seeding: SeedingStrategy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_side_length: DEFAULT_GRID_SIDE_LENGTH,
            contagion_probability: 1.0,
            feature_count: DEFAULT_FEATURE_COUNT,
            traits_per_feature: DEFAULT_TRAITS_PER_FEATURE,
            initial_prisonized_fraction: 0.0,
            seed: None,
            max_steps: None,
            equilibrium_check_interval: DEFAULT_EQUILIBRIUM_CHECK_INTERVAL,
            seeding: SeedingStrategy::Rejection,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_side_length < MIN_SIDE_LENGTH {
            return Err(ConfigError::GridTooSmall {
                side_length: self.grid_side_length,
            });
        }
        check_probability("contagion_probability", self.contagion_probability)?;
        check_probability(
            "initial_prisonized_fraction",
            self.initial_prisonized_fraction,
        )?;
        if self.feature_count == 0 {
            return Err(ConfigError::NoFeatures);
        }
        if self.traits_per_feature < 2 {
            return Err(ConfigError::TooFewTraits {
                traits_per_feature: self.traits_per_feature,
            });
        }
        if self.equilibrium_check_interval == 0 {
            return Err(ConfigError::ZeroCheckInterval);
        }
        Ok(())
    }

    /// Feature schema described by this configuration
    pub fn schema(&self) -> Result<FeatureSchema, ConfigError> {
        FeatureSchema::uniform(self.feature_count, self.traits_per_feature)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_initial_fraction(mut self, fraction: f64) -> Self {
        self.initial_prisonized_fraction = fraction;
        self
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}
