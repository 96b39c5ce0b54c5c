//! Errors raised while configuring or running a sweep.

use culture_core::{ConfigError, SimError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Simulation(#[from] SimError),
    #[error("sweep needs at least one interval")]
    NoIntervals,
    #[error("sweep needs at least one replicate")]
    NoReplicates,
}
