//! Error types for the diffusion engine.

use thiserror::Error;

/// Malformed schema or run configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("trait count list must contain at least one feature")]
    EmptyTraitCounts,
    #[error("prisonization feature must have exactly 2 traits, found {found}")]
    PrisonizationNotBinary { found: u32 },
    #[error("feature {index} must allow at least one trait")]
    ZeroTraitCount { index: usize },
    #[error("grid side length must be at least 2, got {side_length}")]
    GridTooSmall { side_length: usize },
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("traits per feature must be at least 2, got {traits_per_feature}")]
    TooFewTraits { traits_per_feature: u32 },
    #[error("feature count must be at least 1")]
    NoFeatures,
    #[error("equilibrium check interval must be non-zero")]
    ZeroCheckInterval,
    #[error("lattice needs {expected} agents, got {found}")]
    AgentCountMismatch { expected: usize, found: usize },
}

/// Operation invoked outside its contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("cannot inherit a trait between agents with identical traits")]
    IdenticalAgents,
    #[error("feature index {index} is outside the schema ({feature_count} features)")]
    FeatureOutOfRange { index: usize, feature_count: usize },
    #[error("trait value {value} is out of range for feature {index} ({trait_count} traits)")]
    TraitOutOfRange {
        index: usize,
        value: u32,
        trait_count: u32,
    },
}

/// Any error that aborts a simulation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("precondition violated: {0}")]
    Precondition(#[from] PreconditionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::PrisonizationNotBinary { found: 3 };
        assert_eq!(
            err.to_string(),
            "prisonization feature must have exactly 2 traits, found 3"
        );

        let err: SimError = PreconditionError::IdenticalAgents.into();
        assert!(err.to_string().starts_with("precondition violated"));
    }
}
