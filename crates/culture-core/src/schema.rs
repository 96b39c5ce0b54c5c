//! Feature Schema
//!
//! How many cultural features exist and how many traits each may take.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::PRISONIZATION;

/// Number of traits of the prisonization feature
pub const PRISONIZATION_TRAITS: u32 = 2;

/// Immutable per-run description of the cultural features.
///
/// Feature 0 is always the binary prisonization indicator. The schema is owned
/// by the lattice of a run and shared read-only by all of its agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    trait_counts: Vec<u32>,
}

impl FeatureSchema {
    /// Build a schema from explicit per-feature trait counts
    pub fn new(trait_counts: Vec<u32>) -> Result<Self, ConfigError> {
        let first = *trait_counts.first().ok_or(ConfigError::EmptyTraitCounts)?;
        if first != PRISONIZATION_TRAITS {
            return Err(ConfigError::PrisonizationNotBinary { found: first });
        }
        if let Some(index) = trait_counts.iter().position(|&count| count == 0) {
            return Err(ConfigError::ZeroTraitCount { index });
        }
        Ok(Self { trait_counts })
    }

    /// Prisonization plus `feature_count - 1` features with the same trait count
    pub fn uniform(feature_count: usize, traits_per_feature: u32) -> Result<Self, ConfigError> {
        if feature_count == 0 {
            return Err(ConfigError::NoFeatures);
        }
        let mut trait_counts = Vec::with_capacity(feature_count);
        trait_counts.push(PRISONIZATION_TRAITS);
        trait_counts.resize(feature_count, traits_per_feature);
        Self::new(trait_counts)
    }

    pub fn feature_count(&self) -> usize {
        self.trait_counts.len()
    }

    /// Trait count of a feature, `None` when the index is outside the schema
    pub fn trait_count(&self, index: usize) -> Option<u32> {
        self.trait_counts.get(index).copied()
    }

    pub fn trait_counts(&self) -> &[u32] {
        &self.trait_counts
    }

    /// Indices of the non-prisonization features
    pub fn cultural_features(&self) -> std::ops::Range<usize> {
        PRISONIZATION + 1..self.trait_counts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_schema() {
        let schema = FeatureSchema::uniform(4, 3).unwrap();
        assert_eq!(schema.feature_count(), 4);
        assert_eq!(schema.trait_counts(), &[2, 3, 3, 3]);
        assert_eq!(schema.cultural_features(), 1..4);
    }

    #[test]
    fn test_prisonization_only_schema() {
        let schema = FeatureSchema::uniform(1, 4).unwrap();
        assert_eq!(schema.trait_counts(), &[2]);
        assert!(schema.cultural_features().is_empty());
    }

    #[test]
    fn test_empty_schema_rejected() {
        assert_eq!(
            FeatureSchema::new(Vec::new()),
            Err(ConfigError::EmptyTraitCounts)
        );
        assert_eq!(FeatureSchema::uniform(0, 4), Err(ConfigError::NoFeatures));
    }

    #[test]
    fn test_prisonization_must_be_binary() {
        assert_eq!(
            FeatureSchema::new(vec![3, 4]),
            Err(ConfigError::PrisonizationNotBinary { found: 3 })
        );
    }

    #[test]
    fn test_zero_trait_count_rejected() {
        assert_eq!(
            FeatureSchema::new(vec![2, 4, 0]),
            Err(ConfigError::ZeroTraitCount { index: 2 })
        );
    }

    #[test]
    fn test_trait_count_lookup() {
        let schema = FeatureSchema::new(vec![2, 5, 7]).unwrap();
        assert_eq!(schema.trait_count(1), Some(5));
        assert_eq!(schema.trait_count(3), None);
    }
}
