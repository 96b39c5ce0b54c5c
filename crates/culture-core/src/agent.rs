//! Agent State
//!
//! Per-agent cultural profile: one trait value per feature.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PreconditionError;
use crate::schema::FeatureSchema;
use crate::PRISONIZATION;

/// Current trait values of one agent
///
/// `traits[0]` is the prisonization flag (0 = not prisonized, 1 = prisonized).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentState {
    traits: Vec<u32>,
}

impl AgentState {
    /// Random cultural profile with no prisonization
    pub fn new<R: Rng + ?Sized>(schema: &FeatureSchema, rng: &mut R) -> Self {
        let mut agent = Self {
            traits: vec![0; schema.feature_count()],
        };
        agent.randomize_traits(schema, rng);
        agent.traits[PRISONIZATION] = 0;
        agent
    }

    /// Agent with explicit traits, validated against the schema
    pub fn from_traits(schema: &FeatureSchema, traits: Vec<u32>) -> Result<Self, PreconditionError> {
        if traits.len() != schema.feature_count() {
            return Err(PreconditionError::FeatureOutOfRange {
                index: traits.len().min(schema.feature_count()),
                feature_count: schema.feature_count(),
            });
        }
        for (index, (&value, &trait_count)) in traits.iter().zip(schema.trait_counts()).enumerate() {
            if value >= trait_count {
                return Err(PreconditionError::TraitOutOfRange {
                    index,
                    value,
                    trait_count,
                });
            }
        }
        Ok(Self { traits })
    }

    /// Redraw every non-prisonization trait uniformly; feature 0 is left as is
    pub fn randomize_traits<R: Rng + ?Sized>(&mut self, schema: &FeatureSchema, rng: &mut R) {
        for index in schema.cultural_features() {
            let trait_count = schema.trait_counts()[index];
            self.traits[index] = rng.gen_range(0..trait_count);
        }
    }

    pub fn set_trait(
        &mut self,
        schema: &FeatureSchema,
        index: usize,
        value: u32,
    ) -> Result<(), PreconditionError> {
        let trait_count = schema
            .trait_count(index)
            .ok_or(PreconditionError::FeatureOutOfRange {
                index,
                feature_count: schema.feature_count(),
            })?;
        if value >= trait_count {
            return Err(PreconditionError::TraitOutOfRange {
                index,
                value,
                trait_count,
            });
        }
        self.traits[index] = value;
        Ok(())
    }

    /// Unchecked write used by inheritance, where the value comes from a
    /// neighbor under the same schema.
    pub(crate) fn copy_trait_from(&mut self, other: &AgentState, index: usize) {
        self.traits[index] = other.traits[index];
    }

    pub fn traits(&self) -> &[u32] {
        &self.traits
    }

    pub fn trait_value(&self, index: usize) -> Option<u32> {
        self.traits.get(index).copied()
    }

    /// Set the prisonization flag; always in range since feature 0 is binary
    pub fn prisonize(&mut self) {
        self.traits[PRISONIZATION] = 1;
    }

    pub fn is_prisonized(&self) -> bool {
        self.traits[PRISONIZATION] == 1
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.traits)
    }
}
