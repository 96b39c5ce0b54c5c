//! Property tests for the interaction rule and lattice aggregates.

use culture_core::interaction::{differing_traits, inherit_trait, similarity};
use culture_core::seeding::target_count;
use culture_core::{
    seed_prisonization, AgentState, FeatureSchema, Lattice, SeedingStrategy, SimRng,
};
use proptest::prelude::*;
use rand::SeedableRng;

const TRAITS: u32 = 3;

/// Two agents under the same uniform schema
fn agent_pair() -> impl Strategy<Value = (FeatureSchema, AgentState, AgentState)> {
    (1_usize..8).prop_flat_map(|features| {
        let traits = move || {
            (0..2_u32, prop::collection::vec(0..TRAITS, features - 1)).prop_map(|(p, mut rest)| {
                rest.insert(0, p);
                rest
            })
        };
        (traits(), traits()).prop_map(move |(a, b)| {
            let schema = FeatureSchema::uniform(features, TRAITS).unwrap();
            let a = AgentState::from_traits(&schema, a).unwrap();
            let b = AgentState::from_traits(&schema, b).unwrap();
            (schema, a, b)
        })
    })
}

proptest! {
    #[test]
    fn similarity_is_symmetric_and_reflexive((_schema, a, b) in agent_pair()) {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
        prop_assert_eq!(similarity(&a, &a), 1.0);
        prop_assert!((0.0..=1.0).contains(&similarity(&a, &b)));
    }

    #[test]
    fn full_similarity_iff_no_differing_traits((_schema, a, b) in agent_pair()) {
        prop_assert_eq!(similarity(&a, &b) == 1.0, differing_traits(&a, &b).is_empty());
    }

    #[test]
    fn inheritance_changes_exactly_one_trait((_schema, a, b) in agent_pair(), seed in any::<u64>()) {
        prop_assume!(!differing_traits(&a, &b).is_empty());
        let mut rng = SimRng::seed_from_u64(seed);
        let mut child = a.clone();
        let index = inherit_trait(&mut child, &b, &mut rng).unwrap();

        prop_assert_ne!(a.traits()[index], b.traits()[index]);
        prop_assert_eq!(child.traits()[index], b.traits()[index]);
        for i in (0..a.traits().len()).filter(|&i| i != index) {
            prop_assert_eq!(child.traits()[i], a.traits()[i]);
        }
        prop_assert!(similarity(&child, &b) > similarity(&a, &b));
    }

    #[test]
    fn seeding_matches_rounded_target(
        side in 2_usize..12,
        fraction in 0.0_f64..=1.0,
        shuffle in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut rng = SimRng::seed_from_u64(seed);
        let schema = FeatureSchema::uniform(3, TRAITS).unwrap();
        let mut lattice = Lattice::populate(schema, side, &mut rng).unwrap();
        let strategy = if shuffle { SeedingStrategy::Shuffle } else { SeedingStrategy::Rejection };
        seed_prisonization(&mut lattice, fraction, strategy, &mut rng).unwrap();

        let population = side * side;
        let expected = target_count(fraction, population) as f64 / population as f64;
        prop_assert!((lattice.prisonized_fraction() - expected).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&lattice.prisonized_fraction()));
    }
}
