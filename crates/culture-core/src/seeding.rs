//! Initial Prisonization Seeding
//!
//! Marks a share of a freshly populated lattice as prisonized before the run.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::lattice::Lattice;

/// How cells are picked for initial prisonization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingStrategy {
    /// Draw random cells, skipping ones already prisonized
    #[default]
    Rejection,
    /// Shuffle every coordinate once and take cells from the front
    Shuffle,
}

/// Outcome of a seeding pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedingReport {
    /// Cells requested, `round(fraction * population)`
    pub target: usize,
    /// Cells actually flipped to prisonized
    pub flipped: usize,
    /// Cells drawn or inspected, including rejected ones
    pub draws: u64,
}

/// Number of agents to prisonize for a fraction, rounding half away from zero
pub fn target_count(fraction: f64, population: usize) -> usize {
    (fraction * population as f64).round() as usize
}

/// Prisonize `round(fraction * population)` agents that are not yet prisonized.
///
/// If the lattice has fewer non-prisonized agents than that, all of them are
/// flipped.
pub fn seed_prisonization<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    fraction: f64,
    strategy: SeedingStrategy,
    rng: &mut R,
) -> Result<SeedingReport, ConfigError> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(ConfigError::ProbabilityOutOfRange {
            name: "initial_prisonized_fraction",
            value: fraction,
        });
    }

    let target = target_count(fraction, lattice.population());
    let available = lattice.population() - lattice.prisonized_count();
    if target > available {
        warn!(requested = target, available, "not enough unprisonized agents to reach seeding target");
    }
    let remaining = target.min(available);

    let draws = match strategy {
        SeedingStrategy::Rejection => seed_by_rejection(lattice, remaining, rng),
        SeedingStrategy::Shuffle => seed_by_shuffle(lattice, remaining, rng),
    };

    debug!(?strategy, requested = target, flipped = remaining, draws, "seeded initial prisonization");
    Ok(SeedingReport {
        target,
        flipped: remaining,
        draws,
    })
}

fn seed_by_rejection<R: Rng + ?Sized>(lattice: &mut Lattice, mut remaining: usize, rng: &mut R) -> u64 {
    let n = lattice.side_length();
    let mut draws = 0u64;
    while remaining > 0 {
        draws += 1;
        let row = rng.gen_range(0..n);
        let col = rng.gen_range(0..n);
        let agent = lattice.agent_mut(row, col);
        if !agent.is_prisonized() {
            agent.prisonize();
            remaining -= 1;
        }
    }
    draws
}

fn seed_by_shuffle<R: Rng + ?Sized>(lattice: &mut Lattice, mut remaining: usize, rng: &mut R) -> u64 {
    let n = lattice.side_length();
    let mut cells: Vec<usize> = (0..lattice.population()).collect();
    cells.shuffle(rng);

    let mut draws = 0u64;
    for cell in cells {
        if remaining == 0 {
            break;
        }
        draws += 1;
        let agent = lattice.agent_mut(cell / n, cell % n);
        if !agent.is_prisonized() {
            agent.prisonize();
            remaining -= 1;
        }
    }
    draws
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FeatureSchema;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn fresh_lattice(side_length: usize, rng: &mut SmallRng) -> Lattice {
        let schema = FeatureSchema::uniform(4, 4).unwrap();
        Lattice::populate(schema, side_length, rng).unwrap()
    }

    #[test]
    fn test_target_count_rounding() {
        assert_eq!(target_count(0.0, 100), 0);
        assert_eq!(target_count(0.25, 16), 4);
        assert_eq!(target_count(0.5, 5), 3);
        assert_eq!(target_count(0.125, 4), 1);
        assert_eq!(target_count(1.0, 49), 49);
    }

    #[test]
    fn test_rejection_seeding_hits_target() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut lattice = fresh_lattice(10, &mut rng);
        let report =
            seed_prisonization(&mut lattice, 0.4, SeedingStrategy::Rejection, &mut rng).unwrap();

        assert_eq!(report.target, 40);
        assert_eq!(report.flipped, 40);
        assert!(report.draws >= 40);
        assert_eq!(lattice.prisonized_count(), 40);
    }

    #[test]
    fn test_shuffle_seeding_hits_target() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut lattice = fresh_lattice(10, &mut rng);
        let report =
            seed_prisonization(&mut lattice, 0.73, SeedingStrategy::Shuffle, &mut rng).unwrap();

        assert_eq!(report.flipped, 73);
        assert_eq!(report.draws, 73);
        assert_eq!(lattice.prisonized_count(), 73);
    }

    #[test]
    fn test_full_seeding_terminates() {
        for strategy in [SeedingStrategy::Rejection, SeedingStrategy::Shuffle] {
            let mut rng = SmallRng::seed_from_u64(9);
            let mut lattice = fresh_lattice(8, &mut rng);
            seed_prisonization(&mut lattice, 1.0, strategy, &mut rng).unwrap();
            assert!(lattice.iter().all(|(_, a)| a.is_prisonized()));
            assert_eq!(lattice.prisonized_fraction(), 1.0);
        }
    }

    #[test]
    fn test_seeding_only_touches_prisonization() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut lattice = fresh_lattice(6, &mut rng);
        let before = lattice.clone();
        seed_prisonization(&mut lattice, 0.5, SeedingStrategy::Rejection, &mut rng).unwrap();

        for ((row, col), agent) in lattice.iter() {
            assert_eq!(&agent.traits()[1..], &before.agent(row, col).traits()[1..]);
        }
    }

    #[test]
    fn test_seeding_rejects_bad_fraction() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut lattice = fresh_lattice(4, &mut rng);
        assert!(seed_prisonization(&mut lattice, 1.5, SeedingStrategy::Rejection, &mut rng).is_err());
        assert!(seed_prisonization(&mut lattice, f64::NAN, SeedingStrategy::Shuffle, &mut rng).is_err());
    }

    #[test]
    fn test_seeding_is_capped_by_available_agents() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut lattice = fresh_lattice(4, &mut rng);
        seed_prisonization(&mut lattice, 0.75, SeedingStrategy::Rejection, &mut rng).unwrap();
        let report =
            seed_prisonization(&mut lattice, 0.5, SeedingStrategy::Rejection, &mut rng).unwrap();

        assert_eq!(report.target, 8);
        assert_eq!(report.flipped, 4);
        assert_eq!(lattice.prisonized_count(), 16);
    }
}
