//! Sweep Driver
//!
//! Runs the core simulation once per initial fraction and replicate.

use culture_core::run_simulation;
use tracing::info;
use uuid::Uuid;

use crate::config::SweepConfig;
use crate::error::SweepError;
use crate::output::{ResultRow, ResultsTable};

/// Evenly spaced fractions `0, 1/intervals, ..., 1`; empty for zero intervals
pub fn fractions(intervals: u32) -> Vec<f64> {
    if intervals == 0 {
        return Vec::new();
    }
    (0..=intervals)
        .map(|i| f64::from(i) / f64::from(intervals))
        .collect()
}

/// Run every fraction and replicate of the sweep in order.
///
/// Run `k` (counting from 0) is seeded with `base_seed + k`, so a sweep is
/// reproducible from its base seed alone.
pub fn run_sweep(config: &SweepConfig) -> Result<ResultsTable, SweepError> {
    config.validate()?;
    let base_seed = config
        .sweep
        .base_seed
        .or(config.simulation.seed)
        .unwrap_or_else(rand::random);

    let mut table = ResultsTable::new(Uuid::new_v4(), base_seed);
    info!(
        sweep_id = %table.sweep_id,
        base_seed,
        intervals = config.sweep.intervals,
        replicates = config.sweep.replicates,
        "starting sweep"
    );

    let mut run_index = 0u64;
    for fraction in fractions(config.sweep.intervals) {
        for replicate in 0..config.sweep.replicates {
            let run_config = config
                .simulation
                .clone()
                .with_initial_fraction(fraction)
                .with_seed(base_seed.wrapping_add(run_index));
            let result = run_simulation(&run_config)?;
            info!(
                fraction,
                replicate,
                steps = result.steps,
                final_fraction = result.final_prisonized_fraction,
                converged = result.converged(),
                "run complete"
            );
            table.push(ResultRow::new(&run_config, replicate, &result));
            run_index += 1;
        }
    }

    Ok(table)
}
