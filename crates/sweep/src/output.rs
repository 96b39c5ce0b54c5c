//! Results Output
//!
//! Collects one row per run and writes the table for downstream analysis.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use culture_core::{SimulationConfig, SimulationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SweepError;

/// Outcome of one run within a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub grid_side_length: usize,
    pub contagion_probability: f64,
    pub feature_count: usize,
    pub traits_per_feature: u32,
    /// Requested initial fraction
    pub initial_prisonized_fraction: f64,
    pub final_prisonized_fraction: f64,
    pub replicate: u32,
    pub steps: u64,
    pub converged: bool,
    pub seed: u64,
}

impl ResultRow {
    pub fn new(config: &SimulationConfig, replicate: u32, result: &SimulationResult) -> Self {
        Self {
            grid_side_length: config.grid_side_length,
            contagion_probability: config.contagion_probability,
            feature_count: config.feature_count,
            traits_per_feature: config.traits_per_feature,
            initial_prisonized_fraction: config.initial_prisonized_fraction,
            final_prisonized_fraction: result.final_prisonized_fraction,
            replicate,
            steps: result.steps,
            converged: result.converged(),
            seed: result.seed,
        }
    }
}

/// All rows of one sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsTable {
    pub sweep_id: Uuid,
    pub base_seed: u64,
    rows: Vec<ResultRow>,
}

impl ResultsTable {
    pub fn new(sweep_id: Uuid, base_seed: u64) -> Self {
        Self {
            sweep_id,
            base_seed,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mean final fraction per requested initial fraction, in sweep order
    pub fn mean_final_by_initial(&self) -> Vec<(f64, f64)> {
        let mut groups: Vec<(f64, f64, u32)> = Vec::new();
        for row in &self.rows {
            match groups
                .iter_mut()
                .find(|(initial, _, _)| *initial == row.initial_prisonized_fraction)
            {
                Some((_, sum, count)) => {
                    *sum += row.final_prisonized_fraction;
                    *count += 1;
                }
                None => groups.push((row.initial_prisonized_fraction, row.final_prisonized_fraction, 1)),
            }
        }
        groups
            .into_iter()
            .map(|(initial, sum, count)| (initial, sum / f64::from(count)))
            .collect()
    }

    /// Runs that hit the step cap
    pub fn unconverged(&self) -> usize {
        self.rows.iter().filter(|r| !r.converged).count()
    }

    /// Fixed-width text table, one line per row
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>5} {:>9} {:>8} {:>6} {:>8} {:>8} {:>4} {:>10} {:>5}",
            "grid", "contagion", "features", "traits", "initial", "final", "rep", "steps", "conv"
        );
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{:>5} {:>9.3} {:>8} {:>6} {:>8.3} {:>8.3} {:>4} {:>10} {:>5}",
                row.grid_side_length,
                row.contagion_probability,
                row.feature_count,
                row.traits_per_feature,
                row.initial_prisonized_fraction,
                row.final_prisonized_fraction,
                row.replicate,
                row.steps,
                if row.converged { "yes" } else { "no" },
            );
        }
        out
    }

    pub fn to_json(&self) -> Result<String, SweepError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the table as pretty JSON, creating parent directories as needed
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SweepError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
