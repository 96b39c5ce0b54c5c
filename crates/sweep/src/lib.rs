//! Parameter sweep over initial prisonization levels.
//!
//! Runs one simulation per evenly spaced initial prisonized fraction and
//! collects the outcomes into a results table.

pub mod config;
pub mod driver;
pub mod error;
pub mod output;

pub use config::{SweepConfig, SweepSettings};
pub use driver::{fractions, run_sweep};
pub use error::SweepError;
pub use output::{ResultRow, ResultsTable};
