//! Prisonization Sweep
//!
//! Runs the cultural diffusion model across initial prisonization levels and
//! prints the resulting table.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sweep::{run_sweep, SweepConfig, SweepError};
use tracing_subscriber::EnvFilter;

/// Command line arguments for the sweep
#[derive(Parser, Debug)]
#[command(name = "prisonization_sweep")]
#[command(about = "Sweep initial prisonization levels through the cultural diffusion model")]
struct Args {
    /// Sweep configuration file (defaults to sweep.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of intervals between 0 and 1
    #[arg(long)]
    intervals: Option<u32>,

    /// Runs per initial fraction
    #[arg(long)]
    replicates: Option<u32>,

    /// Grid side length
    #[arg(long)]
    grid_size: Option<usize>,

    /// Contagion probability
    #[arg(long)]
    contagion: Option<f64>,

    /// Total features, prisonization included
    #[arg(long)]
    features: Option<usize>,

    /// Traits per non-prisonization feature
    #[arg(long)]
    traits: Option<u32>,

    /// Stop a run after this many steps without equilibrium
    #[arg(long)]
    max_steps: Option<u64>,

    /// Write the results table as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Command-line values take precedence over the file
    fn apply(&self, config: &mut SweepConfig) {
        if let Some(seed) = self.seed {
            config.sweep.base_seed = Some(seed);
        }
        if let Some(intervals) = self.intervals {
            config.sweep.intervals = intervals;
        }
        if let Some(replicates) = self.replicates {
            config.sweep.replicates = replicates;
        }
        if let Some(grid_size) = self.grid_size {
            config.simulation.grid_side_length = grid_size;
        }
        if let Some(contagion) = self.contagion {
            config.simulation.contagion_probability = contagion;
        }
        if let Some(features) = self.features {
            config.simulation.feature_count = features;
        }
        if let Some(traits) = self.traits {
            config.simulation.traits_per_feature = traits;
        }
        if let Some(max_steps) = self.max_steps {
            config.simulation.max_steps = Some(max_steps);
        }
        if let Some(output) = &self.output {
            config.sweep.output_path = Some(output.clone());
        }
    }
}

fn run(args: &Args) -> Result<(), SweepError> {
    let mut config = match &args.config {
        Some(path) => SweepConfig::from_file(path)?,
        None => SweepConfig::load_or_default(),
    };
    args.apply(&mut config);

    println!("Prisonization Sweep");
    println!("===================");
    println!("Grid: {0}x{0}", config.simulation.grid_side_length);
    println!("Contagion: {}", config.simulation.contagion_probability);
    println!(
        "Features: {} ({} traits each)",
        config.simulation.feature_count, config.simulation.traits_per_feature
    );
    println!(
        "Intervals: {} x {} replicate(s)",
        config.sweep.intervals, config.sweep.replicates
    );
    println!();

    let table = run_sweep(&config)?;

    print!("{}", table.render());
    println!();
    println!("Sweep {} (base seed {})", table.sweep_id, table.base_seed);
    if table.unconverged() > 0 {
        println!("{} run(s) hit the step cap before equilibrium", table.unconverged());
    }

    if let Some(path) = &config.sweep.output_path {
        table.write_json(path)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
