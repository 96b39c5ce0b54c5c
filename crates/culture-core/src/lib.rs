//! Cultural Diffusion Engine
//!
//! Agent-based model of how a binary prisonization trait spreads through a
//! population on a toroidal lattice alongside other cultural traits.

use rand::rngs::SmallRng;

pub mod agent;
pub mod config;
pub mod error;
pub mod interaction;
pub mod lattice;
pub mod schema;
pub mod seeding;
pub mod simulation;

pub use agent::AgentState;
pub use config::SimulationConfig;
pub use error::{ConfigError, PreconditionError, SimError};
pub use lattice::{Direction, Lattice};
pub use schema::FeatureSchema;
pub use seeding::{seed_prisonization, SeedingReport, SeedingStrategy};
pub use simulation::{run_simulation, Outcome, RunState, Simulation, SimulationResult};

/// Random number generator used for every draw within a run
pub type SimRng = SmallRng;

/// Index of the prisonization feature in every trait vector
pub const PRISONIZATION: usize = 0;
