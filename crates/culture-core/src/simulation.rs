//! Simulation Loop
//!
//! Random asynchronous updates until the lattice reaches equilibrium or the
//! optional step cap is hit.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, enabled, info, trace, warn, Level};

use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::interaction::{inherit_trait, is_influenced};
use crate::lattice::{Direction, Lattice};
use crate::seeding::seed_prisonization;
use crate::SimRng;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Running,
    /// Terminal: no agent can be influenced any more
    AtEquilibrium,
    /// Terminal: the step cap was reached first
    StepCapReached,
}

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Converged,
    StepCapReached,
}

/// Summary statistics of one finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Steps taken when the run stopped
    pub steps: u64,
    pub outcome: Outcome,
    /// Prisonized share measured right after seeding
    pub initial_prisonized_fraction: f64,
    pub final_prisonized_fraction: f64,
    /// Steps that ended in a trait being inherited
    pub inheritance_events: u64,
    /// Seed that reproduces this run
    pub seed: u64,
    /// Cells drawn while seeding, rejected draws included
    pub seeding_draws: u64,
    /// Wall-clock time from population to termination
    pub elapsed_ms: u64,
}

impl SimulationResult {
    pub fn converged(&self) -> bool {
        self.outcome == Outcome::Converged
    }
}

/// One run of the stepping procedure over an owned lattice
#[derive(Debug)]
pub struct Simulation {
    lattice: Lattice,
    rng: SimRng,
    contagion_probability: f64,
    check_interval: u64,
    max_steps: Option<u64>,
    steps: u64,
    inheritances: u64,
    state: RunState,
}

impl Simulation {
    /// Wrap a populated and seeded lattice. The run starts in [`RunState::Running`].
    pub fn new(lattice: Lattice, config: &SimulationConfig, rng: SimRng) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            lattice,
            rng,
            contagion_probability: config.contagion_probability,
            check_interval: config.equilibrium_check_interval,
            max_steps: config.max_steps,
            steps: 0,
            inheritances: 0,
            state: RunState::Running,
        })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn into_lattice(self) -> Lattice {
        self.lattice
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn inheritance_count(&self) -> u64 {
        self.inheritances
    }

    fn cap_reached(&self) -> bool {
        self.max_steps.is_some_and(|cap| self.steps >= cap)
    }

    /// Pick a random agent and one of its four neighbors, and let the
    /// neighbor try to influence it. No-op once the run has terminated.
    pub fn step(&mut self) -> Result<RunState, SimError> {
        if self.state != RunState::Running {
            return Ok(self.state);
        }

        let n = self.lattice.side_length();
        let row = self.rng.gen_range(0..n);
        let col = self.rng.gen_range(0..n);
        let direction = match (self.rng.gen_bool(0.5), self.rng.gen_bool(0.5)) {
            (true, true) => Direction::South,
            (true, false) => Direction::North,
            (false, true) => Direction::East,
            (false, false) => Direction::West,
        };
        let (nr, nc) = self.lattice.neighbor_coords(row, col, direction);

        let influenced = is_influenced(
            self.lattice.agent(row, col),
            self.lattice.agent(nr, nc),
            self.contagion_probability,
            &mut self.rng,
        );
        if influenced {
            let neighbor = self.lattice.agent(nr, nc).clone();
            let feature = inherit_trait(self.lattice.agent_mut(row, col), &neighbor, &mut self.rng)?;
            self.inheritances += 1;
            trace!(step = self.steps, row, col, ?direction, feature, "trait inherited");
        }

        self.steps += 1;

        if self.steps % self.check_interval == 0 && self.lattice.at_equilibrium() {
            self.state = RunState::AtEquilibrium;
        } else if self.cap_reached() {
            self.state = RunState::StepCapReached;
        }
        Ok(self.state)
    }

    /// Step until a terminal state.
    ///
    /// Equilibrium is also checked once before the first step, so a lattice
    /// that starts converged finishes at step 0.
    pub fn run(&mut self) -> Result<RunState, SimError> {
        if self.steps == 0 && self.state == RunState::Running {
            if self.lattice.at_equilibrium() {
                self.state = RunState::AtEquilibrium;
            } else if self.cap_reached() {
                self.state = RunState::StepCapReached;
            }
        }

        while self.state == RunState::Running {
            self.step()?;
        }

        if self.state == RunState::StepCapReached {
            warn!(steps = self.steps, "step cap reached before equilibrium");
        }
        Ok(self.state)
    }
}

/// Populate, seed and run one lattice to termination
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationResult, SimError> {
    config.validate()?;
    let schema = config.schema()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = SimRng::seed_from_u64(seed);
    let started = Instant::now();

    let mut lattice = Lattice::populate(schema, config.grid_side_length, &mut rng)?;
    let seeding = seed_prisonization(
        &mut lattice,
        config.initial_prisonized_fraction,
        config.seeding,
        &mut rng,
    )?;
    let initial_prisonized_fraction = lattice.prisonized_fraction();

    debug!(
        seed,
        side_length = config.grid_side_length,
        initial_prisonized_fraction,
        "starting run"
    );
    if enabled!(Level::TRACE) {
        for line in lattice.trait_dump() {
            trace!("{}", line);
        }
    }

    let mut simulation = Simulation::new(lattice, config, rng)?;
    let state = simulation.run()?;

    let outcome = match state {
        RunState::AtEquilibrium => Outcome::Converged,
        _ => Outcome::StepCapReached,
    };
    let result = SimulationResult {
        steps: simulation.steps(),
        outcome,
        initial_prisonized_fraction,
        final_prisonized_fraction: simulation.lattice().prisonized_fraction(),
        inheritance_events: simulation.inheritance_count(),
        seed,
        seeding_draws: seeding.draws,
        elapsed_ms: started.elapsed().as_millis() as u64,
    };

    if enabled!(Level::TRACE) {
        for line in simulation.lattice().similarity_dump() {
            trace!("{}", line);
        }
    }
    info!(
        steps = result.steps,
        ?outcome,
        initial = result.initial_prisonized_fraction,
        final_fraction = result.final_prisonized_fraction,
        "run finished"
    );
    Ok(result)
}
