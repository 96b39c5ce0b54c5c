//! Lattice
//!
//! Square grid of agents with toroidal 4-neighbor adjacency.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::AgentState;
use crate::error::{ConfigError, SimError};
use crate::interaction::{influence_possible, similarity};
use crate::schema::FeatureSchema;

/// Smallest side length for which the four neighbors are distinct cells
pub const MIN_SIDE_LENGTH: usize = 2;

/// Axis-aligned neighbor direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Order used by [`Lattice::neighbors_of`]
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];
}

/// Fully populated N x N grid that exclusively owns its agents.
///
/// Cells are stored row-major. The only ways to obtain a lattice are
/// [`Lattice::populate`] and [`Lattice::from_agents`], so a lattice is never
/// observed with empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    schema: FeatureSchema,
    side_length: usize,
    cells: Vec<AgentState>,
}

impl Lattice {
    /// Create one random, non-prisonized agent per cell
    pub fn populate<R: Rng + ?Sized>(
        schema: FeatureSchema,
        side_length: usize,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        if side_length < MIN_SIDE_LENGTH {
            return Err(ConfigError::GridTooSmall { side_length });
        }
        let population = side_length * side_length;
        let cells = (0..population)
            .map(|_| AgentState::new(&schema, rng))
            .collect();
        Ok(Self {
            schema,
            side_length,
            cells,
        })
    }

    /// Build a lattice from explicit agents listed row by row
    pub fn from_agents(
        schema: FeatureSchema,
        side_length: usize,
        agents: Vec<AgentState>,
    ) -> Result<Self, SimError> {
        if side_length < MIN_SIDE_LENGTH {
            return Err(ConfigError::GridTooSmall { side_length }.into());
        }
        let expected = side_length * side_length;
        if agents.len() != expected {
            return Err(ConfigError::AgentCountMismatch {
                expected,
                found: agents.len(),
            }
            .into());
        }
        for agent in &agents {
            AgentState::from_traits(&schema, agent.traits().to_vec())?;
        }
        Ok(Self {
            schema,
            side_length,
            cells: agents,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// Total number of agents (side length squared)
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(row < self.side_length && col < self.side_length);
        row * self.side_length + col
    }

    /// Agent at a cell. Panics if the coordinates are outside the grid.
    pub fn agent(&self, row: usize, col: usize) -> &AgentState {
        &self.cells[self.index(row, col)]
    }

    pub fn agent_mut(&mut self, row: usize, col: usize) -> &mut AgentState {
        let index = self.index(row, col);
        &mut self.cells[index]
    }

    /// Coordinates one step away in the given direction, wrapping at the edges
    pub fn neighbor_coords(&self, row: usize, col: usize, direction: Direction) -> (usize, usize) {
        let n = self.side_length;
        match direction {
            Direction::North => ((row + n - 1) % n, col),
            Direction::South => ((row + 1) % n, col),
            Direction::East => (row, (col + 1) % n),
            Direction::West => (row, (col + n - 1) % n),
        }
    }

    /// The four toroidal neighbors: north, south, east, west
    pub fn neighbors_of(&self, row: usize, col: usize) -> [&AgentState; 4] {
        Direction::ALL.map(|direction| {
            let (r, c) = self.neighbor_coords(row, col, direction);
            self.agent(r, c)
        })
    }

    /// All cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &AgentState)> + '_ {
        let n = self.side_length;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, agent)| ((i / n, i % n), agent))
    }

    pub fn prisonized_count(&self) -> usize {
        self.cells.iter().filter(|a| a.is_prisonized()).count()
    }

    /// Share of the population currently prisonized, in [0, 1]
    pub fn prisonized_fraction(&self) -> f64 {
        self.prisonized_count() as f64 / self.population() as f64
    }

    /// True when no agent can be influenced by any of its neighbors.
    ///
    /// Scans the whole grid; callers should only check periodically.
    pub fn at_equilibrium(&self) -> bool {
        !self
            .iter()
            .any(|((row, col), agent)| influence_possible(agent, self.neighbors_of(row, col)))
    }

    /// One line per cell: `(row, col) [traits]`
    pub fn trait_dump(&self) -> Vec<String> {
        self.iter()
            .map(|((row, col), agent)| format!("({}, {}) {}", row, col, agent))
            .collect()
    }

    /// One line per cell with its similarity to the east and south neighbors
    pub fn similarity_dump(&self) -> Vec<String> {
        self.iter()
            .map(|((row, col), agent)| {
                let (er, ec) = self.neighbor_coords(row, col, Direction::East);
                let (sr, sc) = self.neighbor_coords(row, col, Direction::South);
                format!(
                    "({}, {}) east={:.3} south={:.3}",
                    row,
                    col,
                    similarity(agent, self.agent(er, ec)),
                    similarity(agent, self.agent(sr, sc)),
                )
            })
            .collect()
    }
}
