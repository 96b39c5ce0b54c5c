//! Interaction Rule
//!
//! Similarity metric, probabilistic influence test, and trait inheritance.
//!
//! An agent can only be influenced by a neighbor it partially resembles: a
//! neighbor with identical traits has nothing left to copy, and a neighbor with
//! no trait in common is never listened to.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::AgentState;
use crate::error::PreconditionError;

/// Number of features on which the two agents hold the same trait
pub fn matching_traits(a: &AgentState, b: &AgentState) -> usize {
    a.traits()
        .iter()
        .zip(b.traits())
        .filter(|(x, y)| x == y)
        .count()
}

/// Fraction of features on which the two agents agree, in [0, 1]
pub fn similarity(a: &AgentState, b: &AgentState) -> f64 {
    let feature_count = a.traits().len();
    if feature_count == 0 {
        return 1.0;
    }
    matching_traits(a, b) as f64 / feature_count as f64
}

/// Similarity strictly between 0 and 1, decided on the integer match count
fn partially_similar(a: &AgentState, b: &AgentState) -> bool {
    let matching = matching_traits(a, b);
    matching > 0 && matching < a.traits().len()
}

/// Whether any of the given neighbors could still influence the agent
pub fn influence_possible<'a, I>(agent: &AgentState, neighbors: I) -> bool
where
    I: IntoIterator<Item = &'a AgentState>,
{
    neighbors
        .into_iter()
        .any(|neighbor| partially_similar(agent, neighbor))
}

/// One interaction opportunity between an agent and a neighbor.
///
/// The contagion draw is only taken when the pair is partially similar.
pub fn is_influenced<R: Rng + ?Sized>(
    agent: &AgentState,
    neighbor: &AgentState,
    contagion_probability: f64,
    rng: &mut R,
) -> bool {
    if !partially_similar(agent, neighbor) {
        return false;
    }
    rng.gen::<f64>() < contagion_probability
}

/// Feature indices where the two agents hold different traits
pub fn differing_traits(agent: &AgentState, neighbor: &AgentState) -> Vec<usize> {
    agent
        .traits()
        .iter()
        .zip(neighbor.traits())
        .enumerate()
        .filter(|(_, (x, y))| x != y)
        .map(|(index, _)| index)
        .collect()
}

/// Copy one uniformly chosen differing trait from the neighbor.
///
/// Returns the inherited feature index.
pub fn inherit_trait<R: Rng + ?Sized>(
    agent: &mut AgentState,
    neighbor: &AgentState,
    rng: &mut R,
) -> Result<usize, PreconditionError> {
    let differing = differing_traits(agent, neighbor);
    let index = *differing
        .choose(rng)
        .ok_or(PreconditionError::IdenticalAgents)?;
    agent.copy_trait_from(neighbor, index);
    Ok(index)
}
