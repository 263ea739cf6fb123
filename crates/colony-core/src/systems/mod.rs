//! Agent Systems
//!
//! Perception, response functions, movement, carrying, and the two decision
//! policies that combine them.

pub mod carry;
pub mod movement;
pub mod perception;
pub mod response;
pub mod sorting;
pub mod transport;

pub use movement::{random_walk, teleport, DIRECTIONS};
pub use perception::{perceive, read_cell};
pub use response::{drop_probability, pick_up_probability};

use colony_events::AgentId;

use crate::config::Policy;
use crate::error::SimResult;
use crate::simulation::Simulation;

/// Runs one agent's perceive-decide-act cycle under the configured policy.
pub fn step_agent(sim: &mut Simulation, id: AgentId) -> SimResult<()> {
    match sim.config.behavior.policy {
        Policy::Basic | Policy::BasicWithError => sorting::step(sim, id),
        Policy::Cooperative => transport::step(sim, id),
    }
}
