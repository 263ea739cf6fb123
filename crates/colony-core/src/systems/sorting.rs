//! Basic Sorting Policy
//!
//! Light objects only. Pick up on a non-empty cell when empty-handed, drop on
//! an empty cell when carrying, then always take one random step.

use colony_events::AgentId;

use crate::components::agent::Percept;
use crate::error::SimResult;
use crate::simulation::Simulation;
use crate::systems::carry::{try_drop, try_pick_up};
use crate::systems::movement::random_walk;
use crate::systems::perception::perceive;

pub fn step(sim: &mut Simulation, id: AgentId) -> SimResult<()> {
    let percept = perceive(sim, id, false)?;
    let carried = sim.agent_ref(id)?.carried;

    match (percept, carried) {
        (Percept::Object(kind), None) => {
            try_pick_up(sim, id, kind)?;
        }
        (Percept::Empty, Some(_)) => {
            try_drop(sim, id)?;
        }
        _ => {}
    }

    random_walk(sim, id)?;
    Ok(())
}
