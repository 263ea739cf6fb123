//! Movement System
//!
//! Undirected random walk over the eight compass directions. A linked agent
//! carrying a heavy object drags its partner along the same direction; the
//! partner's move is attempted independently and may fail at the border.

use colony_events::{AgentId, Position};
use rand::seq::SliceRandom;

use crate::components::grid::Occupant;
use crate::error::SimResult;
use crate::simulation::Simulation;

/// Unit direction vectors, scaled by the configured step
pub const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
];

/// Moves one agent by a direction vector. Returns false, without mutating
/// anything, when the target is off the grid.
pub fn step_in_direction(
    sim: &mut Simulation,
    id: AgentId,
    direction: (isize, isize),
) -> SimResult<bool> {
    let step = sim.config.movement.step as isize;
    let from = sim.agent_ref(id)?.position;
    let moved = sim.grid.try_move(
        Occupant::Agent(id),
        from,
        direction.0 * step,
        direction.1 * step,
    )?;
    match moved {
        Some(to) => {
            sim.agent_mut(id)?.position = to;
            tracing::trace!(%id, %from, %to, "moved");
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Tries the eight directions in random order until one succeeds.
///
/// Returns the direction taken, or `None` when no direction fits (a board
/// smaller than one step in every direction). If the agent is linked and
/// carrying, the partner attempts the same direction.
pub fn random_walk(sim: &mut Simulation, id: AgentId) -> SimResult<Option<(isize, isize)>> {
    let mut directions = DIRECTIONS;
    directions.shuffle(&mut sim.rng.0);

    let mut taken = None;
    for direction in directions {
        if step_in_direction(sim, id, direction)? {
            taken = Some(direction);
            break;
        }
    }

    let Some(direction) = taken else {
        tracing::trace!(%id, "no valid move");
        return Ok(None);
    };

    let agent = sim.agent_ref(id)?;
    if let (Some(partner), true) = (agent.linked, agent.is_carrying()) {
        step_in_direction(sim, partner, direction)?;
    }
    Ok(Some(direction))
}

/// Moves an agent straight to a cell, as a linking agent does when it joins
/// its partner.
pub fn teleport(sim: &mut Simulation, id: AgentId, to: Position) -> SimResult<()> {
    let from = sim.agent_ref(id)?.position;
    sim.grid.relocate(Occupant::Agent(id), from, to)?;
    sim.agent_mut(id)?.position = to;
    Ok(())
}
