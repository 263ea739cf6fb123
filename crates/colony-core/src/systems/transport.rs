//! Cooperative Transport Policy
//!
//! Light objects are sorted as in the basic policy. A heavy object needs two
//! agents: the finder stops, waits and emits a marker; a free agent that
//! perceives the marker strongly enough links to the finder and jumps
//! straight onto its cell; the pair then carries the object together until
//! the leader drops it.
//!
//! Roles inside a pair: the follower is the agent that waited (still flagged
//! `waiting`, moved only by its leader); the leader is the agent that
//! answered the marker and carries the object.

use colony_events::{AgentId, EventKind, MarkerId, ObjectKind, Position};

use crate::components::agent::Percept;
use crate::error::{SimError, SimResult};
use crate::simulation::Simulation;
use crate::systems::carry::{pick_up, try_drop, try_pick_up};
use crate::systems::movement::{random_walk, teleport};
use crate::systems::perception::perceive;
use crate::systems::response::roll;

/// Copy of the decision-relevant agent fields, taken after perception.
#[derive(Debug, Clone, Copy)]
struct Status {
    position: Position,
    free: bool,
    waiting: bool,
    carried: Option<ObjectKind>,
    linked: Option<AgentId>,
    pheromone: Option<MarkerId>,
}

fn status(sim: &Simulation, id: AgentId) -> SimResult<Status> {
    let agent = sim.agent_ref(id)?;
    Ok(Status {
        position: agent.position,
        free: agent.is_free(),
        waiting: agent.waiting,
        carried: agent.carried,
        linked: agent.linked,
        pheromone: agent.pheromone,
    })
}

pub fn step(sim: &mut Simulation, id: AgentId) -> SimResult<()> {
    match perceive(sim, id, true)? {
        Percept::Object(kind) if kind.is_heavy() => on_heavy_object(sim, id, kind),
        Percept::Object(kind) => on_light_object(sim, id, kind),
        Percept::Marker(marker) => on_marker(sim, id, marker),
        Percept::Empty => on_empty_cell(sim, id),
    }
}

fn on_light_object(sim: &mut Simulation, id: AgentId, kind: ObjectKind) -> SimResult<()> {
    let me = status(sim, id)?;
    if me.free {
        try_pick_up(sim, id, kind)?;
        random_walk(sim, id)?;
    } else if !me.waiting {
        random_walk(sim, id)?;
    }
    Ok(())
}

fn on_marker(sim: &mut Simulation, id: AgentId, marker: MarkerId) -> SimResult<()> {
    let me = status(sim, id)?;
    if me.free {
        let (emitter, strength, attraction) = {
            let signal = sim.markers.get(marker).ok_or(SimError::UnknownMarker(marker))?;
            let emitter_at = sim.agent_ref(signal.emitter)?.position;
            let distance = me.position.chebyshev(emitter_at);
            (
                signal.emitter,
                signal.strength,
                signal.attraction(sim.config.pheromone.initial_strength, distance),
            )
        };
        if attraction >= sim.config.pheromone.link_threshold {
            link(sim, id, emitter, marker, strength)?;
        } else {
            random_walk(sim, id)?;
        }
    } else if me.carried.is_some() {
        random_walk(sim, id)?;
    }
    Ok(())
}

fn on_heavy_object(sim: &mut Simulation, id: AgentId, kind: ObjectKind) -> SimResult<()> {
    let me = status(sim, id)?;

    if me.free {
        if sim.grid.is_occupied_by_waiting_agent(me.position, &sim.agents) {
            random_walk(sim, id)?;
        } else {
            start_waiting(sim, id, me.position)?;
        }
        return Ok(());
    }

    if me.waiting {
        // A follower has no marker of its own and just holds still.
        if let Some(marker) = me.pheromone {
            decay_marker(sim, id, marker, me.position)?;
        }
        return Ok(());
    }

    if me.linked.is_some() && me.carried.is_none() {
        pick_up(sim, id, kind)?;
        random_walk(sim, id)?;
    } else if me.carried.is_some() && me.pheromone.is_none() {
        random_walk(sim, id)?;
    }
    Ok(())
}

fn on_empty_cell(sim: &mut Simulation, id: AgentId) -> SimResult<()> {
    let me = status(sim, id)?;
    match me.carried {
        Some(kind) if kind.is_heavy() => {
            if try_drop(sim, id)? {
                release_partner(sim, id)?;
            }
            random_walk(sim, id)?;
        }
        Some(_) => {
            try_drop(sim, id)?;
            random_walk(sim, id)?;
        }
        None if !me.waiting => {
            random_walk(sim, id)?;
        }
        None => {}
    }
    Ok(())
}

/// Stops on a heavy object and calls for help.
fn start_waiting(sim: &mut Simulation, id: AgentId, position: Position) -> SimResult<()> {
    let marker = emit_marker(sim, id, position)?;
    let agent = sim.agent_mut(id)?;
    agent.waiting = true;
    agent.pheromone = Some(marker);
    sim.events
        .record(sim.tick, id, EventKind::StartedWaiting { position, marker });
    Ok(())
}

fn emit_marker(sim: &mut Simulation, id: AgentId, position: Position) -> SimResult<MarkerId> {
    let radius = sim.config.pheromone.diffusion_radius;
    let strength = sim.config.pheromone.initial_strength;
    sim.markers.emit(&mut sim.grid, id, position, radius, strength)
}

/// One tick of waiting: the marker weakens, and once exhausted the agent
/// either gives up or re-emits at full strength.
fn decay_marker(
    sim: &mut Simulation,
    id: AgentId,
    marker: MarkerId,
    position: Position,
) -> SimResult<()> {
    if sim.markers.weaken(marker)? > 0 {
        return Ok(());
    }

    sim.markers.destroy(&mut sim.grid, marker)?;
    if roll(&mut sim.rng.0, sim.config.pheromone.give_up_probability) {
        let agent = sim.agent_mut(id)?;
        agent.waiting = false;
        agent.pheromone = None;
        sim.events.record(sim.tick, id, EventKind::GaveUp { marker });
        random_walk(sim, id)?;
    } else {
        let fresh = emit_marker(sim, id, position)?;
        sim.agent_mut(id)?.pheromone = Some(fresh);
        sim.events.record(
            sim.tick,
            id,
            EventKind::MarkerRefreshed {
                old: marker,
                new: fresh,
            },
        );
    }
    Ok(())
}

/// Answers a marker: withdraw it, pair up with its emitter, and jump onto the
/// emitter's cell.
fn link(
    sim: &mut Simulation,
    id: AgentId,
    partner: AgentId,
    marker: MarkerId,
    strength: u32,
) -> SimResult<()> {
    sim.markers.destroy(&mut sim.grid, marker)?;

    let from = sim.agent_ref(id)?.position;
    let partner_at = {
        let waiting = sim.agent_mut(partner)?;
        waiting.pheromone = None;
        waiting.linked = Some(id);
        waiting.position
    };
    sim.agent_mut(id)?.linked = Some(partner);
    teleport(sim, id, partner_at)?;

    sim.events.record(
        sim.tick,
        id,
        EventKind::Linked {
            partner,
            marker,
            distance: from.chebyshev(partner_at),
            strength,
        },
    );
    Ok(())
}

/// Ends a transport after the heavy object was dropped. The follower stops
/// waiting and takes one step of its own.
fn release_partner(sim: &mut Simulation, id: AgentId) -> SimResult<()> {
    let Some(partner) = sim.agent_mut(id)?.linked.take() else {
        return Ok(());
    };
    {
        let follower = sim.agent_mut(partner)?;
        follower.waiting = false;
        follower.linked = None;
    }
    sim.events
        .record(sim.tick, id, EventKind::Released { partner });
    random_walk(sim, partner)?;
    Ok(())
}
