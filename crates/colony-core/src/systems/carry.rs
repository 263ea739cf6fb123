//! Pick-up and drop actions shared by both policies.

use colony_events::{AgentId, EventKind, ObjectKind};

use crate::components::grid::Occupant;
use crate::error::SimResult;
use crate::simulation::Simulation;
use crate::systems::response::{drop_probability, local_density, pick_up_probability, roll};

/// Lifts an object of `kind` off the agent's cell unconditionally.
pub fn pick_up(sim: &mut Simulation, id: AgentId, kind: ObjectKind) -> SimResult<()> {
    let position = sim.agent_ref(id)?.position;
    sim.grid.remove_from(Occupant::Object(kind), position)?;
    sim.agent_mut(id)?.carried = Some(kind);
    sim.events.record(
        sim.tick,
        id,
        EventKind::PickedUp {
            object: kind,
            position,
        },
    );
    Ok(())
}

/// Picks up with probability `(kp / (kp + f))^2`. Returns whether it did.
pub fn try_pick_up(sim: &mut Simulation, id: AgentId, kind: ObjectKind) -> SimResult<bool> {
    let f = local_density(sim.agent_ref(id)?, &sim.config.behavior);
    let probability = pick_up_probability(sim.config.behavior.pick_up_rate, f);
    if !roll(&mut sim.rng.0, probability) {
        return Ok(false);
    }
    pick_up(sim, id, kind)?;
    Ok(true)
}

/// Drops the carried object with probability `(f / (km + f))^2`. Returns
/// whether it did; an empty-handed agent never drops.
pub fn try_drop(sim: &mut Simulation, id: AgentId) -> SimResult<bool> {
    let agent = sim.agent_ref(id)?;
    let Some(kind) = agent.carried else {
        return Ok(false);
    };
    let position = agent.position;
    let f = local_density(agent, &sim.config.behavior);
    let probability = drop_probability(sim.config.behavior.drop_rate, f);
    if !roll(&mut sim.rng.0, probability) {
        return Ok(false);
    }

    sim.grid.place_at(Occupant::Object(kind), position)?;
    sim.agent_mut(id)?.carried = None;
    sim.events.record(
        sim.tick,
        id,
        EventKind::Dropped {
            object: kind,
            position,
        },
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::Percept;
    use crate::config::SimConfig;
    use crate::error::SimError;
    use colony_events::{EventType, Position};

    fn board() -> Simulation {
        let mut config = SimConfig::default();
        config.grid.width = 3;
        config.grid.height = 3;
        Simulation::empty(config, 5).unwrap()
    }

    #[test]
    fn test_pick_up_moves_object_into_backpack() {
        let mut sim = board();
        let pos = Position::new(1, 1);
        sim.place_object(ObjectKind::A, pos).unwrap();
        let id = sim.spawn_agent(pos).unwrap();

        pick_up(&mut sim, id, ObjectKind::A).unwrap();
        assert_eq!(sim.agent(id).unwrap().carried, Some(ObjectKind::A));
        assert_eq!(sim.grid().object_at(pos).unwrap(), None);
        assert_eq!(sim.events()[0].event_type(), EventType::PickedUp);
    }

    #[test]
    fn test_pick_up_missing_object_is_fatal() {
        let mut sim = board();
        let id = sim.spawn_agent(Position::new(0, 0)).unwrap();
        let err = pick_up(&mut sim, id, ObjectKind::B).unwrap_err();
        assert!(matches!(err, SimError::MissingOccupant { .. }));
    }

    #[test]
    fn test_rare_object_is_always_picked_up() {
        let mut sim = board();
        let pos = Position::new(0, 2);
        sim.place_object(ObjectKind::B, pos).unwrap();
        let id = sim.spawn_agent(pos).unwrap();
        // Nothing like B in memory: f is tiny, so pick-up is near certain.
        for _ in 0..9 {
            sim.agents[id.index()].memory.remember(Percept::Empty);
        }
        sim.agents[id.index()].memory.remember(Percept::Object(ObjectKind::B));
        sim.config.behavior.pick_up_rate = 1000.0;
        assert!(try_pick_up(&mut sim, id, ObjectKind::B).unwrap());
    }

    #[test]
    fn test_drop_needs_a_carried_object() {
        let mut sim = board();
        let id = sim.spawn_agent(Position::new(2, 2)).unwrap();
        sim.agents[id.index()].memory.remember(Percept::Empty);
        assert!(!try_drop(&mut sim, id).unwrap());
        assert!(sim.events().is_empty());
    }

    #[test]
    fn test_drop_places_object() {
        let mut sim = board();
        let pos = Position::new(2, 1);
        let id = sim.spawn_agent(pos).unwrap();
        sim.agents[id.index()].carried = Some(ObjectKind::A);
        sim.agents[id.index()].memory.remember(Percept::Empty);
        // f = 1 and a tiny km make the drop near certain.
        sim.config.behavior.drop_rate = 1e-9;
        assert!(try_drop(&mut sim, id).unwrap());
        assert_eq!(sim.agent(id).unwrap().carried, None);
        assert_eq!(sim.grid().object_at(pos).unwrap(), Some(ObjectKind::A));
    }
}
