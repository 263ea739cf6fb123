//! Perception System
//!
//! Each agent reads a single percept off its own cell and prepends it to its
//! memory. An object on the cell wins over a marker; the basic policies never
//! look at markers.

use colony_events::AgentId;

use crate::components::agent::Percept;
use crate::components::grid::Occupant;
use crate::error::SimResult;
use crate::simulation::Simulation;

/// Classifies a cell's contents.
pub fn read_cell(contents: &[Occupant], sees_markers: bool) -> Percept {
    if let Some(kind) = contents.iter().find_map(Occupant::object_kind) {
        return Percept::Object(kind);
    }
    if sees_markers {
        let marker = contents.iter().find_map(|o| match o {
            Occupant::Marker(id) => Some(*id),
            _ => None,
        });
        if let Some(id) = marker {
            return Percept::Marker(id);
        }
    }
    Percept::Empty
}

/// Reads the agent's cell, remembers the percept and returns it.
///
/// Fails with a consistency violation if the cell holds two object kinds.
pub fn perceive(sim: &mut Simulation, id: AgentId, sees_markers: bool) -> SimResult<Percept> {
    let position = sim.agent_ref(id)?.position;
    let percept = read_cell(sim.grid.contents_at(position)?, sees_markers);
    sim.agent_mut(id)?.memory.remember(percept);
    Ok(percept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Policy, SimConfig};
    use crate::error::SimError;
    use colony_events::{MarkerId, ObjectKind, Position};

    #[test]
    fn test_read_cell_priorities() {
        let agent = Occupant::Agent(AgentId(0));
        let marker = Occupant::Marker(MarkerId(4));
        let object = Occupant::Object(ObjectKind::C);

        assert_eq!(read_cell(&[], true), Percept::Empty);
        assert_eq!(read_cell(&[agent], true), Percept::Empty);
        assert_eq!(read_cell(&[agent, marker], true), Percept::Marker(MarkerId(4)));
        assert_eq!(read_cell(&[agent, marker], false), Percept::Empty);
        assert_eq!(
            read_cell(&[marker, object, agent], true),
            Percept::Object(ObjectKind::C)
        );
    }

    #[test]
    fn test_perceive_updates_memory() {
        let mut config = SimConfig::default();
        config.grid.width = 3;
        config.grid.height = 3;
        config.behavior.policy = Policy::Basic;
        let mut sim = Simulation::empty(config, 0).unwrap();
        let pos = Position::new(1, 1);
        sim.place_object(ObjectKind::B, pos).unwrap();
        let id = sim.spawn_agent(pos).unwrap();

        let percept = perceive(&mut sim, id, false).unwrap();
        assert_eq!(percept, Percept::Object(ObjectKind::B));
        assert_eq!(sim.agent(id).unwrap().memory.len(), 1);
    }

    #[test]
    fn test_eager_check_keeps_cell_consistent() {
        let mut config = SimConfig::default();
        config.grid.width = 2;
        config.grid.height = 2;
        let mut sim = Simulation::empty(config, 0).unwrap();
        let pos = Position::new(0, 0);
        let id = sim.spawn_agent(pos).unwrap();
        sim.place_object(ObjectKind::A, pos).unwrap();
        assert!(sim.place_object(ObjectKind::B, pos).is_err());
        assert_eq!(
            perceive(&mut sim, id, true).unwrap(),
            Percept::Object(ObjectKind::A)
        );
    }

    #[test]
    fn test_unknown_agent() {
        let mut config = SimConfig::default();
        config.grid.width = 2;
        config.grid.height = 2;
        let mut sim = Simulation::empty(config, 0).unwrap();
        assert!(matches!(
            perceive(&mut sim, AgentId(5), true),
            Err(SimError::UnknownAgent(_))
        ));
    }
}
