//! Snapshot Generation
//!
//! Turns the live board into renderable snapshot values and into the
//! bordered text grid printed by the headless binary.

use colony_events::{CellSnapshot, GridSnapshot, OccupantSnapshot, Position};

use crate::components::grid::Occupant;
use crate::simulation::Simulation;

/// Captures every non-empty cell. Occupants keep their in-cell order.
pub fn capture(sim: &Simulation) -> GridSnapshot {
    let mut snapshot = GridSnapshot::new(sim.tick_count(), sim.width(), sim.height());
    for position in sim.grid().positions() {
        let occupants = sim.grid().occupants(position);
        if occupants.is_empty() {
            continue;
        }
        snapshot.cells.push(CellSnapshot {
            position,
            occupants: occupants
                .iter()
                .filter_map(|o| describe(sim, *o))
                .collect(),
        });
    }
    snapshot
}

fn describe(sim: &Simulation, occupant: Occupant) -> Option<OccupantSnapshot> {
    match occupant {
        Occupant::Object(object) => Some(OccupantSnapshot::Object { object }),
        Occupant::Agent(id) => sim.agent(id).map(|agent| OccupantSnapshot::Agent {
            id,
            carrying: agent.carried,
            waiting: agent.waiting,
            linked: agent.linked.is_some(),
        }),
        Occupant::Marker(id) => sim.markers().get(id).map(|marker| OccupantSnapshot::Marker {
            id,
            emitter: marker.emitter,
            strength: marker.strength,
        }),
    }
}

/// Text picture of the board: one bordered line per row, each cell right
/// aligned in two columns.
pub fn render_ascii(sim: &Simulation) -> String {
    let border = "_".repeat(sim.height() * 3);
    let mut out = border.clone();
    for x in 0..sim.width() {
        out.push_str("\n|");
        for y in 0..sim.height() {
            let cell: String = sim
                .grid()
                .occupants(Position::new(x, y))
                .iter()
                .filter_map(|o| describe(sim, *o))
                .map(|o| o.glyph())
                .collect();
            out.push_str(&format!("{:>2}|", cell));
        }
        out.push('\n');
        out.push_str(&border);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use colony_events::ObjectKind;

    fn board() -> Simulation {
        let mut config = SimConfig::default();
        config.grid.width = 2;
        config.grid.height = 3;
        Simulation::empty(config, 0).unwrap()
    }

    #[test]
    fn test_capture_lists_non_empty_cells() {
        let mut sim = board();
        sim.place_object(ObjectKind::A, Position::new(0, 1)).unwrap();
        let id = sim.spawn_agent(Position::new(1, 2)).unwrap();
        sim.agents[id.index()].carried = Some(ObjectKind::B);

        let snapshot = capture(&sim);
        assert_eq!(snapshot.width, 2);
        assert_eq!(snapshot.height, 3);
        assert_eq!(snapshot.cells.len(), 2);
        assert_eq!(
            snapshot.cell(Position::new(1, 2)).unwrap().occupants,
            vec![OccupantSnapshot::Agent {
                id,
                carrying: Some(ObjectKind::B),
                waiting: false,
                linked: false,
            }]
        );
    }

    #[test]
    fn test_capture_includes_markers() {
        let mut sim = board();
        let id = sim.spawn_agent(Position::new(0, 0)).unwrap();
        sim.markers
            .emit(&mut sim.grid, id, Position::new(0, 0), 1, 100)
            .unwrap();
        let snapshot = capture(&sim);
        let marked = snapshot.cells.iter().filter(|c| c.has_marker()).count();
        assert_eq!(marked, 3);
    }

    #[test]
    fn test_render_ascii() {
        let mut sim = board();
        sim.place_object(ObjectKind::A, Position::new(0, 0)).unwrap();
        sim.place_object(ObjectKind::B, Position::new(1, 1)).unwrap();
        let id = sim.spawn_agent(Position::new(1, 2)).unwrap();
        sim.agents[id.index()].carried = Some(ObjectKind::A);

        let expected = "_________\n| A|  |  |\n_________\n|  | B|*A|\n_________";
        assert_eq!(render_ascii(&sim), expected);
    }
}
