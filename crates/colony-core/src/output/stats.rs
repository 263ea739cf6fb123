//! Statistics Output
//!
//! Measures how far sorting has progressed and tallies behavioral events over
//! a run.

use colony_events::{ColonyEvent, EventType, ObjectKind, Position};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::simulation::Simulation;

/// Per-kind object counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl KindCounts {
    fn add(&mut self, kind: ObjectKind) {
        match kind {
            ObjectKind::A => self.a += 1,
            ObjectKind::B => self.b += 1,
            ObjectKind::C => self.c += 1,
        }
    }

    pub fn get(&self, kind: ObjectKind) -> usize {
        match kind {
            ObjectKind::A => self.a,
            ObjectKind::B => self.b,
            ObjectKind::C => self.c,
        }
    }

    pub fn total(&self) -> usize {
        self.a + self.b + self.c
    }
}

/// State of the board at one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortingStats {
    pub tick: u64,
    pub on_grid: KindCounts,
    pub carried: KindCounts,
    pub waiting_agents: usize,
    pub linked_pairs: usize,
    pub active_markers: usize,
    /// Mean share of same-kind objects among each object's occupied
    /// neighbours; 1.0 when every object only touches its own kind.
    pub clustering_index: f64,
}

impl SortingStats {
    pub fn collect(sim: &Simulation) -> Self {
        let grid = sim.grid();
        let mut on_grid = KindCounts::default();
        let mut same_share = 0.0;
        let mut scored_cells = 0usize;

        for position in grid.positions() {
            let Some(kind) = first_object(sim, position) else {
                continue;
            };
            on_grid.add(kind);

            let mut neighbours = 0usize;
            let mut same = 0usize;
            for other in grid.neighborhood(position, 1) {
                if other == position {
                    continue;
                }
                if let Some(neighbour) = first_object(sim, other) {
                    neighbours += 1;
                    if neighbour == kind {
                        same += 1;
                    }
                }
            }
            if neighbours > 0 {
                same_share += same as f64 / neighbours as f64;
                scored_cells += 1;
            }
        }

        let mut carried = KindCounts::default();
        let mut waiting_agents = 0;
        let mut linked_agents = 0;
        for agent in sim.agents() {
            if let Some(kind) = agent.carried {
                carried.add(kind);
            }
            if agent.waiting {
                waiting_agents += 1;
            }
            if agent.linked.is_some() {
                linked_agents += 1;
            }
        }

        let clustering_index = if scored_cells > 0 {
            same_share / scored_cells as f64
        } else {
            0.0
        };

        Self {
            tick: sim.tick_count(),
            on_grid,
            carried,
            waiting_agents,
            linked_pairs: linked_agents / 2,
            active_markers: sim.markers().len(),
            clustering_index,
        }
    }
}

fn first_object(sim: &Simulation, position: Position) -> Option<ObjectKind> {
    sim.grid()
        .occupants(position)
        .iter()
        .find_map(|o| o.object_kind())
}

impl fmt::Display for SortingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {}: clustering {:.3}, carried A/B/C {}/{}/{}, waiting {}, pairs {}, markers {}",
            self.tick,
            self.clustering_index,
            self.carried.a,
            self.carried.b,
            self.carried.c,
            self.waiting_agents,
            self.linked_pairs,
            self.active_markers
        )
    }
}

/// Running tally of events across drained ticks
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsCollector {
    pub total_events: usize,
    pub events_by_type: BTreeMap<String, usize>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, events: &[ColonyEvent]) {
        for event in events {
            self.total_events += 1;
            *self
                .events_by_type
                .entry(event.event_type().as_str().to_string())
                .or_insert(0) += 1;
        }
    }

    pub fn count(&self, event_type: EventType) -> usize {
        self.events_by_type
            .get(event_type.as_str())
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use colony_events::{AgentId, EventKind};

    fn board(size: usize) -> Simulation {
        let mut config = SimConfig::default();
        config.grid.width = size;
        config.grid.height = size;
        Simulation::empty(config, 0).unwrap()
    }

    #[test]
    fn test_sorted_board_scores_one() {
        let mut sim = board(4);
        for y in 0..4 {
            sim.place_object(ObjectKind::A, Position::new(0, y)).unwrap();
            sim.place_object(ObjectKind::A, Position::new(1, y)).unwrap();
        }
        let stats = SortingStats::collect(&sim);
        assert_eq!(stats.on_grid.a, 8);
        assert_eq!(stats.clustering_index, 1.0);
    }

    #[test]
    fn test_checkerboard_scores_low() {
        let mut sim = board(4);
        for position in sim.grid().positions().collect::<Vec<_>>() {
            let kind = if (position.x + position.y) % 2 == 0 {
                ObjectKind::A
            } else {
                ObjectKind::B
            };
            sim.place_object(kind, position).unwrap();
        }
        let stats = SortingStats::collect(&sim);
        assert!(stats.clustering_index < 0.5, "{}", stats.clustering_index);
        assert_eq!(stats.on_grid.total(), 16);
    }

    #[test]
    fn test_isolated_objects_are_not_scored() {
        let mut sim = board(5);
        sim.place_object(ObjectKind::A, Position::new(0, 0)).unwrap();
        sim.place_object(ObjectKind::B, Position::new(4, 4)).unwrap();
        assert_eq!(SortingStats::collect(&sim).clustering_index, 0.0);
    }

    #[test]
    fn test_agent_counters() {
        let mut sim = board(3);
        let a = sim.spawn_agent(Position::new(0, 0)).unwrap();
        let b = sim.spawn_agent(Position::new(0, 0)).unwrap();
        sim.agents[a.index()].waiting = true;
        sim.agents[a.index()].linked = Some(b);
        sim.agents[b.index()].linked = Some(a);
        sim.agents[b.index()].carried = Some(ObjectKind::C);

        let stats = SortingStats::collect(&sim);
        assert_eq!(stats.waiting_agents, 1);
        assert_eq!(stats.linked_pairs, 1);
        assert_eq!(stats.carried.get(ObjectKind::C), 1);
        assert!(stats.to_string().contains("pairs 1"));
    }

    #[test]
    fn test_collector_counts_by_type() {
        let mut collector = StatsCollector::new();
        let position = Position::new(0, 0);
        let events = vec![
            ColonyEvent::new(
                1,
                AgentId(0),
                EventKind::PickedUp {
                    object: ObjectKind::A,
                    position,
                },
            ),
            ColonyEvent::new(
                1,
                AgentId(1),
                EventKind::PickedUp {
                    object: ObjectKind::B,
                    position,
                },
            ),
            ColonyEvent::new(
                2,
                AgentId(0),
                EventKind::Released {
                    partner: AgentId(1),
                },
            ),
        ];
        collector.record(&events);
        assert_eq!(collector.total_events, 3);
        assert_eq!(collector.count(EventType::PickedUp), 2);
        assert_eq!(collector.count(EventType::Released), 1);
        assert_eq!(collector.count(EventType::GaveUp), 0);
    }
}
