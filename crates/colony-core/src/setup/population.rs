//! Population Scattering
//!
//! Objects go on distinct random cells, one object per cell. Agents are then
//! scattered on distinct random cells chosen independently, so an agent may
//! start on top of an object.

use colony_events::{ObjectKind, Position};
use rand::seq::SliceRandom;
use std::fmt;

use crate::error::{SimError, SimResult};
use crate::simulation::Simulation;

/// What was put on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpawnSummary {
    pub objects_a: usize,
    pub objects_b: usize,
    pub objects_c: usize,
    pub agents: usize,
}

impl SpawnSummary {
    pub fn total_objects(&self) -> usize {
        self.objects_a + self.objects_b + self.objects_c
    }
}

impl fmt::Display for SpawnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objects: {}", self.total_objects())?;
        writeln!(f, "  A: {}", self.objects_a)?;
        writeln!(f, "  B: {}", self.objects_b)?;
        writeln!(f, "  C: {}", self.objects_c)?;
        write!(f, "Agents: {}", self.agents)
    }
}

/// Scatters the configured population over an empty board.
pub fn populate(sim: &mut Simulation) -> SimResult<SpawnSummary> {
    let population = sim.config.population.clone();
    let capacity = sim.grid.cell_count();

    let summary = SpawnSummary {
        objects_a: population.objects_a,
        objects_b: population.objects_b,
        objects_c: population.objects_c,
        agents: population.agents,
    };
    check_capacity("objects", summary.total_objects(), capacity)?;
    check_capacity("agents", summary.agents, capacity)?;

    let kinds = std::iter::repeat(ObjectKind::A)
        .take(population.objects_a)
        .chain(std::iter::repeat(ObjectKind::B).take(population.objects_b))
        .chain(std::iter::repeat(ObjectKind::C).take(population.objects_c));
    for (kind, position) in kinds.zip(shuffled_cells(sim)) {
        sim.place_object(kind, position)?;
    }

    for position in shuffled_cells(sim).into_iter().take(population.agents) {
        sim.spawn_agent(position)?;
    }

    tracing::info!(
        objects_a = summary.objects_a,
        objects_b = summary.objects_b,
        objects_c = summary.objects_c,
        agents = summary.agents,
        "populated {}x{} board",
        sim.width(),
        sim.height()
    );
    Ok(summary)
}

fn shuffled_cells(sim: &mut Simulation) -> Vec<Position> {
    let mut cells: Vec<Position> = sim.grid.positions().collect();
    cells.shuffle(&mut sim.rng.0);
    cells
}

fn check_capacity(what: &'static str, requested: usize, capacity: usize) -> SimResult<()> {
    if requested > capacity {
        return Err(SimError::Overpopulated {
            what,
            requested,
            capacity,
        });
    }
    Ok(())
}
