//! Pheromone Markers
//!
//! A marker is one signal spread over a fixed set of cells around the agent
//! that emitted it. All cells share the same strength; withdrawing the marker
//! clears it from every cell at once.

use colony_events::{AgentId, MarkerId, Position};
use std::collections::BTreeMap;

use crate::components::grid::{Grid, Occupant};
use crate::error::{SimError, SimResult};

/// A decaying call for help left by a waiting agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PheromoneMarker {
    pub id: MarkerId,
    /// Agent that emitted this marker and owns its decay
    pub emitter: AgentId,
    /// Emitter position at creation; not itself covered
    pub origin: Position,
    /// Every cell the marker was placed in
    pub cells: Vec<Position>,
    pub strength: u32,
}

impl PheromoneMarker {
    pub fn is_exhausted(&self) -> bool {
        self.strength == 0
    }

    /// Linking score seen from `distance` cells away:
    /// `strength - initial_strength / distance`. A distance of zero is treated
    /// as adjacent.
    pub fn attraction(&self, initial_strength: u32, distance: usize) -> f64 {
        let distance = distance.max(1) as f64;
        f64::from(self.strength) - f64::from(initial_strength) / distance
    }
}

/// Owner of every live marker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerStore {
    markers: BTreeMap<MarkerId, PheromoneMarker>,
    next_id: u64,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: MarkerId) -> Option<&PheromoneMarker> {
        self.markers.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PheromoneMarker> {
        self.markers.values()
    }

    /// Creates a marker on every in-bounds cell within `radius` of `origin`,
    /// excluding `origin` itself.
    pub fn emit(
        &mut self,
        grid: &mut Grid,
        emitter: AgentId,
        origin: Position,
        radius: usize,
        strength: u32,
    ) -> SimResult<MarkerId> {
        let id = MarkerId(self.next_id);
        self.next_id += 1;

        let cells: Vec<Position> = grid
            .neighborhood(origin, radius)
            .into_iter()
            .filter(|p| *p != origin)
            .collect();
        for cell in &cells {
            grid.place_at(Occupant::Marker(id), *cell)?;
        }

        self.markers.insert(
            id,
            PheromoneMarker {
                id,
                emitter,
                origin,
                cells,
                strength,
            },
        );
        Ok(id)
    }

    /// Withdraws a marker from all of its cells and forgets it.
    pub fn destroy(&mut self, grid: &mut Grid, id: MarkerId) -> SimResult<PheromoneMarker> {
        let marker = self.markers.remove(&id).ok_or(SimError::UnknownMarker(id))?;
        for cell in &marker.cells {
            grid.remove_from(Occupant::Marker(id), *cell)?;
        }
        Ok(marker)
    }

    /// Lowers a marker's strength by one, never below zero. Returns the new
    /// strength.
    pub fn weaken(&mut self, id: MarkerId) -> SimResult<u32> {
        let marker = self.markers.get_mut(&id).ok_or(SimError::UnknownMarker(id))?;
        marker.strength = marker.strength.saturating_sub(1);
        Ok(marker.strength)
    }
}
