//! Grid Component
//!
//! A `width x height` board where every cell is an unordered multiset of
//! occupants. Cells only index what is where; agent and marker state lives in
//! the driver's tables and is looked up by id.

use colony_events::{AgentId, MarkerId, ObjectKind, Position};
use serde::{Deserialize, Serialize};

use crate::components::agent::Agent;
use crate::error::{SimError, SimResult};

/// Something that can sit in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Object(ObjectKind),
    Agent(AgentId),
    Marker(MarkerId),
}

impl Occupant {
    pub fn object_kind(&self) -> Option<ObjectKind> {
        match self {
            Occupant::Object(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// The board. Insertion order inside a cell is kept so that iteration is
/// reproducible, but no rule depends on it beyond that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Occupant>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Vec::new(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// All positions, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Position::new(x, y)))
    }

    fn index(&self, position: Position) -> SimResult<usize> {
        if self.contains(position) {
            Ok(position.x * self.height + position.y)
        } else {
            Err(SimError::OutOfBounds {
                x: position.x,
                y: position.y,
            })
        }
    }

    /// Adds an occupant to a cell.
    ///
    /// Objects are checked eagerly: placing a kind on a cell that already holds
    /// a different kind is a consistency violation and leaves the cell as is.
    pub fn place_at(&mut self, occupant: Occupant, position: Position) -> SimResult<()> {
        let index = self.index(position)?;
        if let Occupant::Object(kind) = occupant {
            if let Some(existing) = kind_conflict(&self.cells[index], kind) {
                return Err(SimError::ConsistencyViolation {
                    position,
                    first: existing,
                    second: kind,
                });
            }
        }
        self.cells[index].push(occupant);
        Ok(())
    }

    /// Removes one matching entry from a cell.
    pub fn remove_from(&mut self, occupant: Occupant, position: Position) -> SimResult<()> {
        let index = self.index(position)?;
        let cell = &mut self.cells[index];
        match cell.iter().position(|o| *o == occupant) {
            Some(slot) => {
                cell.remove(slot);
                Ok(())
            }
            None => Err(SimError::MissingOccupant { occupant, position }),
        }
    }

    /// Contents of a cell for perception, after checking that it holds at most
    /// one object kind.
    pub fn contents_at(&self, position: Position) -> SimResult<&[Occupant]> {
        let index = self.index(position)?;
        let cell = &self.cells[index];
        let mut seen: Option<ObjectKind> = None;
        for kind in cell.iter().filter_map(Occupant::object_kind) {
            match seen {
                Some(first) if first != kind => {
                    return Err(SimError::ConsistencyViolation {
                        position,
                        first,
                        second: kind,
                    })
                }
                _ => seen = Some(kind),
            }
        }
        Ok(cell)
    }

    /// Raw contents without the consistency check; empty outside the grid.
    pub fn occupants(&self, position: Position) -> &[Occupant] {
        match self.index(position) {
            Ok(index) => &self.cells[index],
            Err(_) => &[],
        }
    }

    /// The object kind lying on a cell, if any.
    pub fn object_at(&self, position: Position) -> SimResult<Option<ObjectKind>> {
        Ok(self
            .contents_at(position)?
            .iter()
            .find_map(Occupant::object_kind))
    }

    /// True if any agent in the cell is waiting for a transport partner.
    pub fn is_occupied_by_waiting_agent(&self, position: Position, agents: &[Agent]) -> bool {
        self.occupants(position).iter().any(|o| match o {
            Occupant::Agent(id) => agents.get(id.index()).is_some_and(|a| a.waiting),
            _ => false,
        })
    }

    /// In-bounds cells within Chebyshev distance `radius` of `center`,
    /// including the center itself.
    pub fn neighborhood(&self, center: Position, radius: usize) -> Vec<Position> {
        let x_end = center.x.saturating_add(radius).min(self.width - 1);
        let y_end = center.y.saturating_add(radius).min(self.height - 1);
        let x_range = center.x.saturating_sub(radius)..=x_end;
        let y_range = center.y.saturating_sub(radius)..=y_end;
        x_range
            .flat_map(|x| y_range.clone().map(move |y| Position::new(x, y)))
            .collect()
    }

    /// Target of a signed offset, or `None` if it leaves the grid.
    pub fn translate(&self, from: Position, dx: isize, dy: isize) -> Option<Position> {
        from.offset(dx, dy).filter(|p| self.contains(*p))
    }

    /// Moves an occupant by an offset.
    ///
    /// Returns `Ok(None)` without touching anything when the target is out of
    /// bounds; otherwise removes from `from`, places at the target, and
    /// returns it.
    pub fn try_move(
        &mut self,
        occupant: Occupant,
        from: Position,
        dx: isize,
        dy: isize,
    ) -> SimResult<Option<Position>> {
        let Some(to) = self.translate(from, dx, dy) else {
            return Ok(None);
        };
        self.relocate(occupant, from, to)?;
        Ok(Some(to))
    }

    /// Moves an occupant between two in-bounds cells.
    pub fn relocate(&mut self, occupant: Occupant, from: Position, to: Position) -> SimResult<()> {
        self.index(to)?;
        self.remove_from(occupant, from)?;
        self.place_at(occupant, to)
    }
}

fn kind_conflict(cell: &[Occupant], kind: ObjectKind) -> Option<ObjectKind> {
    cell.iter()
        .filter_map(Occupant::object_kind)
        .find(|existing| *existing != kind)
}
