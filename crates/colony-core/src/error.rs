//! Error Types
//!
//! Out-of-bounds move attempts are not errors: the grid reports them as
//! "no move" and the random walk tries another direction. Everything here is
//! fatal to a run and propagates out of `Simulation::tick`.

use colony_events::{AgentId, MarkerId, ObjectKind, Position};
use thiserror::Error;

use crate::components::grid::Occupant;
use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum SimError {
    /// A cell holds two different object kinds at once.
    #[error("cell {position} holds both {first} and {second}")]
    ConsistencyViolation {
        position: Position,
        first: ObjectKind,
        second: ObjectKind,
    },

    /// Removal of an occupant that is not in the cell.
    #[error("{occupant:?} is not present at {position}")]
    MissingOccupant {
        occupant: Occupant,
        position: Position,
    },

    /// Placement outside the grid.
    #[error("position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: usize, y: usize },

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("unknown marker {0}")]
    UnknownMarker(MarkerId),

    /// More entities requested than cells available to scatter them on.
    #[error("cannot place {requested} {what} on {capacity} cells")]
    Overpopulated {
        what: &'static str,
        requested: usize,
        capacity: usize,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type SimResult<T> = Result<T, SimError>;
