//! Shared data types for the emergent sorting simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The core crate produces these values; a renderer or analysis tool
//! consumes them.

pub mod event;
pub mod ids;
pub mod kind;
pub mod position;
pub mod snapshot;

pub use event::{ColonyEvent, EventKind, EventType};
pub use ids::{AgentId, MarkerId};
pub use kind::ObjectKind;
pub use position::Position;
pub use snapshot::{CellSnapshot, GridSnapshot, OccupantSnapshot};
