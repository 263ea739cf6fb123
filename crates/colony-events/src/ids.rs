//! Identifier Types
//!
//! Stable numeric handles for agents and pheromone markers. Cells store these
//! handles instead of the entities themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an agent in the driver's agent table.
///
/// Assigned in spawn order and never reused during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub usize);

impl AgentId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{:04}", self.0)
    }
}

/// Handle of a pheromone marker.
///
/// Marker ids are handed out monotonically, so a stale id held in an agent's
/// memory never aliases a newer marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker_{:06}", self.0)
    }
}
