//! Snapshot Types
//!
//! Serialization structs describing the contents of every cell at a point in
//! time. A renderer only needs these to draw a frame.

use serde::{Deserialize, Serialize};

use crate::{AgentId, MarkerId, ObjectKind, Position};

/// One occupant of a cell, with a stable kind discriminator for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OccupantSnapshot {
    Object {
        object: ObjectKind,
    },
    Agent {
        id: AgentId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        carrying: Option<ObjectKind>,
        #[serde(default)]
        waiting: bool,
        #[serde(default)]
        linked: bool,
    },
    Marker {
        id: MarkerId,
        emitter: AgentId,
        strength: u32,
    },
}

impl OccupantSnapshot {
    /// Short text form: object label, `*` plus carried label for agents,
    /// `P` for markers.
    pub fn glyph(&self) -> String {
        match self {
            OccupantSnapshot::Object { object } => object.label().to_string(),
            OccupantSnapshot::Agent { carrying, .. } => match carrying {
                Some(kind) => format!("*{}", kind.label()),
                None => "*".to_string(),
            },
            OccupantSnapshot::Marker { .. } => "P".to_string(),
        }
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub position: Position,
    pub occupants: Vec<OccupantSnapshot>,
}

impl CellSnapshot {
    pub fn object(&self) -> Option<ObjectKind> {
        self.occupants.iter().find_map(|o| match o {
            OccupantSnapshot::Object { object } => Some(*object),
            _ => None,
        })
    }

    pub fn has_agent(&self) -> bool {
        self.occupants
            .iter()
            .any(|o| matches!(o, OccupantSnapshot::Agent { .. }))
    }

    pub fn has_marker(&self) -> bool {
        self.occupants
            .iter()
            .any(|o| matches!(o, OccupantSnapshot::Marker { .. }))
    }
}

/// Full board state. Only non-empty cells are listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub tick: u64,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub cells: Vec<CellSnapshot>,
}

impl GridSnapshot {
    pub fn new(tick: u64, width: usize, height: usize) -> Self {
        Self {
            tick,
            width,
            height,
            cells: Vec::new(),
        }
    }

    /// Finds the cell at a position, if it had any occupant.
    pub fn cell(&self, position: Position) -> Option<&CellSnapshot> {
        self.cells.iter().find(|c| c.position == position)
    }

    /// Number of objects of a kind lying on the board.
    pub fn count_objects(&self, kind: ObjectKind) -> usize {
        self.cells
            .iter()
            .flat_map(|c| c.occupants.iter())
            .filter(|o| matches!(o, OccupantSnapshot::Object { object } if *object == kind))
            .count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
