//! Agent Components
//!
//! Per-agent state: perceptual memory, carried object, and the cooperative
//! transport fields. Partner and marker references are plain ids resolved
//! through the driver's tables.

use colony_events::{AgentId, MarkerId, ObjectKind, Position};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What an agent reads off its cell in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Percept {
    Object(ObjectKind),
    Marker(MarkerId),
    Empty,
}

impl Percept {
    pub fn object(self) -> Option<ObjectKind> {
        match self {
            Percept::Object(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Most-recent-first record of percepts, capped at a fixed length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    entries: VecDeque<Percept>,
    capacity: usize,
}

impl Memory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Prepends a percept and drops the oldest entries past capacity.
    pub fn remember(&mut self, percept: Percept) {
        self.entries.push_front(percept);
        self.entries.truncate(self.capacity);
    }

    /// The latest percept.
    pub fn head(&self) -> Option<Percept> {
        self.entries.front().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Percept> {
        self.entries.iter()
    }

    fn count(&self, percept: Percept) -> usize {
        self.entries.iter().filter(|p| **p == percept).count()
    }

    /// Fraction of remembered percepts equal to the latest one. Zero when
    /// nothing has been perceived yet.
    pub fn density(&self) -> f64 {
        match self.head() {
            Some(head) => self.count(head) as f64 / self.entries.len() as f64,
            None => 0.0,
        }
    }

    /// Like `density`, but each remembered percept of the other light kind
    /// counts as a match with weight `error_rate`.
    pub fn density_with_error(&self, error_rate: f64) -> f64 {
        let Some(head) = self.head() else {
            return 0.0;
        };
        let same = self.count(head) as f64;
        let confused = head
            .object()
            .and_then(ObjectKind::confusable_with)
            .map(|other| self.count(Percept::Object(other)) as f64)
            .unwrap_or(0.0);
        (same + error_rate * confused) / self.entries.len() as f64
    }
}

/// A sorting agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub id: AgentId,
    /// Mirror of the grid index, updated by every move
    pub position: Position,
    pub memory: Memory,
    pub carried: Option<ObjectKind>,
    /// Stalled on a heavy object until a partner arrives or it gives up
    pub waiting: bool,
    /// Marker this agent currently maintains
    pub pheromone: Option<MarkerId>,
    /// Agent it is paired with for a heavy transport
    pub linked: Option<AgentId>,
}

impl Agent {
    pub fn new(id: AgentId, position: Position, memory_capacity: usize) -> Self {
        Self {
            id,
            position,
            memory: Memory::new(memory_capacity),
            carried: None,
            waiting: false,
            pheromone: None,
            linked: None,
        }
    }

    /// Not carrying, not paired, not waiting.
    pub fn is_free(&self) -> bool {
        self.carried.is_none() && self.linked.is_none() && !self.waiting
    }

    pub fn is_carrying(&self) -> bool {
        self.carried.is_some()
    }
}
