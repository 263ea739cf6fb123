//! Object Kinds
//!
//! The labels carried by plain objects scattered on the grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind label of a plain object.
///
/// `A` and `B` are light and can be carried by a single agent. `C` is heavy
/// and needs two linked agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    A,
    B,
    C,
}

impl ObjectKind {
    /// Returns all object kinds.
    pub fn all() -> &'static [ObjectKind] {
        &[ObjectKind::A, ObjectKind::B, ObjectKind::C]
    }

    /// Whether this kind requires cooperative transport.
    pub fn is_heavy(self) -> bool {
        matches!(self, ObjectKind::C)
    }

    /// The other light kind, used when modelling perceptual confusion.
    /// Heavy objects are never confused with anything.
    pub fn confusable_with(self) -> Option<ObjectKind> {
        match self {
            ObjectKind::A => Some(ObjectKind::B),
            ObjectKind::B => Some(ObjectKind::A),
            ObjectKind::C => None,
        }
    }

    /// Single character used by text renderers.
    pub fn label(self) -> char {
        match self {
            ObjectKind::A => 'A',
            ObjectKind::B => 'B',
            ObjectKind::C => 'C',
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
