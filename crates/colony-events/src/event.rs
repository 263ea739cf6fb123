//! Event Types
//!
//! Behavioral events recorded while a tick runs. Movement is not recorded;
//! only the decisions that change what agents carry or how they coordinate.

use serde::{Deserialize, Serialize};

use crate::{AgentId, MarkerId, ObjectKind, Position};

/// Primary event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PickedUp,
    Dropped,
    StartedWaiting,
    MarkerRefreshed,
    GaveUp,
    Linked,
    Released,
}

impl EventType {
    /// Returns all event type variants.
    pub fn all() -> &'static [EventType] {
        &[
            EventType::PickedUp,
            EventType::Dropped,
            EventType::StartedWaiting,
            EventType::MarkerRefreshed,
            EventType::GaveUp,
            EventType::Linked,
            EventType::Released,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::PickedUp => "picked_up",
            EventType::Dropped => "dropped",
            EventType::StartedWaiting => "started_waiting",
            EventType::MarkerRefreshed => "marker_refreshed",
            EventType::GaveUp => "gave_up",
            EventType::Linked => "linked",
            EventType::Released => "released",
        }
    }
}

/// What happened, with the data specific to each category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Agent lifted an object off its cell
    PickedUp { object: ObjectKind, position: Position },
    /// Agent put its object down on an empty cell
    Dropped { object: ObjectKind, position: Position },
    /// Agent found a heavy object and started calling for help
    StartedWaiting { position: Position, marker: MarkerId },
    /// Marker decayed to zero and was re-emitted at full strength
    MarkerRefreshed { old: MarkerId, new: MarkerId },
    /// Marker decayed to zero and the agent stopped waiting
    GaveUp { marker: MarkerId },
    /// Agent answered a marker and joined the emitter
    Linked {
        partner: AgentId,
        marker: MarkerId,
        distance: usize,
        strength: u32,
    },
    /// Pair finished a heavy transport and separated
    Released { partner: AgentId },
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::PickedUp { .. } => EventType::PickedUp,
            EventKind::Dropped { .. } => EventType::Dropped,
            EventKind::StartedWaiting { .. } => EventType::StartedWaiting,
            EventKind::MarkerRefreshed { .. } => EventType::MarkerRefreshed,
            EventKind::GaveUp { .. } => EventType::GaveUp,
            EventKind::Linked { .. } => EventType::Linked,
            EventKind::Released { .. } => EventType::Released,
        }
    }
}

/// A single recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonyEvent {
    pub tick: u64,
    pub agent: AgentId,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl ColonyEvent {
    pub fn new(tick: u64, agent: AgentId, kind: EventKind) -> Self {
        Self { tick, agent, kind }
    }

    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_mapping() {
        let event = ColonyEvent::new(
            3,
            AgentId(1),
            EventKind::PickedUp {
                object: ObjectKind::A,
                position: Position::new(0, 1),
            },
        );
        assert_eq!(event.event_type(), EventType::PickedUp);
        assert_eq!(event.event_type().as_str(), "picked_up");
    }

    #[test]
    fn test_event_serializes_flat_with_tag() {
        let event = ColonyEvent::new(
            12,
            AgentId(4),
            EventKind::Linked {
                partner: AgentId(2),
                marker: MarkerId(9),
                distance: 2,
                strength: 100,
            },
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "linked");
        assert_eq!(json["tick"], 12);
        assert_eq!(json["agent"], 4);
        assert_eq!(json["partner"], 2);

        let back: ColonyEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_all_types_have_names() {
        for t in EventType::all() {
            assert!(!t.as_str().is_empty());
        }
        assert_eq!(EventType::all().len(), 7);
    }
}
