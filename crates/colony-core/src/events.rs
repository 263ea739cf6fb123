//! Event Recording
//!
//! Buffer of behavioral events produced while ticks run. Every recorded event
//! is also logged at debug level.

use colony_events::{AgentId, ColonyEvent, EventKind};

#[derive(Debug, Clone, Default)]
pub struct TickEvents {
    events: Vec<ColonyEvent>,
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: u64, agent: AgentId, kind: EventKind) {
        tracing::debug!(tick, %agent, event = kind.event_type().as_str(), ?kind);
        self.events.push(ColonyEvent::new(tick, agent, kind));
    }

    pub fn as_slice(&self) -> &[ColonyEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<ColonyEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
