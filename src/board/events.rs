//! Unit lifecycle events.
//!
//! The core never owns presentation handles. Instead, every mutation that
//! creates, moves, or removes a unit reports a [`GameEvent`] to an
//! [`EventSink`], and the presentation layer maintains its own id-indexed
//! handle table from the stream.

use super::geometry::FaceId;
use super::unit::UnitId;

/// A unit lifecycle notification emitted by the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    UnitCreated { unit: UnitId, face: FaceId },
    UnitMoved { unit: UnitId, from: FaceId, to: FaceId },
    UnitRemoved { unit: UnitId, face: FaceId },
}

/// Receiver for unit lifecycle events.
pub trait EventSink {
    fn handle(&mut self, event: GameEvent);
}

/// Sink that records events in order, for tests and polling consumers.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> EventLog {
        EventLog::default()
    }

    /// Returns and clears the accumulated events.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the accumulated events without clearing.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

impl EventSink for EventLog {
    fn handle(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Sink that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn handle(&mut self, _event: GameEvent) {}
}
