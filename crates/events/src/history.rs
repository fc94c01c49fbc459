//! Append-only, in-process record of applied events.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Event;

/// One applied event and its position in the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedEvent<E> {
    /// 1-based, gap-free.
    pub sequence: u64,
    pub event_type: &'static str,
    pub occurred_at: DateTime<Utc>,
    pub payload: E,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventHistory<E> {
    entries: Vec<RecordedEvent<E>>,
}

impl<E> Default for EventHistory<E> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<E: Event> EventHistory<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event` and return its sequence number.
    pub fn record(&mut self, event: E) -> u64 {
        let sequence = self.last_sequence() + 1;
        self.entries.push(RecordedEvent {
            sequence,
            event_type: event.event_type(),
            occurred_at: event.occurred_at(),
            payload: event,
        });
        sequence
    }

    pub fn last_sequence(&self) -> u64 {
        self.entries.last().map_or(0, |e| e.sequence)
    }

    pub fn entries(&self) -> &[RecordedEvent<E>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
