//! Recording implementation of the [`MessageEventPublisher`] port.

use std::sync::{Arc, RwLock};

use crate::chat::{
    error::EventError,
    ports::events::{EventResult, MessageEvent, MessageEventPublisher},
};

/// Event publisher that records every published event for inspection.
#[derive(Debug, Default, Clone)]
pub struct RecordingEventPublisher {
    events: Arc<RwLock<Vec<MessageEvent>>>,
}

impl RecordingEventPublisher {
    /// Creates a publisher with an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the published events, in publish order.
    ///
    /// Returns an empty vector if the internal lock is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<MessageEvent> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl MessageEventPublisher for RecordingEventPublisher {
    fn publish(&self, event: &MessageEvent) -> EventResult<()> {
        let mut events = self
            .events
            .write()
            .map_err(|e| EventError::PublishFailed(format!("lock poisoned: {e}")))?;
        events.push(event.clone());
        Ok(())
    }
}
