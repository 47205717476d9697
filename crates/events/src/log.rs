//! In-memory append-only activity log.

use std::sync::RwLock;

use thiserror::Error;
use uuid::Uuid;

use crate::envelope::EventEnvelope;
use crate::event::Event;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventLogError {
    /// Append/read failed due to internal lock poisoning.
    #[error("event log lock poisoned")]
    Poisoned,
}

/// In-memory append-only event log.
///
/// Lives as long as the owning workspace; nothing is persisted.
#[derive(Debug)]
pub struct EventLog<E> {
    entries: RwLock<Vec<EventEnvelope<E>>>,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

impl<E> EventLog<E>
where
    E: Event,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Append events produced by `book`, assigning consecutive sequence numbers.
    pub fn append(
        &self,
        book: &str,
        events: impl IntoIterator<Item = E>,
    ) -> Result<Vec<EventEnvelope<E>>, EventLogError> {
        let mut entries = self.entries.write().map_err(|_| EventLogError::Poisoned)?;
        let mut appended = Vec::new();

        for payload in events {
            let sequence_number = entries.len() as u64 + 1;
            tracing::debug!(
                book,
                event_type = payload.event_type(),
                sequence_number,
                "event recorded"
            );
            let envelope = EventEnvelope::new(
                Uuid::now_v7(),
                book,
                payload.record_id(),
                sequence_number,
                payload,
            );
            entries.push(envelope.clone());
            appended.push(envelope);
        }

        Ok(appended)
    }

    /// Full log in append order.
    pub fn entries(&self) -> Result<Vec<EventEnvelope<E>>, EventLogError> {
        let entries = self.entries.read().map_err(|_| EventLogError::Poisoned)?;
        Ok(entries.clone())
    }

    /// The `limit` most recent entries, newest first.
    pub fn latest(&self, limit: usize) -> Result<Vec<EventEnvelope<E>>, EventLogError> {
        let entries = self.entries.read().map_err(|_| EventLogError::Poisoned)?;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }

    pub fn len(&self) -> Result<usize, EventLogError> {
        let entries = self.entries.read().map_err(|_| EventLogError::Poisoned)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, EventLogError> {
        Ok(self.len()? == 0)
    }
}
