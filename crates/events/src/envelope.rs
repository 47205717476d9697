use serde::{Deserialize, Serialize};
use uuid::Uuid;

use deskerp_core::RecordId;

/// Envelope for an event, containing book + ordering metadata.
///
/// Notes:
/// - `book` names the aggregate that produced the event (e.g. "orders").
/// - **Append-only**: `sequence_number` increases monotonically per log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    book: String,
    record_id: RecordId,

    /// Position in the activity log, starting at 1.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        book: impl Into<String>,
        record_id: RecordId,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            book: book.into(),
            record_id,
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn book(&self) -> &str {
        &self.book
    }

    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}
