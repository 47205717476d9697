//! Domain events emitted by the record books, and the in-memory activity log
//! they are recorded into.

pub mod envelope;
pub mod event;
pub mod log;

pub use envelope::EventEnvelope;
pub use event::Event;
pub use log::{EventLog, EventLogError};
