use chrono::{DateTime, Utc};

use deskerp_core::RecordId;

/// Something that happened to a record, as shown in the activity log.
///
/// Events are recorded once and never edited. `event_type` names are
/// `"<book>.<record>.<past-tense verb>"`, e.g. `"inventory.item.added"`.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;

    /// Payload schema version; bump when the event's fields change.
    fn version(&self) -> u32;

    /// Business time of the edit that produced the event.
    fn occurred_at(&self) -> DateTime<Utc>;

    /// The record the event is about.
    fn record_id(&self) -> RecordId;
}
