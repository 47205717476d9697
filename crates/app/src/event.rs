//! Events from every book, as recorded in the workspace activity log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deskerp_core::RecordId;
use deskerp_events::Event;
use deskerp_inventory::InventoryEvent;
use deskerp_sales::OrderEvent;
use deskerp_users::UserEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkspaceEvent {
    Inventory(InventoryEvent),
    Orders(OrderEvent),
    Users(UserEvent),
}

impl Event for WorkspaceEvent {
    fn event_type(&self) -> &'static str {
        match self {
            WorkspaceEvent::Inventory(e) => e.event_type(),
            WorkspaceEvent::Orders(e) => e.event_type(),
            WorkspaceEvent::Users(e) => e.event_type(),
        }
    }

    fn version(&self) -> u32 {
        match self {
            WorkspaceEvent::Inventory(e) => e.version(),
            WorkspaceEvent::Orders(e) => e.version(),
            WorkspaceEvent::Users(e) => e.version(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            WorkspaceEvent::Inventory(e) => e.occurred_at(),
            WorkspaceEvent::Orders(e) => e.occurred_at(),
            WorkspaceEvent::Users(e) => e.occurred_at(),
        }
    }

    fn record_id(&self) -> RecordId {
        match self {
            WorkspaceEvent::Inventory(e) => e.record_id(),
            WorkspaceEvent::Orders(e) => e.record_id(),
            WorkspaceEvent::Users(e) => e.record_id(),
        }
    }
}
