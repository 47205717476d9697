//! Command execution against a book.
//!
//! ```text
//! Command
//!   ↓
//! 1. Handle command (pure decision logic, produces events)
//!   ↓
//! 2. Record events in the activity log
//!   ↓
//! 3. Apply events to the book
//! ```
//!
//! Events reach the book only after the log accepted them, so a command
//! rejected by either step leaves both the book and the log untouched.

use thiserror::Error;

use deskerp_core::{Aggregate, AggregateRoot, DomainError};
use deskerp_events::{EventLog, EventLogError};
use deskerp_settings::SettingsError;

use crate::event::WorkspaceEvent;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The book rejected the command (validation, not found, ...).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Recording into the activity log failed.
    #[error(transparent)]
    Log(#[from] EventLogError),

    /// A settings section could not be serialized for saving.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl WorkspaceError {
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            WorkspaceError::Domain(err) | WorkspaceError::Settings(SettingsError::Invalid(err)) => {
                Some(err)
            }
            WorkspaceError::Log(_) | WorkspaceError::Settings(_) => None,
        }
    }
}

/// Run `command` against `book` and record the produced events.
pub fn dispatch<A>(
    book: &mut A,
    log: &EventLog<WorkspaceEvent>,
    command: &A::Command,
    wrap: fn(A::Event) -> WorkspaceEvent,
) -> Result<Vec<A::Event>, WorkspaceError>
where
    A: Aggregate<Error = DomainError>,
{
    let events = book.handle(command)?;
    log.append(A::KIND, events.iter().cloned().map(wrap))?;
    for event in &events {
        book.apply(event);
    }
    tracing::debug!(book = A::KIND, version = book.version(), "command applied");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use chrono::Utc;
    use deskerp_core::RecordId;
    use deskerp_inventory::{AddItem, InventoryBook, InventoryCommand, ItemForm};

    use super::*;

    fn add_desk() -> InventoryCommand {
        InventoryCommand::AddItem(AddItem {
            item_id: RecordId::new(),
            form: ItemForm {
                name: "Standing Desk".to_string(),
                sku: "DSK-001".to_string(),
                category: "Furniture".to_string(),
                quantity: 4,
                min_stock: 2,
                price_cents: 45_000,
                description: String::new(),
            },
            occurred_at: Utc::now(),
        })
    }

    #[test]
    fn applied_command_lands_in_book_and_log() {
        let mut book = InventoryBook::new();
        let log = EventLog::new();

        let events = dispatch(&mut book, &log, &add_desk(), WorkspaceEvent::Inventory).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(book.len(), 1);
        assert_eq!(book.version(), 1);
        assert_eq!(log.len(), Ok(1));
    }

    #[test]
    fn unavailable_log_keeps_book_unchanged() {
        let mut book = InventoryBook::new();
        let log: EventLog<WorkspaceEvent> = EventLog::new();

        // A panic while the log holds its write lock poisons it.
        let poisoned = catch_unwind(AssertUnwindSafe(|| {
            let _ = log.append(
                "inventory",
                std::iter::from_fn(|| -> Option<WorkspaceEvent> { panic!("writer died") }),
            );
        }));
        assert!(poisoned.is_err());

        let err = dispatch(&mut book, &log, &add_desk(), WorkspaceEvent::Inventory).unwrap_err();

        assert!(matches!(err, WorkspaceError::Log(EventLogError::Poisoned)));
        assert!(book.is_empty());
        assert_eq!(book.version(), 0);
    }
}
