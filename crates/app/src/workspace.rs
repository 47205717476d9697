use chrono::{DateTime, NaiveDate, Utc};

use deskerp_core::{RecordFilter, RecordId};
use deskerp_events::{EventEnvelope, EventLog};
use deskerp_inventory::{
    AddItem, InventoryBook, InventoryCommand, InventoryItem, ItemForm, RemoveItem, UpdateItem,
};
use deskerp_reports::{CsvExport, ReportKind, ReportSelection, TransactionLedger};
use deskerp_sales::{
    Order, OrderBook, OrderCommand, OrderForm, PlaceOrder, RemoveOrder, UpdateOrder,
};
use deskerp_settings::{SettingChange, Settings, SettingsSection};
use deskerp_users::{AddUser, RemoveUser, UpdateUser, User, UserCommand, UserDirectory, UserForm};

use crate::dashboard::DashboardSummary;
use crate::dispatch::{WorkspaceError, dispatch};
use crate::event::WorkspaceEvent;
use crate::seed;
use crate::sheets::{CustomerSheet, InventorySheet, SalesSheet};

/// All dashboard state for one session.
///
/// Nothing is persisted: dropping the workspace discards every record.
#[derive(Debug, Default)]
pub struct Workspace {
    inventory: InventoryBook,
    orders: OrderBook,
    users: UserDirectory,
    ledger: TransactionLedger,
    settings: Settings,
    activity: EventLog<WorkspaceEvent>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// A workspace pre-filled with the demo records.
    pub fn seeded() -> Result<Self, WorkspaceError> {
        let mut workspace = Self::new();
        let stocked_at = seed::at(2024, 1, 10)?;

        for form in seed::inventory() {
            workspace.add_item(form, stocked_at)?;
        }
        for (form, placed_at) in seed::orders()? {
            workspace.place_order(form, placed_at)?;
        }
        for (form, created_at) in seed::users()? {
            workspace.add_user(form, created_at)?;
        }
        workspace.ledger = TransactionLedger::new(seed::transactions()?);

        tracing::info!(
            items = workspace.inventory.len(),
            orders = workspace.orders.len(),
            users = workspace.users.len(),
            "workspace seeded"
        );
        Ok(workspace)
    }

    pub fn inventory(&self) -> &InventoryBook {
        &self.inventory
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The `limit` most recent activity entries, newest first.
    pub fn recent_activity(
        &self,
        limit: usize,
    ) -> Result<Vec<EventEnvelope<WorkspaceEvent>>, WorkspaceError> {
        Ok(self.activity.latest(limit)?)
    }

    pub fn activity_len(&self) -> Result<usize, WorkspaceError> {
        Ok(self.activity.len()?)
    }

    // Inventory screen.

    pub fn add_item(
        &mut self,
        form: ItemForm,
        at: DateTime<Utc>,
    ) -> Result<RecordId, WorkspaceError> {
        let item_id = RecordId::new();
        let command = InventoryCommand::AddItem(AddItem {
            item_id,
            form,
            occurred_at: at,
        });
        dispatch(&mut self.inventory, &self.activity, &command, WorkspaceEvent::Inventory)?;
        Ok(item_id)
    }

    pub fn update_item(
        &mut self,
        item_id: RecordId,
        form: ItemForm,
        at: DateTime<Utc>,
    ) -> Result<(), WorkspaceError> {
        let command = InventoryCommand::UpdateItem(UpdateItem {
            item_id,
            form,
            occurred_at: at,
        });
        dispatch(&mut self.inventory, &self.activity, &command, WorkspaceEvent::Inventory)?;
        Ok(())
    }

    pub fn remove_item(
        &mut self,
        item_id: RecordId,
        at: DateTime<Utc>,
    ) -> Result<(), WorkspaceError> {
        let command = InventoryCommand::RemoveItem(RemoveItem {
            item_id,
            occurred_at: at,
        });
        dispatch(&mut self.inventory, &self.activity, &command, WorkspaceEvent::Inventory)?;
        Ok(())
    }

    pub fn search_items(&self, filter: &RecordFilter) -> Vec<&InventoryItem> {
        self.inventory.filtered(filter)
    }

    // Orders screen.

    pub fn place_order(
        &mut self,
        form: OrderForm,
        at: DateTime<Utc>,
    ) -> Result<RecordId, WorkspaceError> {
        let order_id = RecordId::new();
        let command = OrderCommand::PlaceOrder(PlaceOrder {
            order_id,
            form,
            occurred_at: at,
        });
        dispatch(&mut self.orders, &self.activity, &command, WorkspaceEvent::Orders)?;
        Ok(order_id)
    }

    pub fn update_order(
        &mut self,
        order_id: RecordId,
        form: OrderForm,
        at: DateTime<Utc>,
    ) -> Result<(), WorkspaceError> {
        let command = OrderCommand::UpdateOrder(UpdateOrder {
            order_id,
            form,
            occurred_at: at,
        });
        dispatch(&mut self.orders, &self.activity, &command, WorkspaceEvent::Orders)?;
        Ok(())
    }

    pub fn remove_order(
        &mut self,
        order_id: RecordId,
        at: DateTime<Utc>,
    ) -> Result<(), WorkspaceError> {
        let command = OrderCommand::RemoveOrder(RemoveOrder {
            order_id,
            occurred_at: at,
        });
        dispatch(&mut self.orders, &self.activity, &command, WorkspaceEvent::Orders)?;
        Ok(())
    }

    pub fn search_orders(&self, filter: &RecordFilter) -> Vec<&Order> {
        self.orders.filtered(filter)
    }

    // Users screen.

    pub fn add_user(
        &mut self,
        form: UserForm,
        at: DateTime<Utc>,
    ) -> Result<RecordId, WorkspaceError> {
        let user_id = RecordId::new();
        let command = UserCommand::AddUser(AddUser {
            user_id,
            form,
            occurred_at: at,
        });
        dispatch(&mut self.users, &self.activity, &command, WorkspaceEvent::Users)?;
        Ok(user_id)
    }

    pub fn update_user(
        &mut self,
        user_id: RecordId,
        form: UserForm,
        at: DateTime<Utc>,
    ) -> Result<(), WorkspaceError> {
        let command = UserCommand::UpdateUser(UpdateUser {
            user_id,
            form,
            occurred_at: at,
        });
        dispatch(&mut self.users, &self.activity, &command, WorkspaceEvent::Users)?;
        Ok(())
    }

    pub fn remove_user(
        &mut self,
        user_id: RecordId,
        at: DateTime<Utc>,
    ) -> Result<(), WorkspaceError> {
        let command = UserCommand::RemoveUser(RemoveUser {
            user_id,
            occurred_at: at,
        });
        dispatch(&mut self.users, &self.activity, &command, WorkspaceEvent::Users)?;
        Ok(())
    }

    pub fn search_users(&self, filter: &RecordFilter) -> Vec<&User> {
        self.users.filtered(filter)
    }

    // Settings and reports.

    pub fn change_setting(&mut self, change: SettingChange) -> Result<(), WorkspaceError> {
        let section = change.section();
        self.settings.apply(change)?;
        tracing::debug!(section = section.name(), "setting changed");
        Ok(())
    }

    /// Serialize one section for the settings screen's save button.
    pub fn save_settings(&self, section: SettingsSection) -> Result<String, WorkspaceError> {
        Ok(self.settings.save_section(section)?)
    }

    pub fn export_report(&self, selection: ReportSelection, generated_on: NaiveDate) -> CsvExport {
        match selection.kind {
            ReportKind::Sales => {
                CsvExport::build(selection, generated_on, &SalesSheet(&self.orders))
            }
            ReportKind::Inventory => {
                CsvExport::build(selection, generated_on, &InventorySheet(&self.inventory))
            }
            ReportKind::Financial => CsvExport::build(selection, generated_on, &self.ledger),
            ReportKind::Customer => {
                CsvExport::build(selection, generated_on, &CustomerSheet(&self.orders))
            }
        }
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::collect(self)
    }
}
