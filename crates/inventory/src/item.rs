use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deskerp_core::{
    Aggregate, AggregateRoot, DomainError, Entity, RecordFilter, RecordId, Searchable, locate,
    lookup,
    error::require_non_blank,
};
use deskerp_events::Event;

use crate::status::{StockStatus, resolve};

/// Values captured by the add/edit item dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemForm {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub quantity: i64,
    pub min_stock: i64,
    /// Price in smallest currency unit (e.g., cents).
    pub price_cents: u64,
    pub description: String,
}

impl ItemForm {
    fn validate(&self) -> Result<(), DomainError> {
        require_non_blank("name", &self.name)?;
        require_non_blank("sku", &self.sku)?;
        if self.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if self.min_stock < 0 {
            return Err(DomainError::validation("min stock cannot be negative"));
        }
        Ok(())
    }
}

/// An inventory item as listed on the inventory screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: RecordId,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub quantity: i64,
    pub min_stock: i64,
    pub price_cents: u64,
    pub description: String,
    pub status: StockStatus,
}

impl InventoryItem {
    /// Build an item from a submitted form, deriving its status.
    pub fn from_form(id: RecordId, form: ItemForm) -> Self {
        let status = resolve(form.quantity, form.min_stock);
        Self {
            id,
            name: form.name,
            sku: form.sku,
            category: form.category,
            quantity: form.quantity,
            min_stock: form.min_stock,
            price_cents: form.price_cents,
            description: form.description,
            status,
        }
    }

    /// Pre-fill the edit dialog.
    pub fn to_form(&self) -> ItemForm {
        ItemForm {
            name: self.name.clone(),
            sku: self.sku.clone(),
            category: self.category.clone(),
            quantity: self.quantity,
            min_stock: self.min_stock,
            price_cents: self.price_cents,
            description: self.description.clone(),
        }
    }

    /// Stock value at list price, in cents.
    pub fn stock_value_cents(&self) -> u64 {
        u64::try_from(self.quantity)
            .unwrap_or(0)
            .saturating_mul(self.price_cents)
    }
}

impl Entity for InventoryItem {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Searchable for InventoryItem {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.sku.as_str()),
            Cow::Borrowed(self.category.as_str()),
        ]
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub item_id: RecordId,
    pub form: ItemForm,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItem {
    pub item_id: RecordId,
    pub form: ItemForm,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub item_id: RecordId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    AddItem(AddItem),
    UpdateItem(UpdateItem),
    RemoveItem(RemoveItem),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub item: InventoryItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemUpdated. Carries the full replacement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdated {
    pub item: InventoryItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub item_id: RecordId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemAdded(ItemAdded),
    ItemUpdated(ItemUpdated),
    ItemRemoved(ItemRemoved),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemAdded(_) => "inventory.item.added",
            InventoryEvent::ItemUpdated(_) => "inventory.item.updated",
            InventoryEvent::ItemRemoved(_) => "inventory.item.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemAdded(e) => e.occurred_at,
            InventoryEvent::ItemUpdated(e) => e.occurred_at,
            InventoryEvent::ItemRemoved(e) => e.occurred_at,
        }
    }

    fn record_id(&self) -> RecordId {
        match self {
            InventoryEvent::ItemAdded(e) => e.item.id,
            InventoryEvent::ItemUpdated(e) => e.item.id,
            InventoryEvent::ItemRemoved(e) => e.item_id,
        }
    }
}

/// Summary cards on the inventory screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl StatusCounts {
    pub fn count(&self, status: StockStatus) -> usize {
        match status {
            StockStatus::InStock => self.in_stock,
            StockStatus::LowStock => self.low_stock,
            StockStatus::OutOfStock => self.out_of_stock,
        }
    }
}

/// An item that needs restocking, with how full its stock is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockAlert {
    pub item_id: RecordId,
    pub name: String,
    pub quantity: i64,
    pub min_stock: i64,
    /// `quantity / min_stock` as a percentage, clamped to 0..=100.
    pub fill_percent: u8,
}

impl RestockAlert {
    fn for_item(item: &InventoryItem) -> Self {
        let fill_percent = if item.min_stock <= 0 {
            0
        } else {
            let filled = i128::from(item.quantity.clamp(0, item.min_stock));
            u8::try_from(filled * 100 / i128::from(item.min_stock)).unwrap_or(100)
        };
        Self {
            item_id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
            min_stock: item.min_stock,
            fill_percent,
        }
    }
}

/// Aggregate: the inventory screen's item list.
///
/// # Invariants
/// - Item ids are unique.
/// - Every item's `status` equals `resolve(quantity, min_stock)`.
/// - Items keep insertion order; updates replace in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryBook {
    items: Vec<InventoryItem>,
    version: u64,
}

impl InventoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn get(&self, item_id: RecordId) -> Option<&InventoryItem> {
        lookup(&self.items, item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.items
            .iter()
            .fold(StatusCounts::default(), |mut counts, item| {
                counts.total += 1;
                match item.status {
                    StockStatus::InStock => counts.in_stock += 1,
                    StockStatus::LowStock => counts.low_stock += 1,
                    StockStatus::OutOfStock => counts.out_of_stock += 1,
                }
                counts
            })
    }

    /// Items needing restock, emptiest first.
    pub fn restock_alerts(&self) -> Vec<RestockAlert> {
        let mut alerts: Vec<RestockAlert> = self
            .items
            .iter()
            .filter(|item| item.status.needs_restock())
            .map(RestockAlert::for_item)
            .collect();
        alerts.sort_by_key(|alert| alert.fill_percent);
        alerts
    }

    pub fn filtered(&self, filter: &RecordFilter) -> Vec<&InventoryItem> {
        filter.apply(&self.items)
    }

    fn position(&self, item_id: RecordId) -> Option<usize> {
        locate(&self.items, item_id)
    }

    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<InventoryEvent>, DomainError> {
        if self.position(cmd.item_id).is_some() {
            return Err(DomainError::conflict("item already exists"));
        }
        cmd.form.validate()?;
        Ok(vec![InventoryEvent::ItemAdded(ItemAdded {
            item: InventoryItem::from_form(cmd.item_id, cmd.form.clone()),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateItem) -> Result<Vec<InventoryEvent>, DomainError> {
        if self.position(cmd.item_id).is_none() {
            return Err(DomainError::not_found());
        }
        cmd.form.validate()?;
        Ok(vec![InventoryEvent::ItemUpdated(ItemUpdated {
            item: InventoryItem::from_form(cmd.item_id, cmd.form.clone()),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Result<Vec<InventoryEvent>, DomainError> {
        if self.position(cmd.item_id).is_none() {
            return Err(DomainError::not_found());
        }
        Ok(vec![InventoryEvent::ItemRemoved(ItemRemoved {
            item_id: cmd.item_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

impl AggregateRoot for InventoryBook {
    const KIND: &'static str = "inventory";

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for InventoryBook {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::ItemAdded(e) => {
                self.items.push(e.item.clone());
            }
            InventoryEvent::ItemUpdated(e) => {
                if let Some(idx) = self.position(e.item.id) {
                    self.items[idx] = e.item.clone();
                }
            }
            InventoryEvent::ItemRemoved(e) => {
                self.items.retain(|item| item.id != e.item_id);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let result = match command {
            InventoryCommand::AddItem(cmd) => self.handle_add(cmd),
            InventoryCommand::UpdateItem(cmd) => self.handle_update(cmd),
            InventoryCommand::RemoveItem(cmd) => self.handle_remove(cmd),
        };
        if let Err(err) = &result {
            tracing::warn!(book = Self::KIND, error = %err, "inventory command rejected");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskerp_core::CategoryFilter;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn form(name: &str, sku: &str, category: &str, quantity: i64, min_stock: i64) -> ItemForm {
        ItemForm {
            name: name.to_string(),
            sku: sku.to_string(),
            category: category.to_string(),
            quantity,
            min_stock,
            price_cents: 4_999,
            description: String::new(),
        }
    }

    fn add(book: &mut InventoryBook, form: ItemForm) -> RecordId {
        let item_id = RecordId::new();
        book.execute(&InventoryCommand::AddItem(AddItem {
            item_id,
            form,
            occurred_at: now(),
        }))
        .unwrap();
        item_id
    }

    #[test]
    fn add_item_derives_status() {
        let mut book = InventoryBook::new();
        let chair = add(&mut book, form("Office Chair", "CHR-001", "Furniture", 8, 15));

        let item = book.get(chair).unwrap();
        assert_eq!(item.status, StockStatus::LowStock);
        assert_eq!(book.version(), 1);
    }

    #[test]
    fn update_recomputes_status_in_place() {
        let mut book = InventoryBook::new();
        let mouse = add(&mut book, form("Wireless Mouse", "MOU-001", "Electronics", 0, 20));
        let lamp = add(&mut book, form("Desk Lamp", "LAM-001", "Furniture", 15, 5));

        book.execute(&InventoryCommand::UpdateItem(UpdateItem {
            item_id: mouse,
            form: form("Wireless Mouse", "MOU-001", "Electronics", 40, 20),
            occurred_at: now(),
        }))
        .unwrap();

        assert_eq!(book.items()[0].id, mouse);
        assert_eq!(book.items()[0].status, StockStatus::InStock);
        assert_eq!(book.items()[1].id, lamp);
        assert_eq!(book.version(), 3);
    }

    #[test]
    fn remove_drops_only_target() {
        let mut book = InventoryBook::new();
        let a = add(&mut book, form("Laptop Computer", "LAP-001", "Electronics", 25, 10));
        let b = add(&mut book, form("Desk Lamp", "LAM-001", "Furniture", 15, 5));

        book.execute(&InventoryCommand::RemoveItem(RemoveItem {
            item_id: a,
            occurred_at: now(),
        }))
        .unwrap();

        assert_eq!(book.len(), 1);
        assert_eq!(book.items()[0].id, b);
    }

    #[test]
    fn unknown_item_is_not_found() {
        let book = InventoryBook::new();
        let err = book
            .handle(&InventoryCommand::RemoveItem(RemoveItem {
                item_id: RecordId::new(),
                occurred_at: now(),
            }))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn duplicate_id_is_a_conflict() {
        let mut book = InventoryBook::new();
        let id = add(&mut book, form("Desk Lamp", "LAM-001", "Furniture", 15, 5));
        let err = book
            .handle(&InventoryCommand::AddItem(AddItem {
                item_id: id,
                form: form("Desk Lamp", "LAM-002", "Furniture", 1, 5),
                occurred_at: now(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn invalid_forms_are_rejected() {
        let book = InventoryBook::new();
        let cases = [
            form("  ", "SKU-1", "Misc", 1, 1),
            form("Thing", "", "Misc", 1, 1),
            form("Thing", "SKU-1", "Misc", -1, 1),
            form("Thing", "SKU-1", "Misc", 1, -1),
        ];
        for form in cases {
            let err = book
                .handle(&InventoryCommand::AddItem(AddItem {
                    item_id: RecordId::new(),
                    form,
                    occurred_at: now(),
                }))
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn handle_does_not_mutate() {
        let mut book = InventoryBook::new();
        add(&mut book, form("Desk Lamp", "LAM-001", "Furniture", 15, 5));
        let before = book.clone();

        let _ = book.handle(&InventoryCommand::AddItem(AddItem {
            item_id: RecordId::new(),
            form: form("Monitor", "MON-001", "Electronics", 3, 5),
            occurred_at: now(),
        }));

        assert_eq!(book, before);
    }

    #[test]
    fn status_counts_and_alerts() {
        let mut book = InventoryBook::new();
        add(&mut book, form("Laptop Computer", "LAP-001", "Electronics", 25, 10));
        add(&mut book, form("Office Chair", "CHR-001", "Furniture", 8, 15));
        add(&mut book, form("Wireless Mouse", "MOU-001", "Electronics", 0, 20));
        add(&mut book, form("Desk Lamp", "LAM-001", "Furniture", 15, 5));

        let counts = book.status_counts();
        assert_eq!(counts.total, 4);
        assert_eq!(counts.in_stock, 2);
        assert_eq!(counts.count(StockStatus::LowStock), 1);
        assert_eq!(counts.out_of_stock, 1);

        let alerts = book.restock_alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].name, "Wireless Mouse");
        assert_eq!(alerts[0].fill_percent, 0);
        assert_eq!(alerts[1].name, "Office Chair");
        assert_eq!(alerts[1].fill_percent, 53);
    }

    #[test]
    fn filter_by_term_and_category() {
        let mut book = InventoryBook::new();
        add(&mut book, form("Laptop Computer", "LAP-001", "Electronics", 25, 10));
        add(&mut book, form("Desk Lamp", "LAM-001", "Furniture", 15, 5));
        add(&mut book, form("Wireless Mouse", "MOU-001", "Electronics", 0, 20));

        let hits = book.filtered(&RecordFilter::new("LAPTOP", CategoryFilter::All));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].sku, "LAP-001");

        let hits = book.filtered(&RecordFilter::new("", "Electronics"));
        assert_eq!(hits.len(), 2);

        let hits = book.filtered(&RecordFilter::new("lam", "Electronics"));
        assert!(hits.is_empty());
    }

    #[test]
    fn form_round_trips_through_record() {
        let original = form("Desk Lamp", "LAM-001", "Furniture", 15, 5);
        let item = InventoryItem::from_form(RecordId::new(), original.clone());
        assert_eq!(item.to_form(), original);
        assert_eq!(item.stock_value_cents(), 15 * 4_999);
    }

    #[test]
    fn restock_alerts_handle_huge_thresholds() {
        let mut book = InventoryBook::new();
        let big = i64::MAX / 10;
        add(&mut book, form("Bolt", "BLT-001", "Hardware", big, big));
        add(&mut book, form("Nut", "NUT-001", "Hardware", i64::MAX - 1, i64::MAX));

        let alerts = book.restock_alerts();
        let fills: Vec<(&str, u8)> = alerts
            .iter()
            .map(|alert| (alert.name.as_str(), alert.fill_percent))
            .collect();
        assert_eq!(fills, vec![("Nut", 99), ("Bolt", 100)]);
    }

    #[test]
    fn stock_value_saturates() {
        let mut huge = form("Bolt", "BLT-001", "Hardware", i64::MAX, 0);
        huge.price_cents = u64::MAX;
        let item = InventoryItem::from_form(RecordId::new(), huge);
        assert_eq!(item.stock_value_cents(), u64::MAX);
    }
}
