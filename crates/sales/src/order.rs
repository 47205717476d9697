use core::str::FromStr;
use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use deskerp_core::{
    Aggregate, AggregateRoot, DomainError, Entity, RecordFilter, RecordId, Searchable, locate,
    lookup,
    error::{require_email, require_non_blank},
};
use deskerp_events::Event;

/// Order status, chosen by the operator on the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Orders still awaiting fulfilment.
    pub fn is_open(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown order status: {s}")))
    }
}

/// Human-facing order number, rendered as `ORD-001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber(u32);

impl OrderNumber {
    const PREFIX: &'static str = "ORD-";

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{:03}", Self::PREFIX, self.0)
    }
}

impl FromStr for OrderNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::PREFIX)
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
            .map(Self)
            .ok_or_else(|| DomainError::invalid_id(format!("OrderNumber: {s}")))
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderNumber> for String {
    fn from(value: OrderNumber) -> Self {
        value.to_string()
    }
}

/// Split the form's comma-separated item list, trimming entries and dropping
/// empty ones.
pub fn parse_line_items(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Values captured by the add/edit order dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderForm {
    pub customer: String,
    pub customer_email: String,
    /// Comma-separated item names, as typed.
    pub items: String,
    /// Total in smallest currency unit (e.g., cents).
    pub total_cents: u64,
    pub status: OrderStatus,
    pub notes: String,
}

impl OrderForm {
    fn validate(&self) -> Result<Vec<String>, DomainError> {
        require_non_blank("customer", &self.customer)?;
        require_email("customer email", &self.customer_email)?;
        let items = parse_line_items(&self.items);
        if items.is_empty() {
            return Err(DomainError::validation("order needs at least one item"));
        }
        Ok(items)
    }
}

/// A customer order as listed on the orders screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: RecordId,
    pub order_number: OrderNumber,
    pub customer: String,
    pub customer_email: String,
    pub items: Vec<String>,
    pub total_cents: u64,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    pub notes: String,
}

impl Order {
    pub fn new(
        id: RecordId,
        order_number: OrderNumber,
        order_date: NaiveDate,
        form: OrderForm,
        items: Vec<String>,
    ) -> Self {
        Self {
            id,
            order_number,
            customer: form.customer,
            customer_email: form.customer_email,
            items,
            total_cents: form.total_cents,
            status: form.status,
            order_date,
            notes: form.notes,
        }
    }

    /// Pre-fill the edit dialog; items are re-joined with `", "`.
    pub fn to_form(&self) -> OrderForm {
        OrderForm {
            customer: self.customer.clone(),
            customer_email: self.customer_email.clone(),
            items: self.items.join(", "),
            total_cents: self.total_cents,
            status: self.status,
            notes: self.notes.clone(),
        }
    }
}

impl Entity for Order {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.customer.as_str()),
            Cow::Owned(self.order_number.to_string()),
            Cow::Borrowed(self.customer_email.as_str()),
        ]
    }

    fn category(&self) -> &str {
        self.status.label()
    }
}

/// Command: PlaceOrder. The order date is taken from `occurred_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub order_id: RecordId,
    pub form: OrderForm,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateOrder. Keeps the order number and order date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrder {
    pub order_id: RecordId,
    pub form: OrderForm,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveOrder {
    pub order_id: RecordId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderCommand {
    PlaceOrder(PlaceOrder),
    UpdateOrder(UpdateOrder),
    RemoveOrder(RemoveOrder),
}

/// Event: OrderPlaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order: Order,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderUpdated. Carries the full replacement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdated {
    pub order: Order,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRemoved {
    pub order_id: RecordId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderPlaced(OrderPlaced),
    OrderUpdated(OrderUpdated),
    OrderRemoved(OrderRemoved),
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderPlaced(_) => "sales.order.placed",
            OrderEvent::OrderUpdated(_) => "sales.order.updated",
            OrderEvent::OrderRemoved(_) => "sales.order.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderPlaced(e) => e.occurred_at,
            OrderEvent::OrderUpdated(e) => e.occurred_at,
            OrderEvent::OrderRemoved(e) => e.occurred_at,
        }
    }

    fn record_id(&self) -> RecordId {
        match self {
            OrderEvent::OrderPlaced(e) => e.order.id,
            OrderEvent::OrderUpdated(e) => e.order.id,
            OrderEvent::OrderRemoved(e) => e.order_id,
        }
    }
}

/// Summary cards on the orders screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderStatusCounts {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

impl OrderStatusCounts {
    pub fn count(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Processing => self.processing,
            OrderStatus::Shipped => self.shipped,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Cancelled => self.cancelled,
        }
    }

    pub fn open(&self) -> usize {
        self.pending + self.processing
    }
}

/// Aggregate: the orders screen's order list.
///
/// # Invariants
/// - Order ids and order numbers are unique.
/// - Order numbers and order dates never change after placement.
/// - Orders keep insertion order; updates replace in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
    version: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, order_id: RecordId) -> Option<&Order> {
        lookup(&self.orders, order_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number the next placed order will receive.
    ///
    /// One past the highest number in the book, so numbers stay unique after
    /// removals.
    pub fn next_order_number(&self) -> OrderNumber {
        self.orders
            .iter()
            .map(|order| order.order_number)
            .max()
            .map(OrderNumber::next)
            .unwrap_or(OrderNumber::new(1))
    }

    pub fn status_counts(&self) -> OrderStatusCounts {
        self.orders
            .iter()
            .fold(OrderStatusCounts::default(), |mut counts, order| {
                counts.total += 1;
                match order.status {
                    OrderStatus::Pending => counts.pending += 1,
                    OrderStatus::Processing => counts.processing += 1,
                    OrderStatus::Shipped => counts.shipped += 1,
                    OrderStatus::Delivered => counts.delivered += 1,
                    OrderStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            })
    }

    pub fn filtered(&self, filter: &RecordFilter) -> Vec<&Order> {
        filter.apply(&self.orders)
    }

    /// The `limit` most recent orders by order date (newest first; ties keep
    /// the later-placed order first).
    pub fn recent(&self, limit: usize) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.orders.iter().rev().collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        orders.truncate(limit);
        orders
    }

    fn position(&self, order_id: RecordId) -> Option<usize> {
        locate(&self.orders, order_id)
    }

    fn handle_place(&self, cmd: &PlaceOrder) -> Result<Vec<OrderEvent>, DomainError> {
        if self.position(cmd.order_id).is_some() {
            return Err(DomainError::conflict("order already exists"));
        }
        let items = cmd.form.validate()?;
        let order = Order::new(
            cmd.order_id,
            self.next_order_number(),
            cmd.occurred_at.date_naive(),
            cmd.form.clone(),
            items,
        );
        Ok(vec![OrderEvent::OrderPlaced(OrderPlaced {
            order,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateOrder) -> Result<Vec<OrderEvent>, DomainError> {
        let existing = self.get(cmd.order_id).ok_or_else(DomainError::not_found)?;
        let items = cmd.form.validate()?;
        let order = Order::new(
            existing.id,
            existing.order_number,
            existing.order_date,
            cmd.form.clone(),
            items,
        );
        Ok(vec![OrderEvent::OrderUpdated(OrderUpdated {
            order,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveOrder) -> Result<Vec<OrderEvent>, DomainError> {
        if self.position(cmd.order_id).is_none() {
            return Err(DomainError::not_found());
        }
        Ok(vec![OrderEvent::OrderRemoved(OrderRemoved {
            order_id: cmd.order_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

impl AggregateRoot for OrderBook {
    const KIND: &'static str = "orders";

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for OrderBook {
    type Command = OrderCommand;
    type Event = OrderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OrderEvent::OrderPlaced(e) => {
                self.orders.push(e.order.clone());
            }
            OrderEvent::OrderUpdated(e) => {
                if let Some(idx) = self.position(e.order.id) {
                    self.orders[idx] = e.order.clone();
                }
            }
            OrderEvent::OrderRemoved(e) => {
                self.orders.retain(|order| order.id != e.order_id);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let result = match command {
            OrderCommand::PlaceOrder(cmd) => self.handle_place(cmd),
            OrderCommand::UpdateOrder(cmd) => self.handle_update(cmd),
            OrderCommand::RemoveOrder(cmd) => self.handle_remove(cmd),
        };
        if let Err(err) = &result {
            tracing::warn!(book = Self::KIND, error = %err, "order command rejected");
        }
        result
    }
}
