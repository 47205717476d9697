//! Sales orders domain module.
//!
//! This crate contains business rules for the orders screen, implemented purely
//! as deterministic domain logic (no IO, no UI, no storage).

pub mod order;

pub use order::{
    Order, OrderBook, OrderCommand, OrderEvent, OrderForm, OrderNumber, OrderPlaced, OrderRemoved,
    OrderStatus, OrderStatusCounts, OrderUpdated, PlaceOrder, RemoveOrder, UpdateOrder,
    parse_line_items,
};
