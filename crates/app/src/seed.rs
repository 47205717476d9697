//! Demo records a fresh workspace starts with.

use chrono::{DateTime, NaiveDate, Utc};

use deskerp_core::{DomainError, DomainResult};
use deskerp_inventory::ItemForm;
use deskerp_reports::{Transaction, TransactionKind, TransactionStatus};
use deskerp_sales::{OrderForm, OrderStatus};
use deskerp_users::{UserForm, UserStatus};

pub(crate) fn date(year: i32, month: u32, day: u32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DomainError::invariant(format!("invalid seed date {year}-{month}-{day}")))
}

/// Business timestamp at 09:00 UTC on the given day.
pub(crate) fn at(year: i32, month: u32, day: u32) -> DomainResult<DateTime<Utc>> {
    date(year, month, day)?
        .and_hms_opt(9, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| DomainError::invariant("invalid seed time"))
}

fn item(
    name: &str,
    sku: &str,
    category: &str,
    quantity: i64,
    min_stock: i64,
    price_cents: u64,
    description: &str,
) -> ItemForm {
    ItemForm {
        name: name.to_string(),
        sku: sku.to_string(),
        category: category.to_string(),
        quantity,
        min_stock,
        price_cents,
        description: description.to_string(),
    }
}

pub fn inventory() -> Vec<ItemForm> {
    vec![
        item(
            "Laptop Computer",
            "LAP-001",
            "Electronics",
            25,
            10,
            99_999,
            "High-performance laptop for business use",
        ),
        item(
            "Office Chair",
            "CHR-001",
            "Furniture",
            8,
            15,
            29_999,
            "Ergonomic office chair with lumbar support",
        ),
        item(
            "Wireless Mouse",
            "MOU-001",
            "Electronics",
            0,
            20,
            4_999,
            "Wireless optical mouse with USB receiver",
        ),
        item(
            "Desk Lamp",
            "LAM-001",
            "Furniture",
            15,
            5,
            7_999,
            "LED desk lamp with adjustable brightness",
        ),
    ]
}

fn order(
    customer: &str,
    email: &str,
    items: &str,
    total_cents: u64,
    status: OrderStatus,
    notes: &str,
) -> OrderForm {
    OrderForm {
        customer: customer.to_string(),
        customer_email: email.to_string(),
        items: items.to_string(),
        total_cents,
        status,
        notes: notes.to_string(),
    }
}

/// Orders with the day they were placed, in placement order.
pub fn orders() -> DomainResult<Vec<(OrderForm, DateTime<Utc>)>> {
    Ok(vec![
        (
            order(
                "John Doe",
                "john@example.com",
                "Laptop Computer, Wireless Mouse",
                104_998,
                OrderStatus::Processing,
                "Rush order - customer needs by Friday",
            ),
            at(2024, 1, 15)?,
        ),
        (
            order(
                "Jane Smith",
                "jane@example.com",
                "Office Chair",
                29_999,
                OrderStatus::Shipped,
                "Standard shipping",
            ),
            at(2024, 1, 14)?,
        ),
        (
            order(
                "Bob Johnson",
                "bob@example.com",
                "Desk Lamp, Wireless Mouse",
                12_998,
                OrderStatus::Delivered,
                "Delivered to reception",
            ),
            at(2024, 1, 12)?,
        ),
        (
            order(
                "Alice Brown",
                "alice@example.com",
                "Laptop Computer, Office Chair, Desk Lamp",
                137_997,
                OrderStatus::Pending,
                "Waiting for payment confirmation",
            ),
            at(2024, 1, 16)?,
        ),
    ])
}

fn user(name: &str, email: &str, role: &str, status: UserStatus) -> UserForm {
    UserForm {
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        status,
    }
}

/// Users with their creation day.
pub fn users() -> DomainResult<Vec<(UserForm, DateTime<Utc>)>> {
    Ok(vec![
        (user("John Doe", "john@example.com", "Admin", UserStatus::Active), at(2024, 1, 15)?),
        (user("Jane Smith", "jane@example.com", "Manager", UserStatus::Active), at(2024, 1, 20)?),
        (
            user("Bob Johnson", "bob@example.com", "Employee", UserStatus::Inactive),
            at(2024, 2, 1)?,
        ),
        (
            user("Alice Brown", "alice@example.com", "Employee", UserStatus::Active),
            at(2024, 2, 10)?,
        ),
    ])
}

fn txn(
    reference: &str,
    kind: TransactionKind,
    amount_cents: i64,
    date: NaiveDate,
    status: TransactionStatus,
) -> Transaction {
    Transaction {
        reference: reference.to_string(),
        kind,
        amount_cents,
        date,
        status,
    }
}

pub fn transactions() -> DomainResult<Vec<Transaction>> {
    use TransactionKind::{Purchase, Refund, Sale};
    use TransactionStatus::{Completed, Pending};

    Ok(vec![
        txn("TXN-001", Sale, 129_999, date(2024, 1, 16)?, Completed),
        txn("TXN-002", Purchase, -85_000, date(2024, 1, 16)?, Completed),
        txn("TXN-003", Sale, 29_999, date(2024, 1, 15)?, Pending),
        txn("TXN-004", Refund, -14_999, date(2024, 1, 15)?, Completed),
        txn("TXN-005", Sale, 7_999, date(2024, 1, 14)?, Completed),
    ])
}
