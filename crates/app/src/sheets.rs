//! Book contents laid out as export sheets for each report type.

use std::collections::BTreeMap;

use deskerp_inventory::InventoryBook;
use deskerp_reports::ReportSource;
use deskerp_reports::transaction::format_cents;
use deskerp_sales::OrderBook;

/// Sales report: one row per order.
pub struct SalesSheet<'a>(pub &'a OrderBook);

impl ReportSource for SalesSheet<'_> {
    fn columns(&self) -> Vec<&'static str> {
        vec!["Order", "Customer", "Items", "Total", "Status", "Date"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.0
            .orders()
            .iter()
            .map(|order| {
                vec![
                    order.order_number.to_string(),
                    order.customer.clone(),
                    order.items.join("; "),
                    format_cents(order.total_cents),
                    order.status.label().to_string(),
                    order.order_date.format("%Y-%m-%d").to_string(),
                ]
            })
            .collect()
    }
}

/// Inventory report: one row per item with its derived status.
pub struct InventorySheet<'a>(pub &'a InventoryBook);

impl ReportSource for InventorySheet<'_> {
    fn columns(&self) -> Vec<&'static str> {
        vec![
            "Name",
            "SKU",
            "Category",
            "Quantity",
            "Min Stock",
            "Price",
            "Status",
            "Stock Value",
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.0
            .items()
            .iter()
            .map(|item| {
                vec![
                    item.name.clone(),
                    item.sku.clone(),
                    item.category.clone(),
                    item.quantity.to_string(),
                    item.min_stock.to_string(),
                    format_cents(item.price_cents),
                    item.status.label().to_string(),
                    format_cents(item.stock_value_cents()),
                ]
            })
            .collect()
    }
}

/// Customer report: orders grouped by customer email.
pub struct CustomerSheet<'a>(pub &'a OrderBook);

impl ReportSource for CustomerSheet<'_> {
    fn columns(&self) -> Vec<&'static str> {
        vec!["Customer", "Email", "Orders", "Total Spent"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let mut by_email: BTreeMap<&str, (&str, usize, u64)> = BTreeMap::new();
        for order in self.0.orders() {
            let entry = by_email
                .entry(order.customer_email.as_str())
                .or_insert((order.customer.as_str(), 0, 0));
            entry.1 += 1;
            entry.2 = entry.2.saturating_add(order.total_cents);
        }

        by_email
            .into_iter()
            .map(|(email, (name, orders, total))| {
                vec![
                    name.to_string(),
                    email.to_string(),
                    orders.to_string(),
                    format_cents(total),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use deskerp_sales::{OrderForm, OrderStatus};

    use super::*;
    use crate::Workspace;

    #[test]
    fn customer_sheet_groups_by_email() {
        let workspace = Workspace::seeded().unwrap();
        let rows = CustomerSheet(workspace.orders()).rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["Alice Brown", "alice@example.com", "1", "1379.97"]);
    }

    #[test]
    fn inventory_sheet_carries_status_labels() {
        let workspace = Workspace::seeded().unwrap();
        let rows = InventorySheet(workspace.inventory()).rows();
        assert_eq!(rows[2][0], "Wireless Mouse");
        assert_eq!(rows[2][6], "Out of Stock");
        assert_eq!(rows[2][7], "0.00");
        assert_eq!(rows[0][7], "24999.75");
    }

    #[test]
    fn large_totals_are_not_wrapped() {
        let mut workspace = Workspace::new();
        let placed_at = Utc::now();
        for _ in 0..2 {
            let form = OrderForm {
                customer: "Big Spender".to_string(),
                customer_email: "big@example.com".to_string(),
                items: "Server Rack".to_string(),
                total_cents: u64::MAX - 1,
                status: OrderStatus::Delivered,
                notes: String::new(),
            };
            workspace.place_order(form, placed_at).unwrap();
        }

        let sales = SalesSheet(workspace.orders()).rows();
        assert_eq!(sales[0][3], "184467440737095516.14");

        let customers = CustomerSheet(workspace.orders()).rows();
        assert_eq!(customers[0][2], "2");
        assert_eq!(customers[0][3], "184467440737095516.15");
    }

    #[test]
    fn sales_sheet_lists_every_order() {
        let workspace = Workspace::seeded().unwrap();
        let rows = SalesSheet(workspace.orders()).rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0], "ORD-001");
        assert_eq!(rows[0][2], "Laptop Computer; Wireless Mouse");
    }
}
