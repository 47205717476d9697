//! Overview screen figures.

use serde::{Deserialize, Serialize};

use deskerp_inventory::{RestockAlert, StatusCounts};
use deskerp_reports::LedgerSummary;
use deskerp_sales::{Order, OrderStatus, OrderStatusCounts};

use crate::workspace::Workspace;

/// Number of orders shown in the "Recent Orders" card.
pub const RECENT_ORDERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub order_number: String,
    pub customer: String,
    pub total_cents: u64,
    pub status: OrderStatus,
}

impl From<&Order> for RecentOrder {
    fn from(order: &Order) -> Self {
        Self {
            order_number: order.order_number.to_string(),
            customer: order.customer.clone(),
            total_cents: order.total_cents,
            status: order.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_users: usize,
    pub active_users: usize,
    pub inventory: StatusCounts,
    pub orders: OrderStatusCounts,
    pub revenue: LedgerSummary,
    pub recent_orders: Vec<RecentOrder>,
    pub restock_alerts: Vec<RestockAlert>,
}

impl DashboardSummary {
    pub(crate) fn collect(workspace: &Workspace) -> Self {
        Self {
            total_users: workspace.users().len(),
            active_users: workspace.users().active_count(),
            inventory: workspace.inventory().status_counts(),
            orders: workspace.orders().status_counts(),
            revenue: workspace.ledger().summary(),
            recent_orders: workspace
                .orders()
                .recent(RECENT_ORDERS)
                .into_iter()
                .map(RecentOrder::from)
                .collect(),
            restock_alerts: workspace.inventory().restock_alerts(),
        }
    }

    pub fn open_orders(&self) -> usize {
        self.orders.open()
    }
}
