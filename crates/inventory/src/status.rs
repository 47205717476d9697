//! Stock-level classification.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use deskerp_core::DomainError;

/// Display status of an inventory item.
///
/// Variants are declared in severity order so that `Ord` reads
/// `OutOfStock < LowStock < InStock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "In Stock")]
    InStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [
        StockStatus::InStock,
        StockStatus::LowStock,
        StockStatus::OutOfStock,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }

    /// Whether the item should show up in restock alerts.
    pub fn needs_restock(self) -> bool {
        !matches!(self, StockStatus::InStock)
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StockStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown stock status: {s}")))
    }
}

/// Derive a stock status from a quantity and its minimum threshold.
///
/// Rules are checked in order and the first match wins:
/// 1. `quantity == 0` is out of stock;
/// 2. `quantity <= minimum_threshold` is low stock;
/// 3. anything else is in stock.
///
/// Total over `i64`: negative inputs never panic and simply fall through the
/// comparisons (e.g. `resolve(-3, 5)` is `LowStock`, `resolve(-3, -5)` is
/// `InStock`). Books reject negative values before they get here.
pub fn resolve(quantity: i64, minimum_threshold: i64) -> StockStatus {
    if quantity == 0 {
        StockStatus::OutOfStock
    } else if quantity <= minimum_threshold {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}
