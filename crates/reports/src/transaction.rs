//! Recent transactions listed on the reports screen.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::export::ReportSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Sale,
    Purchase,
    Refund,
}

impl TransactionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Sale => "Sale",
            TransactionKind::Purchase => "Purchase",
            TransactionKind::Refund => "Refund",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Completed,
    Pending,
}

impl TransactionStatus {
    pub fn label(self) -> &'static str {
        match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// e.g. `TXN-001`.
    pub reference: String,
    pub kind: TransactionKind,
    /// Signed amount in cents; purchases and refunds are negative.
    pub amount_cents: i64,
    pub date: NaiveDate,
    pub status: TransactionStatus,
}

/// Revenue figures derived from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Completed sales.
    pub revenue_cents: i64,
    /// Completed purchases and refunds, as a positive amount.
    pub outflow_cents: i64,
    pub net_cents: i64,
    pub pending: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionLedger {
    transactions: Vec<Transaction>,
}

impl TransactionLedger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn record(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The `limit` most recent transactions by date, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&Transaction> {
        let mut recent: Vec<&Transaction> = self.transactions.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit);
        recent
    }

    pub fn summary(&self) -> LedgerSummary {
        let mut summary = LedgerSummary::default();
        for txn in &self.transactions {
            match (txn.status, txn.kind) {
                (TransactionStatus::Pending, _) => summary.pending += 1,
                (TransactionStatus::Completed, TransactionKind::Sale) => {
                    summary.revenue_cents += txn.amount_cents;
                }
                (TransactionStatus::Completed, _) => {
                    summary.outflow_cents += txn.amount_cents.abs();
                }
            }
        }
        summary.net_cents = summary.revenue_cents - summary.outflow_cents;
        summary
    }
}

impl ReportSource for TransactionLedger {
    fn columns(&self) -> Vec<&'static str> {
        vec!["Transaction ID", "Type", "Amount", "Date", "Status"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.transactions
            .iter()
            .map(|txn| {
                vec![
                    txn.reference.clone(),
                    txn.kind.label().to_string(),
                    format_cents(txn.amount_cents),
                    txn.date.format("%Y-%m-%d").to_string(),
                    txn.status.label().to_string(),
                ]
            })
            .collect()
    }
}

/// Render cents as a signed decimal amount, e.g. `-850.00`.
///
/// Accepts both signed ledger amounts and unsigned totals without wrapping.
pub fn format_cents(cents: impl Into<i128>) -> String {
    let cents = cents.into();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(
        reference: &str,
        kind: TransactionKind,
        cents: i64,
        day: u32,
        status: TransactionStatus,
    ) -> Transaction {
        Transaction {
            reference: reference.to_string(),
            kind,
            amount_cents: cents,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            status,
        }
    }

    fn ledger() -> TransactionLedger {
        use TransactionKind::*;
        use TransactionStatus::*;
        TransactionLedger::new(vec![
            txn("TXN-001", Sale, 129_999, 16, Completed),
            txn("TXN-002", Purchase, -85_000, 16, Completed),
            txn("TXN-003", Sale, 29_999, 15, Pending),
            txn("TXN-004", Refund, -14_999, 15, Completed),
            txn("TXN-005", Sale, 7_999, 14, Completed),
        ])
    }

    #[test]
    fn summary_splits_revenue_and_outflow() {
        let summary = ledger().summary();
        assert_eq!(summary.revenue_cents, 137_998);
        assert_eq!(summary.outflow_cents, 99_999);
        assert_eq!(summary.net_cents, 37_999);
        assert_eq!(summary.pending, 1);
    }

    #[test]
    fn rows_format_amounts() {
        let rows = ledger().rows();
        assert_eq!(rows[1], vec!["TXN-002", "Purchase", "-850.00", "2024-01-16", "Completed"]);
        assert_eq!(format_cents(7_999), "79.99");
        assert_eq!(format_cents(-5), "-0.05");
        assert_eq!(format_cents(u64::MAX), "184467440737095516.15");
        assert_eq!(format_cents(i64::MIN), "-92233720368547758.08");
    }

    #[test]
    fn recent_is_newest_first() {
        let ledger = ledger();
        let recent: Vec<&str> = ledger.recent(3).iter().map(|t| t.reference.as_str()).collect();
        assert_eq!(recent, vec!["TXN-001", "TXN-002", "TXN-003"]);
    }
}
