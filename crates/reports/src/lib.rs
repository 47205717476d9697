//! Reports screen: report selection, CSV export and the transaction ledger
//! summarized on the screen.

pub mod export;
pub mod transaction;

pub use export::{CsvExport, ReportKind, ReportPeriod, ReportSelection, ReportSource};
pub use transaction::{
    LedgerSummary, Transaction, TransactionKind, TransactionLedger, TransactionStatus,
};
