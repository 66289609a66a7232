//! Reports over ledger views
//!
//! Aggregations consumed by the CLI `report` command and by the plain-text
//! export.

pub mod summary;

pub use summary::{CategoryTotal, LedgerSummary};
