//! custos-cli - Command-line cost ledger for building-services projects
//!
//! This library provides the core of a cost-tracking tool: an in-memory
//! ledger of expense records cached from a spreadsheet-style record store,
//! with validation, filtering, reporting, and export to CSV, XLSX, and
//! plain text.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (records, money, filter criteria)
//! - `store`: Record store adapter boundary and its implementations
//! - `ledger`: The in-memory ledger with rollback-on-failure mutations
//! - `export`: CSV / XLSX / plain-text export formatters
//! - `reports`: Aggregations over ledger views
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod store;

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
