//! Terminal display formatting
//!
//! Formats records and summaries for terminal output. The same table
//! rendering backs the plain-text export.

pub mod record;
pub mod summary;

pub use record::{records_table, RecordRow};
pub use summary::format_summary;
