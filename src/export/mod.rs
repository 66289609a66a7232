//! Export formatters
//!
//! Serialize a filtered view of the ledger to the three download formats of
//! the dashboard:
//! - CSV: spreadsheet-compatible, RFC 4180-style quoting
//! - XLSX: binary workbook with a single styled sheet
//! - text: human-readable report with summary and fixed-width table
//!
//! All formatters are pure functions of their inputs. Formats that embed a
//! generation timestamp take it as a parameter, so identical input always
//! produces byte-identical output.

pub mod csv;
pub mod text;
pub mod xlsx;

pub use csv::{read_csv, to_csv, write_csv};
pub use text::to_text;
pub use xlsx::to_xlsx;
