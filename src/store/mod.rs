//! Record store adapter boundary
//!
//! The ledger talks to its durable copy through the `RecordStore` trait. The
//! production implementation is `SheetStore`, a worksheet file in CSV form;
//! `MemoryStore` backs tests and ephemeral sessions. A remote spreadsheet
//! service would plug in behind the same trait.

pub mod memory;
pub mod sheet;

pub use memory::MemoryStore;
pub use sheet::SheetStore;

use crate::error::LedgerResult;
use crate::models::{CostRecord, RecordId};

/// Boundary between the ledger and the external spreadsheet-style store
///
/// Every operation is a synchronous, blocking round-trip; no call reports
/// success before the backend has confirmed the write. Implementations give
/// no partial-write guarantee, so callers treat any failure as unknown state
/// and resynchronize with `load_all`.
pub trait RecordStore {
    /// Read every record, in sheet order
    fn load_all(&self) -> LedgerResult<Vec<CostRecord>>;

    /// Append one record after the last row
    fn append(&mut self, record: &CostRecord) -> LedgerResult<()>;

    /// Overwrite the row holding `id` with `record`
    fn update(&mut self, id: RecordId, record: &CostRecord) -> LedgerResult<()>;

    /// Delete the row holding `id`
    fn delete(&mut self, id: RecordId) -> LedgerResult<()>;
}
