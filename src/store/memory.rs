//! In-memory record store
//!
//! Keeps records in a plain vector. Used by tests (including storage-failure
//! injection) and for ephemeral sessions that do not need a durable sheet.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CostRecord, RecordId};

use super::RecordStore;

/// A record store holding everything in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<CostRecord>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with records
    pub fn with_records(records: Vec<CostRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Make subsequent `load_all` calls fail with a storage error
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make subsequent mutations fail with a storage error, writing nothing
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Direct view of the stored records
    pub fn records(&self) -> &[CostRecord] {
        &self.records
    }

    fn check_write(&self) -> LedgerResult<()> {
        if self.fail_writes {
            Err(LedgerError::Storage("injected write failure".into()))
        } else {
            Ok(())
        }
    }
}

impl RecordStore for MemoryStore {
    fn load_all(&self) -> LedgerResult<Vec<CostRecord>> {
        if self.fail_reads {
            return Err(LedgerError::Storage("injected read failure".into()));
        }
        Ok(self.records.clone())
    }

    fn append(&mut self, record: &CostRecord) -> LedgerResult<()> {
        self.check_write()?;
        self.records.push(record.clone());
        Ok(())
    }

    fn update(&mut self, id: RecordId, record: &CostRecord) -> LedgerResult<()> {
        self.check_write()?;
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LedgerError::Storage(format!("Record {} missing from store", id)))?;
        self.records[pos] = record.clone();
        Ok(())
    }

    fn delete(&mut self, id: RecordId) -> LedgerResult<()> {
        self.check_write()?;
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LedgerError::Storage(format!("Record {} missing from store", id)))?;
        self.records.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordDraft};
    use chrono::NaiveDate;

    fn sample_record() -> CostRecord {
        CostRecord::from_draft(RecordDraft::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "ClienteA",
            "Materiais",
            "",
            Money::from_cents(10000),
        ))
    }

    #[test]
    fn test_append_update_delete() {
        let mut store = MemoryStore::new();
        let mut rec = sample_record();

        store.append(&rec).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 1);

        rec.client = "ClienteB".into();
        store.update(rec.id, &rec).unwrap();
        assert_eq!(store.load_all().unwrap()[0].client, "ClienteB");

        store.delete(rec.id).unwrap();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_injected_write_failure_writes_nothing() {
        let mut store = MemoryStore::new();
        store.set_fail_writes(true);

        let rec = sample_record();
        assert!(store.append(&rec).unwrap_err().is_storage());
        assert!(store.records().is_empty());

        store.set_fail_writes(false);
        store.append(&rec).unwrap();
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn test_injected_read_failure() {
        let mut store = MemoryStore::with_records(vec![sample_record()]);
        store.set_fail_reads(true);
        assert!(store.load_all().unwrap_err().is_storage());
    }
}
