//! Worksheet-file record store
//!
//! Stores the ledger in a single worksheet kept as a CSV file: a header row
//! followed by one row per record. Mutations re-read the sheet, apply the
//! change, and replace the file atomically (write to a temp file, then
//! rename), so a crash mid-write never leaves a half-written sheet behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CostRecord, RecordId, FIELD_HEADERS};

use super::RecordStore;

/// A record store backed by a worksheet file in CSV form
pub struct SheetStore {
    path: PathBuf,
}

impl SheetStore {
    /// Open a sheet store at the given path
    ///
    /// A missing file is treated as an empty sheet; it is created on the
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the worksheet file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the whole sheet with the given records
    fn write_all(&self, records: &[CostRecord]) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LedgerError::Storage(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        let file = File::create(&tmp_path).map_err(|e| {
            LedgerError::Storage(format!("Failed to create {}: {}", tmp_path.display(), e))
        })?;

        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        writer
            .write_record(FIELD_HEADERS)
            .map_err(|e| LedgerError::Storage(format!("Failed to write header: {}", e)))?;
        for record in records {
            writer
                .write_record(record.to_fields())
                .map_err(|e| LedgerError::Storage(format!("Failed to write row: {}", e)))?;
        }
        writer
            .flush()
            .map_err(|e| LedgerError::Storage(format!("Failed to flush worksheet: {}", e)))?;
        drop(writer);

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl RecordStore for SheetStore {
    fn load_all(&self) -> LedgerResult<Vec<CostRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|e| {
            LedgerError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(|e| LedgerError::Storage(format!("Failed to read header: {}", e)))?;
        if headers.iter().ne(FIELD_HEADERS) {
            return Err(LedgerError::Storage(format!(
                "Worksheet header mismatch in {}: expected {:?}",
                self.path.display(),
                FIELD_HEADERS
            )));
        }

        let mut records = Vec::new();
        for (row_num, result) in reader.records().enumerate() {
            let row = result
                .map_err(|e| LedgerError::Storage(format!("Failed to read row: {}", e)))?;
            let fields: Vec<String> = row.iter().map(str::to_string).collect();
            let record = CostRecord::from_fields(&fields).map_err(|e| {
                LedgerError::Storage(format!(
                    "Bad row {} in {}: {}",
                    row_num + 2, // 1-based, after the header
                    self.path.display(),
                    e
                ))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    fn append(&mut self, record: &CostRecord) -> LedgerResult<()> {
        let mut records = self.load_all()?;
        records.push(record.clone());
        self.write_all(&records)
    }

    fn update(&mut self, id: RecordId, record: &CostRecord) -> LedgerResult<()> {
        let mut records = self.load_all()?;
        // A row the ledger believes exists but the sheet lacks means the two
        // have diverged; surface it as a storage failure.
        let pos = records.iter().position(|r| r.id == id).ok_or_else(|| {
            LedgerError::Storage(format!("Record {} missing from worksheet", id))
        })?;
        records[pos] = record.clone();
        self.write_all(&records)
    }

    fn delete(&mut self, id: RecordId) -> LedgerResult<()> {
        let mut records = self.load_all()?;
        let pos = records.iter().position(|r| r.id == id).ok_or_else(|| {
            LedgerError::Storage(format!("Record {} missing from worksheet", id))
        })?;
        records.remove(pos);
        self.write_all(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordDraft};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_record(client: &str) -> CostRecord {
        CostRecord::from_draft(RecordDraft::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            client,
            "Materiais",
            "Cimento CP-II 50kg",
            Money::from_cents(10000),
        ))
    }

    fn create_store() -> (TempDir, SheetStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = SheetStore::new(temp_dir.path().join("worksheet.csv"));
        (temp_dir, store)
    }

    #[test]
    fn test_missing_file_is_empty_sheet() {
        let (_temp_dir, store) = create_store();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_load() {
        let (_temp_dir, mut store) = create_store();
        let a = sample_record("ClienteA");
        let b = sample_record("ClienteB");

        store.append(&a).unwrap();
        store.append(&b).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, vec![a, b]);
    }

    #[test]
    fn test_update_row() {
        let (_temp_dir, mut store) = create_store();
        let mut rec = sample_record("ClienteA");
        store.append(&rec).unwrap();

        rec.description = "Areia lavada m3".into();
        store.update(rec.id, &rec).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded[0].description, "Areia lavada m3");
    }

    #[test]
    fn test_delete_row() {
        let (_temp_dir, mut store) = create_store();
        let a = sample_record("ClienteA");
        let b = sample_record("ClienteB");
        store.append(&a).unwrap();
        store.append(&b).unwrap();

        store.delete(a.id).unwrap();
        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, vec![b]);
    }

    #[test]
    fn test_update_missing_row_is_storage_error() {
        let (_temp_dir, mut store) = create_store();
        let rec = sample_record("ClienteA");
        let err = store.update(rec.id, &rec).unwrap_err();
        assert!(err.is_storage());

        let err = store.delete(rec.id).unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_header_mismatch_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("worksheet.csv");
        std::fs::write(&path, "foo,bar\n1,2\n").unwrap();

        let store = SheetStore::new(&path);
        let err = store.load_all().unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_fields_survive_reopen() {
        let (_temp_dir, mut store) = create_store();
        let mut rec = sample_record("Reforma, Apto 101");
        rec.notes = "entregue \"na obra\"".into();
        store.append(&rec).unwrap();

        let reopened = SheetStore::new(store.path().to_path_buf());
        let loaded = reopened.load_all().unwrap();
        assert_eq!(loaded, vec![rec]);
    }
}
