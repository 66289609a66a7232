//! CSV export and re-import
//!
//! The exported file carries a header row with the record field names and
//! one row per record, amounts in fixed two-decimal form. `read_csv` parses
//! the same layout back, so an exported view round-trips field for field
//! (identifiers are regenerated when the id cell is blank or unparsable).

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CostRecord, FIELD_HEADERS};

/// Write records as CSV to the given writer
pub fn write_csv<'a, W, I>(records: I, writer: &mut W) -> LedgerResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a CostRecord>,
{
    writeln!(writer, "{}", FIELD_HEADERS.join(","))
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    for record in records {
        let row: Vec<String> = record
            .to_fields()
            .into_iter()
            .map(|field| escape_csv(&field))
            .collect();
        writeln!(writer, "{}", row.join(","))
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Export records to an in-memory CSV byte sequence
pub fn to_csv<'a, I>(records: I) -> LedgerResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a CostRecord>,
{
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(buf)
}

/// Parse records from CSV bytes produced by `write_csv`
pub fn read_csv(bytes: &[u8]) -> LedgerResult<Vec<CostRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| LedgerError::Import(format!("Failed to read header: {}", e)))?;
    if headers.iter().ne(FIELD_HEADERS) {
        return Err(LedgerError::Import(format!(
            "Unexpected CSV header: expected {:?}",
            FIELD_HEADERS
        )));
    }

    let mut records = Vec::new();
    for (row_num, result) in reader.records().enumerate() {
        let row = result.map_err(|e| {
            LedgerError::Import(format!("Failed to read row {}: {}", row_num + 2, e))
        })?;
        let fields: Vec<String> = row.iter().map(str::to_string).collect();
        let record = CostRecord::from_fields(&fields)
            .map_err(|e| LedgerError::Import(format!("Bad row {}: {}", row_num + 2, e)))?;
        records.push(record);
    }
    Ok(records)
}

/// Escape a field for CSV output
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
