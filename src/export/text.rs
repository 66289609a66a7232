//! Plain-text report export
//!
//! Produces the human-readable report offered by the dashboard's "TXT"
//! download: a title, the generation timestamp (a parameter, for
//! determinism), the headline summary, the per-category distribution, and a
//! fixed-width table of the records. Presentational only; not intended for
//! round-trip parsing.

use chrono::NaiveDateTime;

use crate::display::{format_summary, records_table};
use crate::error::LedgerResult;
use crate::models::CostRecord;
use crate::reports::LedgerSummary;

/// Export records as a plain-text report
pub fn to_text<'a, I>(
    records: I,
    generated_at: NaiveDateTime,
    currency_symbol: &str,
) -> LedgerResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a CostRecord>,
{
    let records: Vec<&CostRecord> = records.into_iter().collect();
    let summary = LedgerSummary::generate(records.iter().copied());

    let mut output = String::new();
    output.push_str("COST LEDGER REPORT\n");
    output.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format_summary(&summary, currency_symbol));
    output.push_str("\nRECORDS\n");
    output.push_str(&records_table(records.iter().copied(), currency_symbol));
    output.push('\n');

    Ok(output.into_bytes())
}
