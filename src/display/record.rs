//! Record table formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{record::format_quantity, CostRecord, DATE_FORMAT};

/// One row of the record table
#[derive(Tabled)]
pub struct RecordRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Client/Project")]
    pub client: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Qty")]
    pub quantity: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl RecordRow {
    /// Build a display row from a record
    pub fn from_record(record: &CostRecord, currency_symbol: &str) -> Self {
        Self {
            id: record.id.short(),
            date: record.date.format(DATE_FORMAT).to_string(),
            client: truncate(&record.client, 24),
            category: truncate(&record.category, 18),
            description: truncate(&record.description, 32),
            quantity: format_quantity(record.quantity),
            amount: record.amount.format_with_symbol(currency_symbol),
            status: record.status.to_string(),
        }
    }
}

/// Render records as a fixed-width table
pub fn records_table<'a, I>(records: I, currency_symbol: &str) -> String
where
    I: IntoIterator<Item = &'a CostRecord>,
{
    let rows: Vec<RecordRow> = records
        .into_iter()
        .map(|r| RecordRow::from_record(r, currency_symbol))
        .collect();

    if rows.is_empty() {
        return "No records found.".to_string();
    }

    Table::new(rows).with(Style::sharp()).to_string()
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
