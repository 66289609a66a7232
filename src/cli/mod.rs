//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger. The CLI stands in for the
//! dashboard view: it supplies filter criteria and consumes filtered views
//! and export output.

pub mod export;
pub mod record;
pub mod report;

pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use record::{
    handle_add_command, handle_edit_command, handle_list_command, handle_remove_command, AddArgs,
    EditArgs, ListArgs,
};
pub use report::{handle_report_command, ReportArgs};

use chrono::NaiveDate;
use clap::Args;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{FilterCriteria, Money, PaymentStatus, RecordId, DATE_FORMAT};

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| LedgerError::Validation(format!("invalid date {:?} (expected YYYY-MM-DD)", s)))
}

/// Parse a currency amount typed at the CLI
pub fn parse_money(s: &str) -> LedgerResult<Money> {
    Money::parse(s).map_err(|e| LedgerError::Validation(e.to_string()))
}

/// Parse a record identifier
pub fn parse_record_id(s: &str) -> LedgerResult<RecordId> {
    s.parse()
        .map_err(|_| LedgerError::Validation(format!("invalid record id {:?}", s)))
}

/// Filter options shared by `list`, `report`, and `export`
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Include records on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Include records on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Include only these categories (repeatable)
    #[arg(short, long)]
    pub category: Vec<String>,

    /// Include clients containing this text (case-insensitive)
    #[arg(long)]
    pub client: Option<String>,

    /// Include only this payment status
    #[arg(short, long)]
    pub status: Option<String>,
}

impl FilterArgs {
    /// Build filter criteria from the parsed flags
    pub fn to_criteria(&self) -> LedgerResult<FilterCriteria> {
        let mut criteria = FilterCriteria::new();

        if self.from.is_some() || self.to.is_some() {
            let start = match &self.from {
                Some(s) => parse_date(s)?,
                None => NaiveDate::MIN,
            };
            let end = match &self.to {
                Some(s) => parse_date(s)?,
                None => NaiveDate::MAX,
            };
            if start > end {
                return Err(LedgerError::Validation(format!(
                    "empty date range: {} is after {}",
                    start, end
                )));
            }
            criteria = criteria.date_range(start, end);
        }

        if !self.category.is_empty() {
            criteria = criteria.categories(self.category.clone());
        }

        if let Some(client) = &self.client {
            criteria = criteria.client(client.clone());
        }

        if let Some(status) = &self.status {
            let status: PaymentStatus = status
                .parse()
                .map_err(LedgerError::Validation)?;
            criteria = criteria.status(status);
        }

        Ok(criteria)
    }
}
