//! Export command handler

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export;
use crate::ledger::Ledger;
use crate::store::RecordStore;

use super::FilterArgs;

/// Output format for `custos export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Excel workbook
    Xlsx,
    /// Plain-text report
    Txt,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Txt => "txt",
        }
    }
}

/// Arguments for `custos export`
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Output file (defaults to custos_export.<ext> in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Handle `custos export`
///
/// The generation timestamp embedded in timestamped formats is read here,
/// at the boundary, and passed into the formatter.
pub fn handle_export_command<S: RecordStore>(
    ledger: &Ledger<S>,
    settings: &Settings,
    args: ExportArgs,
) -> LedgerResult<()> {
    let criteria = args.filter.to_criteria()?;
    let records: Vec<_> = ledger.filter(&criteria).collect();
    let count = records.len();

    let generated_at = chrono::Local::now().naive_local();
    let bytes = match args.format {
        ExportFormat::Csv => export::to_csv(records)?,
        ExportFormat::Xlsx => export::to_xlsx(records, generated_at)?,
        ExportFormat::Txt => {
            export::to_text(records, generated_at, &settings.currency_symbol)?
        }
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("custos_export.{}", args.format.extension())));
    std::fs::write(&output, &bytes)
        .map_err(|e| LedgerError::Export(format!("Failed to write {}: {}", output.display(), e)))?;

    println!("Exported {} records to {}", count, output.display());
    Ok(())
}
