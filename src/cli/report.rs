//! Report command handler

use clap::Args;

use crate::config::Settings;
use crate::display::format_summary;
use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::reports::LedgerSummary;
use crate::store::RecordStore;

use super::FilterArgs;

/// Arguments for `custos report`
#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Handle `custos report`
pub fn handle_report_command<S: RecordStore>(
    ledger: &Ledger<S>,
    settings: &Settings,
    args: ReportArgs,
) -> LedgerResult<()> {
    let criteria = args.filter.to_criteria()?;
    let summary = LedgerSummary::generate(ledger.filter(&criteria));
    print!("{}", format_summary(&summary, &settings.currency_symbol));
    Ok(())
}
