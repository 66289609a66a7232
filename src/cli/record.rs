//! Record command handlers: add, list, edit, remove

use clap::Args;

use crate::config::Settings;
use crate::display::records_table;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{PaymentMethod, PaymentStatus, RecordDraft, RecordPatch};
use crate::store::RecordStore;

use super::{parse_date, parse_money, parse_record_id, FilterArgs};

/// Arguments for `custos add`
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Client or project the cost belongs to
    pub client: String,

    /// Cost category (e.g. "Materiais de Construção")
    pub category: String,

    /// Total amount, e.g. "100.00" (or use --unit-price)
    #[arg(short, long)]
    pub amount: Option<String>,

    /// Date of the cost (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Detailed description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Quantity purchased
    #[arg(short, long, default_value_t = 1.0)]
    pub quantity: f64,

    /// Price per unit; the total is quantity x unit price less discount
    #[arg(short, long)]
    pub unit_price: Option<String>,

    /// Discount percentage (0-100)
    #[arg(long, default_value_t = 0)]
    pub discount: u8,

    /// Payment status (pending, paid, partial, cancelled)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Payment method (cash, pix, debit-card, credit-card, transfer, check, bank-slip)
    #[arg(short, long)]
    pub method: Option<String>,

    /// Free-form notes
    #[arg(long, default_value = "")]
    pub notes: String,
}

/// Arguments for `custos list`
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Maximum number of records to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for `custos edit`
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Identifier of the record to edit
    pub id: String,

    /// New date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// New client/project
    #[arg(long)]
    pub client: Option<String>,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New quantity
    #[arg(short, long)]
    pub quantity: Option<f64>,

    /// New unit price
    #[arg(short, long)]
    pub unit_price: Option<String>,

    /// New discount percentage
    #[arg(long)]
    pub discount: Option<u8>,

    /// New total amount (overrides recomputation from pricing fields)
    #[arg(short, long)]
    pub amount: Option<String>,

    /// New payment status
    #[arg(short, long)]
    pub status: Option<String>,

    /// New payment method
    #[arg(short, long)]
    pub method: Option<String>,

    /// New notes
    #[arg(long)]
    pub notes: Option<String>,
}

/// Handle `custos add`
pub fn handle_add_command<S: RecordStore>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    args: AddArgs,
) -> LedgerResult<()> {
    let date = match &args.date {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };

    let mut draft = match (&args.amount, &args.unit_price) {
        (Some(amount), None) => RecordDraft::new(
            date,
            args.client,
            args.category,
            args.description,
            parse_money(amount)?,
        ),
        (None, Some(unit_price)) => RecordDraft::new(
            date,
            args.client,
            args.category,
            args.description,
            crate::models::Money::zero(),
        )
        .with_pricing(args.quantity, parse_money(unit_price)?, args.discount),
        _ => {
            return Err(LedgerError::Validation(
                "provide exactly one of --amount or --unit-price".into(),
            ))
        }
    };

    if let Some(status) = &args.status {
        let status: PaymentStatus = status.parse().map_err(LedgerError::Validation)?;
        draft = draft.with_status(status);
    }
    if let Some(method) = &args.method {
        let method: PaymentMethod = method.parse().map_err(LedgerError::Validation)?;
        draft = draft.with_method(method);
    }
    draft = draft.with_notes(args.notes);

    let id = ledger.add(draft)?;
    let record = ledger
        .get(id)
        .ok_or_else(|| LedgerError::record_not_found(id.to_string()))?;
    println!(
        "Added {} — {} / {} — {}",
        record.id.short(),
        record.client,
        record.category,
        record.amount.format_with_symbol(&settings.currency_symbol)
    );
    println!("Full id: {}", record.id);
    Ok(())
}

/// Handle `custos list`
pub fn handle_list_command<S: RecordStore>(
    ledger: &Ledger<S>,
    settings: &Settings,
    args: ListArgs,
) -> LedgerResult<()> {
    let criteria = args.filter.to_criteria()?;
    let limit = args.limit.unwrap_or(usize::MAX);
    let records: Vec<_> = ledger.filter(&criteria).take(limit).collect();
    let shown = records.len();

    println!(
        "{}",
        records_table(records, &settings.currency_symbol)
    );
    let total = ledger.filter(&criteria).count();
    if shown < total {
        println!("({} of {} records)", shown, total);
    } else {
        println!("({} records)", total);
    }
    Ok(())
}

/// Handle `custos edit`
pub fn handle_edit_command<S: RecordStore>(
    ledger: &mut Ledger<S>,
    args: EditArgs,
) -> LedgerResult<()> {
    let id = parse_record_id(&args.id)?;

    let patch = RecordPatch {
        date: args.date.as_deref().map(parse_date).transpose()?,
        client: args.client,
        category: args.category,
        description: args.description,
        quantity: args.quantity,
        unit_price: args.unit_price.as_deref().map(parse_money).transpose()?,
        discount_pct: args.discount,
        amount: args.amount.as_deref().map(parse_money).transpose()?,
        status: args
            .status
            .as_deref()
            .map(|s| s.parse().map_err(LedgerError::Validation))
            .transpose()?,
        method: args
            .method
            .as_deref()
            .map(|s| s.parse().map_err(LedgerError::Validation))
            .transpose()?,
        notes: args.notes,
    };

    if patch.is_empty() {
        return Err(LedgerError::Validation("nothing to change".into()));
    }

    ledger.update(id, patch)?;
    println!("Updated {}", id);
    Ok(())
}

/// Handle `custos remove`
pub fn handle_remove_command<S: RecordStore>(
    ledger: &mut Ledger<S>,
    id: &str,
) -> LedgerResult<()> {
    let id = parse_record_id(id)?;
    ledger.remove(id)?;
    println!("Removed {}", id);
    Ok(())
}
