use anyhow::Result;
use clap::{Parser, Subcommand};

use custos_cli::cli::{
    handle_add_command, handle_edit_command, handle_export_command, handle_list_command,
    handle_remove_command, handle_report_command, AddArgs, EditArgs, ExportArgs, ListArgs,
    ReportArgs,
};
use custos_cli::config::{CustosPaths, Settings};
use custos_cli::ledger::Ledger;
use custos_cli::store::SheetStore;

#[derive(Parser)]
#[command(
    name = "custos",
    version,
    about = "Command-line cost ledger for building-services projects",
    long_about = "custos tracks project expenses in a spreadsheet-style ledger: \
                  register costs, filter them by date, category, client, or payment \
                  status, and export the current view to CSV, XLSX, or a plain-text \
                  report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new cost record
    Add(AddArgs),

    /// List records, optionally filtered
    #[command(alias = "ls")]
    List(ListArgs),

    /// Edit an existing record
    Edit(EditArgs),

    /// Remove a record
    #[command(alias = "rm")]
    Remove {
        /// Identifier of the record to remove
        id: String,
    },

    /// Export the current view to CSV, XLSX, or a text report
    Export(ExportArgs),

    /// Show a summary report of the current view
    Report(ReportArgs),

    /// Re-read the worksheet to pick up external edits
    Sync,

    /// Initialize configuration and the worksheet directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = CustosPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let store = SheetStore::new(settings.worksheet_path(&paths));
    let mut ledger = Ledger::open(store)?;

    match cli.command {
        Commands::Add(args) => handle_add_command(&mut ledger, &settings, args)?,
        Commands::List(args) => handle_list_command(&ledger, &settings, args)?,
        Commands::Edit(args) => handle_edit_command(&mut ledger, args)?,
        Commands::Remove { id } => handle_remove_command(&mut ledger, &id)?,
        Commands::Export(args) => handle_export_command(&ledger, &settings, args)?,
        Commands::Report(args) => handle_report_command(&ledger, &settings, args)?,
        Commands::Sync => {
            ledger.reload()?;
            println!("Reloaded {} records from the worksheet", ledger.len());
        }
        Commands::Init => {
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialized configuration at {}", paths.base_dir().display());
            println!("Worksheet: {}", settings.worksheet_path(&paths).display());
        }
        Commands::Config => {
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Worksheet:      {}", settings.worksheet_path(&paths).display());
            println!("Currency:       {}", settings.currency_symbol);
            println!("Categories:     {}", settings.categories.join(", "));
        }
    }

    Ok(())
}
