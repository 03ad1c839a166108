use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use moneymap::cli::{
    handle_audit_command, handle_budget_command, handle_category_command, handle_export_command,
    handle_goal_command, handle_report_command, handle_transaction_command, BudgetCommands,
    CategoryCommands, ExportCommands, GoalCommands, ReportCommands, TransactionCommands,
};
use moneymap::config::MoneyMapPaths;
use moneymap::display::category::format_category_table;
use moneymap::state::AppState;
use moneymap::storage::init::initialize_storage;

#[derive(Parser)]
#[command(
    name = "moneymap",
    version,
    about = "Track transactions, budgets and savings goals from the terminal",
    long_about = "MoneyMap records income and expenses, compares spending against \
                  per-category budgets, tracks progress toward savings goals and \
                  suggests where to look when the numbers go the wrong way."
)]
struct Cli {
    /// Directory holding MoneyMap's settings and data files
    #[arg(long, global = true, env = "MONEYMAP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default categories
    Init,

    /// Show paths and settings, or change a setting
    Config {
        /// Setting to change (currency_symbol, date_format, at_risk_threshold)
        key: Option<String>,
        /// New value
        #[arg(requires = "key")]
        value: Option<String>,
    },

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Financial goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Analysis reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent changes
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let paths = match cli.data_dir {
        Some(dir) => MoneyMapPaths::with_base_dir(dir),
        None => MoneyMapPaths::new()?,
    };
    let mut state = AppState::load(paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing MoneyMap at: {}", state.paths.base_dir().display());
            initialize_storage(&state.paths)?;
            state.settings.save(&state.paths)?;
            state.storage.load_all()?;

            println!("Initialization complete!");
            println!();
            println!("Categories:");
            println!("{}", format_category_table(&state.storage.categories.get_all()?));
            println!();
            println!("Next: set your income with 'moneymap budget income <amount>'.");
        }
        Some(Commands::Config { key, value }) => match (key, value) {
            (Some(key), Some(value)) => {
                state.settings.set(&key, &value)?;
                state.settings.save(&state.paths)?;
                println!("{} = {}", key, value);
            }
            (Some(key), None) => {
                anyhow::bail!("Missing value for setting '{}'", key);
            }
            _ => {
                println!("MoneyMap Configuration");
                println!("======================");
                println!("Base directory: {}", state.paths.base_dir().display());
                println!("Data directory: {}", state.paths.data_dir().display());
                println!("Audit log:      {}", state.storage.audit().path().display());
                println!();
                println!("Settings:");
                println!("  currency_symbol:   {}", state.settings.currency_symbol);
                println!("  date_format:       {}", state.settings.date_format);
                println!("  at_risk_threshold: {}", state.settings.at_risk_threshold);
            }
        },
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&state, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&state, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&state, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&state, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&state, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&state, cmd)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&state, limit)?,
        None => {
            println!("MoneyMap - budgets, transactions and goals");
            println!();
            println!("Run 'moneymap --help' for usage information.");
            println!("Run 'moneymap init' to get started.");
        }
    }

    Ok(())
}
