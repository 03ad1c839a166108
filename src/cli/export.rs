//! CLI commands for data export

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{MoneyMapError, MoneyMapResult};
use crate::export::{
    export_full_json, export_full_yaml, export_transactions_csv, import_from_json,
    import_from_yaml, FullExport,
};
use crate::state::AppState;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON (full data set)
    Json,
    /// YAML (full data set, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export goals, transactions and budgets
    All {
        /// Output file path, or "-" for stdout
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export transactions to CSV
    Transactions {
        /// Output file path, or "-" for stdout
        output: PathBuf,
    },

    /// Check that an export file parses and is internally consistent
    Verify {
        /// Export file (.json, .yaml or .yml)
        input: PathBuf,
    },

    /// Show what an export would contain
    Info,
}

/// Handle export commands
pub fn handle_export_command(state: &AppState, cmd: ExportCommands) -> MoneyMapResult<()> {
    let storage = &state.storage;

    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = open_output(&output)?;
            match format {
                ExportFormat::Json => export_full_json(storage, &mut writer, pretty)?,
                ExportFormat::Yaml => export_full_yaml(storage, &mut writer)?,
            }
            writer.flush()?;

            if !is_stdout(&output) {
                println!("Exported all data to: {}", output.display());
            }
        }

        ExportCommands::Transactions { output } => {
            let mut writer = open_output(&output)?;
            let count = export_transactions_csv(storage, &mut writer)?;
            writer.flush()?;

            if !is_stdout(&output) {
                println!("Exported {} transactions to: {}", count, output.display());
            }
        }

        ExportCommands::Verify { input } => {
            let export = read_export(&input)?;
            println!("{} is a valid export", input.display());
            print_counts(&export);
        }

        ExportCommands::Info => {
            let export = FullExport::from_storage(storage)?;
            println!("Schema version: {}", export.schema_version);
            println!("App version:    {}", export.app_version);
            print_counts(&export);
        }
    }

    Ok(())
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn open_output(path: &Path) -> MoneyMapResult<Box<dyn Write>> {
    if is_stdout(path) {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }

    let file = File::create(path).map_err(|e| {
        MoneyMapError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(Box::new(BufWriter::new(file)))
}

fn read_export(path: &Path) -> MoneyMapResult<FullExport> {
    let contents = fs::read_to_string(path)
        .map_err(|e| MoneyMapError::Export(format!("Failed to read {}: {}", path.display(), e)))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => import_from_yaml(&contents),
        _ => import_from_json(&contents),
    }
}

fn print_counts(export: &FullExport) {
    let meta = &export.metadata;
    println!("  Goals:        {}", meta.goal_count);
    println!("  Transactions: {}", meta.transaction_count);
    println!("  Budget lines: {}", meta.budget_count);
    println!("  Categories:   {}", export.categories.len());
    if let (Some(earliest), Some(latest)) = (&meta.earliest_transaction, &meta.latest_transaction) {
        println!("  Date range:   {} to {}", earliest, latest);
    }
}
