use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{LedgerStore, LoadOutcome};
use crate::domain::DraftEntry;
use crate::io::{Exporter, ImportOptions, ImportResult, Importer};
use crate::storage::default_data_file;

/// Findash - Financial Dashboard Ledger
#[derive(Parser)]
#[command(name = "findash")]
#[command(about = "A local-first financial dashboard backed by a spreadsheet file")]
#[command(version)]
pub struct Cli {
    /// Data file path (defaults to the platform data directory)
    #[arg(short, long)]
    pub data_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append an entry to the ledger and save it
    Add {
        /// Entry date (YYYY-MM-DD)
        date: String,

        /// Bank balance on that date (e.g., "500" or "500.00")
        balance: String,

        /// Cleared amount
        #[arg(short, long)]
        cleared: Option<String>,
    },

    /// List all ledger entries
    List,

    /// Export the ledger to CSV or JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// Import entries from CSV or JSON
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Preview without importing
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let path = self.data_file.clone().unwrap_or_else(default_data_file);

        match self.command {
            Commands::Add {
                date,
                balance,
                cleared,
            } => {
                let mut store = LedgerStore::open(&path);
                if store.load().await? == LoadOutcome::NoDataFile {
                    println!("No data file found. Starting fresh.");
                }

                let draft = DraftEntry::new(date, balance, cleared.unwrap_or_default());
                let record = store
                    .add_entry(&draft)
                    .context("Please fill in all required fields")?;

                store.save().await?;
                println!("Data saved successfully.");
                println!(
                    "Added entry: {} {} {}",
                    record.date,
                    record.bank_balance,
                    record.cleared.as_deref().unwrap_or("-")
                );
            }

            Commands::List => {
                let mut store = LedgerStore::open(&path);
                if store.load().await? == LoadOutcome::NoDataFile {
                    println!("No data file found. Starting fresh.");
                }

                if store.is_empty() {
                    println!("No entries.");
                } else {
                    println!("{:<12} {:>14} {:>14}", "DATE", "BANK BALANCE", "CLEARED");
                    println!("{}", "-".repeat(42));
                    for record in store.records() {
                        println!(
                            "{:<12} {:>14} {:>14}",
                            record.date,
                            record.bank_balance,
                            record.cleared.as_deref().unwrap_or("")
                        );
                    }
                }
            }

            Commands::Export { output, format } => {
                let mut store = LedgerStore::open(&path);
                if store.load().await? == LoadOutcome::NoDataFile {
                    eprintln!("No data file found. Starting fresh.");
                }

                let exporter = Exporter::new(&store);
                let writer: Box<dyn Write> = match &output {
                    Some(file) => Box::new(
                        File::create(file).with_context(|| format!("Failed to create {}", file))?,
                    ),
                    None => Box::new(std::io::stdout()),
                };

                match format.as_str() {
                    "csv" => {
                        let count = exporter.export_csv(writer)?;
                        eprintln!("Exported {} entries", count);
                    }
                    "json" => {
                        let snapshot = exporter.export_json(writer)?;
                        eprintln!("Exported {} entries", snapshot.records.len());
                    }
                    other => bail!("Unknown export format: {} (expected csv or json)", other),
                }
            }

            Commands::Import {
                input,
                format,
                dry_run,
            } => {
                let mut store = LedgerStore::open(&path);
                if store.load().await? == LoadOutcome::NoDataFile {
                    println!("No data file found. Starting fresh.");
                }

                let options = ImportOptions { dry_run };
                let reader: Box<dyn Read> = match &input {
                    Some(file) => Box::new(
                        File::open(file).with_context(|| format!("Failed to open {}", file))?,
                    ),
                    None => Box::new(std::io::stdin()),
                };

                let mut importer = Importer::new(&mut store);
                let result = match format.as_str() {
                    "csv" => importer.import_csv(reader, options)?,
                    "json" => importer.import_json(reader, options)?,
                    other => bail!("Unknown import format: {} (expected csv or json)", other),
                };

                report_import_errors(&result);

                if dry_run {
                    println!(
                        "Dry run: {} entries would be imported, {} skipped.",
                        result.imported, result.skipped
                    );
                } else {
                    store.save().await?;
                    println!("Data saved successfully.");
                    println!(
                        "Imported {} entries, skipped {}.",
                        result.imported, result.skipped
                    );
                }
            }
        }

        Ok(())
    }
}

fn report_import_errors(result: &ImportResult) {
    for error in &result.errors {
        match &error.field {
            Some(field) => eprintln!("  line {}: {} ({})", error.line, error.error, field),
            None => eprintln!("  line {}: {}", error.line, error.error),
        }
    }
}
