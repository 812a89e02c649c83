//! calidad CLI - Data Quality Scanning
//!
//! Command-line interface for calidad operations.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

mod basic;
mod scan;

// Re-export subcommand enums
pub use scan::ScanCommands;

/// calidad - Data Quality Scanning for Tabular Data in Pure Rust
#[derive(Parser)]
#[command(name = "calidad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display dataset information
    Info {
        /// Path to dataset file
        path: PathBuf,
    },
    /// Display first N rows of a dataset
    Head {
        /// Path to dataset file
        path: PathBuf,
        /// Number of rows to display
        #[arg(short = 'n', long, default_value = "10")]
        rows: usize,
    },
    /// Display dataset schema
    Schema {
        /// Path to dataset file
        path: PathBuf,
    },
    /// Data quality scan commands
    #[command(subcommand)]
    Scan(ScanCommands),
}

/// Run the calidad CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { path } => basic::cmd_info(&path),
        Commands::Head { path, rows } => basic::cmd_head(&path, rows),
        Commands::Schema { path } => basic::cmd_schema(&path),
        Commands::Scan(scan_cmd) => match scan_cmd {
            ScanCommands::Run { path, format } => scan::cmd_scan_run(&path, &format),
            ScanCommands::Report { path, output } => {
                scan::cmd_scan_report(&path, output.as_ref())
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
