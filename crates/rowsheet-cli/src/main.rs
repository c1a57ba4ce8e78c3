//! rowsheet CLI - append and read delimited records as spreadsheet rows

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rowsheet::{RowStore, StoreOptions};

#[derive(Parser)]
#[command(name = "rowsheet")]
#[command(author, version, about = "Append and read comma-separated records in .xlsx sheets")]
struct Cli {
    /// Diagnostic log file (default: $ROWSHEET_LOG or ./error_log.txt)
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a record as the next row; prints the row number used
    Write {
        /// Spreadsheet file (created if missing)
        file: PathBuf,
        /// Sheet name (created if missing)
        sheet: String,
        /// Comma-separated record
        record: String,
    },

    /// Print the number of data rows in a sheet
    Count {
        /// Spreadsheet file
        file: PathBuf,
        /// Sheet name
        sheet: String,
    },

    /// Print one row as a comma-separated record
    Read {
        /// Spreadsheet file
        file: PathBuf,
        /// Sheet name
        sheet: String,
        /// Row number, starting at 1
        #[arg(allow_negative_numbers = true)]
        row: i64,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Spreadsheet file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut options = StoreOptions::default();
    if let Some(log) = cli.log {
        options = options.with_log_path(log);
    }
    let store = RowStore::new(options);

    match cli.command {
        Commands::Write {
            file,
            sheet,
            record,
        } => write_record(&store, &file, &sheet, &record),
        Commands::Count { file, sheet } => count_rows(&store, &file, &sheet),
        Commands::Read { file, sheet, row } => read_row(&store, &file, &sheet, row),
        Commands::Sheets { file } => list_sheets(&store, &file),
    }
}

fn write_record(store: &RowStore, file: &Path, sheet: &str, record: &str) -> Result<()> {
    let row = store
        .append_record(file, sheet, record)
        .with_context(|| format!("Failed to append to '{}' in '{}'", sheet, file.display()))?;
    println!("{}", row);
    Ok(())
}

fn count_rows(store: &RowStore, file: &Path, sheet: &str) -> Result<()> {
    let count = store
        .row_count(file, sheet)
        .with_context(|| format!("Failed to count rows of '{}' in '{}'", sheet, file.display()))?;
    println!("{}", count);
    Ok(())
}

fn read_row(store: &RowStore, file: &Path, sheet: &str, row: i64) -> Result<()> {
    let record = store.read_row(file, sheet, row).with_context(|| {
        format!(
            "Failed to read row {} of '{}' in '{}'",
            row,
            sheet,
            file.display()
        )
    })?;
    println!("{}", record);
    Ok(())
}

fn list_sheets(store: &RowStore, file: &Path) -> Result<()> {
    let names = store
        .sheet_names(file)
        .with_context(|| format!("Failed to open '{}'", file.display()))?;

    println!("Sheets in '{}':", file.display());
    for (i, name) in names.iter().enumerate() {
        println!("  {}: {}", i, name);
    }
    Ok(())
}
