use sql_table_usage::batch::{BatchDriver, QuerySource, DEFAULT_QUERY_COLUMN};
use sql_table_usage::extractor::TableExtractor;
use sql_table_usage::parser::DEFAULT_DIALECT;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "table-usage")]
#[command(about = "Count how often each table is accessed by a batch of SQL queries")]
#[command(version)]
struct Args {
    /// Data file holding the queries (.xlsx, .xls, .ods, .csv, .parquet, .json, .ndjson).
    /// Prompted for on stdin when omitted.
    file: Option<PathBuf>,

    /// Column holding the SQL text (or set SQL_USAGE_COLUMN env var)
    #[arg(short, long)]
    column: Option<String>,

    /// SQL dialect used for tokenizing (or set SQL_USAGE_DIALECT env var)
    #[arg(short, long)]
    dialect: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let column = args
        .column
        .or_else(|| std::env::var("SQL_USAGE_COLUMN").ok())
        .unwrap_or_else(|| DEFAULT_QUERY_COLUMN.to_string());
    let dialect = args
        .dialect
        .or_else(|| std::env::var("SQL_USAGE_DIALECT").ok())
        .unwrap_or_else(|| DEFAULT_DIALECT.to_string());

    let file = match args.file {
        Some(file) => file,
        None => prompt_file_name()?,
    };

    if !file.exists() {
        anyhow::bail!(
            "File not exist, please check file name. File name need to be in format of 'xxx.xlsx' (or .csv / .parquet / .json): {}",
            file.display()
        );
    }

    let extractor = TableExtractor::with_dialect(&dialect)
        .with_context(|| format!("Invalid --dialect '{}'", dialect))?;
    info!("Using SQL dialect '{}'", extractor.parser().dialect_name());

    let driver = BatchDriver::new(extractor);
    let source = QuerySource::new(file, column);
    let report = driver
        .run(&source)
        .with_context(|| format!("Failed to process {:?}", source.path()))?;

    let stdout = io::stdout();
    match args.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Csv => report.write_csv(stdout.lock())?,
    }

    Ok(())
}

fn prompt_file_name() -> Result<PathBuf> {
    print!("Please input file name:");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read file name from stdin")?;

    Ok(PathBuf::from(line.trim()))
}
