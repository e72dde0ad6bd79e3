use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use syndata_core::{load_schema, Error as CoreError};
use syndata_generate::output::csv::write_dataset_csv;
use syndata_generate::{
    validate_csv, Domain, GenerateOptions, GenerationEngine, GenerationError,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("schema error: {0}")]
    Schema(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Parser, Debug)]
#[command(name = "syndata", version, about = "SynData-ESG synthetic data toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a synthetic dataset from a schema document.
    Generate(GenerateArgs),
    /// Validate an uploaded CSV dataset against domain rules.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Path to the YAML schema document.
    #[arg(long)]
    schema: PathBuf,
    /// Domain whose business rules correct each record.
    #[arg(long, value_enum)]
    domain: Option<DomainArg>,
    /// Number of records to generate.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(10..=1000))]
    records: u64,
    /// Random seed for reproducibility.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Output CSV file path.
    #[arg(long, default_value = "synthetic_output.csv")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Path to the uploaded CSV dataset.
    #[arg(long)]
    input: PathBuf,
    /// Domain whose rules the rows are checked against.
    #[arg(long, value_enum)]
    domain: DomainArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DomainArg {
    Ghg,
    Ccs,
}

impl From<DomainArg> for Domain {
    fn from(value: DomainArg) -> Self {
        match value {
            DomainArg::Ghg => Domain::Ghg,
            DomainArg::Ccs => Domain::Ccs,
        }
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Validate(args) => run_validate(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let timer = Instant::now();
    tracing::info!(event = "run_started", schema = %args.schema.display());

    let schema = load_schema(&args.schema)?;
    let options = GenerateOptions {
        records: args.records,
        seed: args.seed,
    };
    let engine = GenerationEngine::new(options);
    let dataset = engine.run(&schema, args.domain.map(Domain::from))?;

    let bytes_written = write_dataset_csv(&args.output, &dataset)?;
    tracing::info!(
        event = "run_finished",
        status = "success",
        rows = dataset.rows.len(),
        bytes_written,
        duration_ms = timer.elapsed().as_millis() as u64,
        output = %args.output.display()
    );
    println!(
        "wrote {} records to {}",
        dataset.rows.len(),
        args.output.display()
    );
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    let domain = Domain::from(args.domain);
    let issues = validate_csv(&args.input, domain)?;

    if issues.is_empty() {
        println!("no validation errors");
        return Ok(());
    }

    for issue in &issues {
        println!("row {}: {}", issue.line, issue.joined());
    }
    println!("{} row(s) with validation errors", issues.len());
    std::process::exit(1);
}
