use std::path::PathBuf;

use clap::Parser;
use mix_report::run::{DEFAULT_REPORT_NAME, build_report};
use mix_report::{ReportError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.join(DEFAULT_REPORT_NAME));
    let counters = build_report(&cli.input, &output)?;

    println!("Processed files: {}", counters.files_processed);
    println!("Included rows (Main Mixes): {}", counters.included_main);
    println!(
        "Included rows (Additional Mixes): {}",
        counters.included_additional
    );
    println!(
        "Skipped rows (blank Item Description): {}",
        counters.skipped_blank_description
    );
    println!(
        "Skipped rows (non-numeric Qty Value): {}",
        counters.skipped_non_numeric_qty
    );
    println!("Report written to: {}", output.display());
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ReportError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Summarize monthly concrete-delivery workbooks into a CSV report."
)]
struct Cli {
    /// Directory containing the monthly .xlsx delivery workbooks.
    #[arg(long)]
    input: PathBuf,

    /// Output CSV path (default: Mix_Report.csv inside the input directory).
    #[arg(long)]
    output: Option<PathBuf>,
}
