use analytics::{PerformanceAggregator, ReportTotals};
use anyhow::{Context, Result};
use api_client::{fetch_snapshot, HttpBackendClient};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use configuration::Config;
use core_types::{parse_month, DateRange, RawSnapshot, ReportPeriod};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

mod render;

/// The main entry point for the Harvest Ledger reporting tool.
#[tokio::main]
async fn main() -> ExitCode {
    // Load HARVEST__* overrides from a .env file when one is present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match configuration::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = match configuration::init_tracing(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error initializing logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Report(args) => handle_report(args, &config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Employee performance reports for a coconut-harvesting service.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file. Without it an optional `config.toml` is read.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trees harvested, attributed sales, salary paid and balance per employee.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// First day of the report, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day of the report, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// A whole calendar month (format: YYYY-MM). Ignored when --from or --to is given.
    #[arg(long)]
    month: Option<String>,

    /// Quick-select period used when no dates or month are given.
    #[arg(long, value_enum)]
    period: Option<ReportPeriod>,

    /// Read employees, sales and salaries from a JSON file instead of the backend.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Handles the orchestration of the report: range, snapshot, aggregation, output.
async fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    let range = resolve_range(&args, config.report.default_period, today)?;

    // Reject a reversed range before anything is fetched.
    range.validate()?;
    info!(range = %render::describe_range(&range), "Building employee report.");

    let raw = match &args.snapshot {
        Some(path) => load_snapshot_file(path)?,
        None => fetch_from_backend(config).await?,
    };
    let snapshot = raw.normalize();

    let rows = PerformanceAggregator::new()
        .aggregate_snapshot(&snapshot, &range)
        .context("Failed to aggregate employee performance")?;
    let totals = ReportTotals::from_summaries(&rows);
    info!(rows = rows.len(), "Employee report ready.");

    let output = match args.format {
        OutputFormat::Table => render::render_table(&rows, &totals, &range),
        OutputFormat::Json => render::render_json(&rows, &totals, &range)?,
    };
    println!("{}", output);

    Ok(())
}

/// Explicit dates win over a month, which wins over a period preset.
fn resolve_range(
    args: &ReportArgs,
    default_period: ReportPeriod,
    today: NaiveDate,
) -> Result<DateRange> {
    if args.from.is_some() || args.to.is_some() {
        return Ok(DateRange::new(args.from, args.to));
    }
    if let Some(month) = &args.month {
        let (year, month) = parse_month(month)?;
        return Ok(DateRange::month(year, month)?);
    }
    Ok(args.period.unwrap_or(default_period).range(today))
}

fn load_snapshot_file(path: &Path) -> Result<RawSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;
    let snapshot: RawSnapshot = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse snapshot file {}", path.display()))?;
    info!(path = %path.display(), "Loaded snapshot from file.");
    Ok(snapshot)
}

async fn fetch_from_backend(config: &Config) -> Result<RawSnapshot> {
    let client = HttpBackendClient::new(&config.api).context("Failed to build HTTP client")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!(
        "Fetching employees, sales and salaries from {}...",
        client.base_url()
    ));

    let result = fetch_snapshot(&client).await;
    spinner.finish_and_clear();

    result.context("Failed to fetch report data from the backend")
}
