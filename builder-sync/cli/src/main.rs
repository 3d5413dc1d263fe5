//! builder-sync - keep the builder registry in step with block production

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use builder_sync::config::{
    AGGREGATED_OUTPUT_PATH, REGISTRY_JSON_PATH, REGISTRY_LISTING_PATH, STATS_SNAPSHOT_PATH,
};
use builder_sync::dates::{date_range, format_date};
use builder_sync::stats::{RelayscanSource, collect_days, render_hierarchy, write_counts};
use builder_sync::{StatsConfig, StatsError, check_consistency, regenerate_listing};
use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod output;

#[derive(Parser)]
#[command(name = "builder-sync")]
#[command(version)]
#[command(about = "Aggregate builder block statistics and keep the builder registry in sync", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch daily builder stats and write aggregated block counts
    Stats {
        /// First day to fetch, YYYY-MM-DD (inclusive)
        #[arg(short, long, value_name = "DATE")]
        start: Option<String>,

        /// Last day to fetch, YYYY-MM-DD (inclusive)
        #[arg(short, long, value_name = "DATE")]
        end: Option<String>,

        /// Days ending yesterday to fetch when --start/--end are not both given [default: 7]
        #[arg(short, long, value_name = "N")]
        days: Option<u32>,

        /// Where to write the aggregated counts
        #[arg(short, long, value_name = "FILE", default_value = AGGREGATED_OUTPUT_PATH)]
        output: PathBuf,
    },

    /// Compare the registry JSON with the stats snapshot
    Check,

    /// Re-rank the registry listing by aggregated block counts
    Regen,
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,builder_sync=info".to_string(),
            2 => "info,builder_sync=debug".to_string(),
            _ => "debug,builder_sync=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity);

    match cli.command {
        Commands::Stats {
            start,
            end,
            days,
            output,
        } => run_stats(start, end, days, &output).await,
        Commands::Check => run_check(),
        Commands::Regen => run_regen(),
    }
}

async fn run_stats(
    start: Option<String>,
    end: Option<String>,
    days: Option<u32>,
    output: &Path,
) -> Result<ExitCode> {
    let mut config = StatsConfig::from_env();
    if let Some(days) = days {
        config = config.lookback_days(days);
    }

    let today = chrono::Utc::now().date_naive();
    let dates = date_range(start.as_deref(), end.as_deref(), config.lookback_days, today)?;
    if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
        println!(
            "Fetching builder stats from {} to {} ({} days)",
            format_date(*first),
            format_date(*last),
            dates.len()
        );
    }
    info!(base_url = %config.base_url, days = dates.len(), "Starting stats run");

    let source = RelayscanSource::new(&config)?;
    let aggregate = match collect_days(&source, &dates).await {
        Ok(aggregate) => aggregate,
        Err(StatsError::NoData) => {
            eprintln!("No data retrieved for any day in the requested range");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    println!("{}", render_hierarchy(&aggregate));
    write_counts(output, &aggregate.counts)?;
    output::print_stats_summary(&aggregate, output);

    Ok(ExitCode::SUCCESS)
}

fn run_check() -> Result<ExitCode> {
    let report = check_consistency(Path::new(REGISTRY_JSON_PATH), Path::new(STATS_SNAPSHOT_PATH))?;
    print!("{}", report.render());

    Ok(if report.has_issues() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_regen() -> Result<ExitCode> {
    let listing = Path::new(REGISTRY_LISTING_PATH);
    let regenerated = regenerate_listing(listing, Path::new(AGGREGATED_OUTPUT_PATH))?;
    output::print_regen_summary(&regenerated, listing);

    Ok(ExitCode::SUCCESS)
}
