//! match-stats main entry point
//!
//! This is the command-line interface for the match statistics scraper.

use anyhow::Context;
use clap::Parser;
use match_stats::config::{load_config_with_hash, Config};
use match_stats::crawler::Coordinator;
use match_stats::output::print_statistics;
use match_stats::Season;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// match-stats: football fixtures joined with shooting statistics
///
/// Walks a competition's standings pages back through recent seasons,
/// joins every team's fixtures with its shooting match log, and writes the
/// competition's matches to a CSV file. Requests are spaced out to respect
/// the site's rate limit, so a full run takes a long time.
#[derive(Parser, Debug)]
#[command(name = "match-stats")]
#[command(version)]
#[command(about = "Scrape match and shooting statistics into a CSV file", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Write the CSV here instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Validate config and show the planned walk without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_scrape(config, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("match_stats=info,warn"),
            1 => EnvFilter::new("match_stats=debug,info"),
            2 => EnvFilter::new("match_stats=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the planned walk
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config.clone())?;
    let scraper = &config.scraper;

    println!("=== match-stats Dry Run ===\n");

    println!("Target:");
    println!("  Standings page: {}", coordinator.start_url());
    println!("  Competition: {}", scraper.competition);
    println!("  Request delay: {}ms", scraper.request_delay_ms);
    match scraper.max_teams {
        Some(max) => println!("  Teams per season: at most {}", max),
        None => println!("  Teams per season: all"),
    }

    println!("\nSeasons ({}):", scraper.seasons);
    let mut season: Season = coordinator.season();
    for _ in 0..scraper.seasons {
        println!("  - {}", season);
        season = season.previous();
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());
    println!("Output: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config, quiet: bool) -> anyhow::Result<()> {
    let mut coordinator = Coordinator::new(config)?;

    match coordinator.run().await {
        Ok(stats) => {
            tracing::info!("Scrape completed successfully");
            if !quiet {
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
