//! Robofinder main entry point
//!
//! This is the command-line interface for the robots.txt history harvester.

use clap::Parser;
use robofinder::config::{self, Config};
use robofinder::crawler::{run_pipeline, shutdown};
use robofinder::output::{FileOutput, OutputHandler, WriterOutput};
use robofinder::{RoboError, WaybackProvider};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Robofinder: harvests paths from archived robots.txt files
///
/// Robofinder looks up every archived copy of a site's robots.txt, fetches
/// them concurrently and prints the unique paths, patterns and sitemap URLs
/// they ever listed.
#[derive(Parser, Debug)]
#[command(name = "robofinder")]
#[command(version)]
#[command(about = "Harvests paths from archived robots.txt files", long_about = None)]
struct Cli {
    /// Target site (e.g. example.com or https://example.com)
    #[arg(short, long)]
    url: String,

    /// Write the path list to this file as well as stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of snapshots fetched concurrently
    #[arg(short, long, value_name = "N")]
    threads: Option<usize>,

    /// Concatenate paths with the site URL
    #[arg(short = 'c', long)]
    concatenate: bool,

    /// Also collect User-agent and Crawl-delay values
    #[arg(long)]
    all_directives: bool,

    /// Optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug diagnostics on stderr
    #[arg(long, conflicts_with = "quiet")]
    debug: bool,

    /// Suppress all diagnostics, including errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Layers command-line values over the loaded configuration
    fn apply(&self, config: &mut Config) {
        config.site = self.url.trim_end_matches('/').to_string();
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(threads) = self.threads {
            config.concurrency = threads;
        }
        config.concatenate |= self.concatenate;
        config.all_directives |= self.all_directives;
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on the debug/quiet flags
    setup_logging(cli.debug, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(RoboError::Interrupted) => {
            eprintln!("Keyboard interrupt detected, stopping processing.");
            ExitCode::from(RoboError::Interrupted.exit_code())
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Sets up the logging/tracing subscriber
///
/// Diagnostics go to stderr so that stdout carries only the path list.
/// Without `--debug` only fatal errors are reported.
fn setup_logging(debug: bool, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_directives(debug, quiet)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn log_directives(debug: bool, quiet: bool) -> &'static str {
    if quiet {
        "off"
    } else if debug {
        "robofinder=debug,warn"
    } else {
        "error"
    }
}

async fn run(cli: Cli) -> robofinder::Result<()> {
    let start_time = Instant::now();
    tracing::debug!("Starting the program");

    let mut config = match &cli.config {
        Some(path) => {
            tracing::debug!("Loading configuration from: {}", path.display());
            config::load_config(path)?
        }
        None => Config::default(),
    };
    cli.apply(&mut config);
    config::validate(&config)?;

    // Ctrl+C flips the shared shutdown flag; workers stop at their next await
    let (trigger, shutdown) = shutdown::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.trigger();
        }
    });

    let mut outputs: Vec<Box<dyn OutputHandler>> = Vec::new();
    if let Some(path) = &config.output {
        outputs.push(Box::new(FileOutput::new(path)));
    }
    outputs.push(Box::new(WriterOutput::stdout()));

    let provider = WaybackProvider::new(&config.discovery, &config.fetch)?;
    let summary = run_pipeline(config, provider, &mut outputs, &shutdown).await?;

    tracing::debug!(
        "Done: {} unique paths from {}/{} snapshots in {:.2?}",
        summary.unique_paths,
        summary.snapshots_fetched,
        summary.snapshots_discovered,
        start_time.elapsed()
    );
    Ok(())
}
