//! Atelier-Mirror main entry point
//!
//! Command-line interface for mirroring an authenticated content platform
//! into a local directory tree.

use atelier_mirror::config::load_config_with_hash;
use atelier_mirror::crawler::run_mirror;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Atelier-Mirror: mirror a hierarchical content platform to disk
///
/// Logs into the platform, walks every tenant's activity tree, downloads
/// the files it finds and writes a scraping report next to them.
#[derive(Parser, Debug)]
#[command(name = "atelier-mirror")]
#[command(version = "1.0.0")]
#[command(about = "Mirror a hierarchical content platform to disk", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the configured worker concurrency
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Validate config and show what would be mirrored without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("loading configuration from {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("configuration loaded (hash: {})", config_hash);

    if let Some(concurrency) = cli.concurrency {
        anyhow::ensure!(concurrency > 0, "--concurrency must be at least 1");
        config.concurrency = concurrency;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    tracing::info!(
        "mirroring {} into {} with {} worker(s)",
        config.base_url,
        config.output_dir.display(),
        config.concurrency
    );

    run_mirror(config).await?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("atelier_mirror=info,warn"),
            1 => EnvFilter::new("atelier_mirror=debug,info"),
            2 => EnvFilter::new("atelier_mirror=trace,debug"),
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

/// Handles --dry-run: prints the effective configuration and exits
fn handle_dry_run(config: &atelier_mirror::config::Config) {
    println!("=== Atelier-Mirror Dry Run ===\n");

    println!("Platform:");
    println!("  Base URL: {}", config.base_url);
    println!("  Login: {}", config.login);
    println!("  Password: {}", "*".repeat(config.password.len()));

    println!("\nCrawl:");
    println!("  Concurrency: {}", config.concurrency);
    println!("  Headless sessions: {}", config.headless);

    println!("\nOutput:");
    println!("  Directory: {}", config.output_dir.display());
    println!(
        "  Report: {}",
        config.output_dir.join("report.txt").display()
    );

    println!("\n✓ Configuration is valid");
}
