//! Syndicate lookup command-line shell.
//!
//! Thin shell over `syndicate-lookup`: loads configuration, looks up each
//! identifier in turn and prints one line per result. Failed lookups are
//! output, not process errors.

mod input;
mod output;

use anyhow::{bail, Context, Result};
use clap::Parser;
use output::OutputFormat;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use syndicate_core::AppConfig;
use syndicate_lookup::{ErrorKind, LookupSummary, SyndicateClient};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "syndicate", author, version, about, long_about = None)]
struct Cli {
    /// National identifiers to look up (14 digits each)
    #[arg(value_name = "NATIONAL_ID")]
    identifiers: Vec<String>,

    /// Text file with one national identifier per line
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Pause between lookups in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Search page URL (overrides config)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the effective settings (after overrides) to the config file
    #[arg(long)]
    save_config: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Log filter used when `RUST_LOG` is unset.
///
/// Identifiers only appear at debug level, so the quiet default stays at info.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn,syndicate=info"
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> syndicate_core::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = AppConfig::load_from(path)?;
            config.apply_env(|key| std::env::var(key).ok());
            config
        }
        None => AppConfig::load_with_env()?,
    };

    if let Some(endpoint) = &cli.endpoint {
        config.lookup.endpoint.clone_from(endpoint);
    }
    if let Some(delay) = cli.delay_ms {
        config.batch.delay_between_lookups_ms = delay;
    }

    config.lookup.validate()?;
    Ok(config)
}

/// Persist settings to an explicit path, or to the platform config file.
fn save_config(config: &AppConfig, path: Option<&Path>) -> syndicate_core::Result<PathBuf> {
    let path = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => {
            config.save()?;
            AppConfig::config_path()?
        }
    };
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli).context("failed to load config")?;

    if cli.save_config {
        let path = save_config(&config, cli.config.as_deref()).context("failed to save config")?;
        info!("Saved config to {}", path.display());
    }

    let mut identifiers = cli.identifiers.clone();
    if let Some(path) = &cli.input {
        identifiers.extend(input::read_identifier_file(path)?);
    }
    if identifiers.is_empty() {
        if cli.save_config {
            return Ok(());
        }
        bail!("no national identifiers given; pass them as arguments or with --input");
    }

    info!(
        "Looking up {} identifier(s) against {}",
        identifiers.len(),
        config.lookup.endpoint
    );

    let client = SyndicateClient::new(&config.lookup);
    let delay = Duration::from_millis(config.batch.delay_between_lookups_ms);
    let mut summary = LookupSummary::default();
    let mut stdout = std::io::stdout().lock();

    for (index, identifier) in identifiers.into_iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let result = client.lookup(identifier).await;
        summary.record(&result);
        writeln!(stdout, "{}", output::render(&result, cli.format)?)?;
    }
    stdout.flush()?;

    eprintln!("{summary}");
    match summary.uniform_failure() {
        Some(ErrorKind::ValidationError) => {
            warn!("Every identifier failed validation; check the input column or file");
        }
        Some(ErrorKind::NetworkError) => {
            warn!("Every lookup failed on the network; check connectivity to the registry");
        }
        _ => {}
    }

    Ok(())
}
