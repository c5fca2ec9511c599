//! Drivemirror Daemon - Background one-way mirror service
//!
//! This binary loads the YAML configuration, wires the S3 source and Drive
//! destination adapters into the reconciliation engine, and either:
//! - runs one pass and prints its statistics (`--once`), or
//! - enters the poll loop, running a pass every `sync.poll_interval` seconds
//!   until SIGINT triggers a graceful shutdown after the current pass.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use drivemirror_core::config::Config;
use drivemirror_core::domain::AddressingMode;
use drivemirror_core::ports::{IDestinationStore, ISourceStore};
use drivemirror_gdrive::auth::RefreshTokenProvider;
use drivemirror_gdrive::client::DriveClient;
use drivemirror_gdrive::provider::DriveDestinationStore;
use drivemirror_s3::S3SourceStore;
use drivemirror_sync::engine::SyncEngine;
use drivemirror_sync::scheduler::SyncScheduler;

#[derive(Debug, Parser)]
#[command(
    name = "drivemirrord",
    version,
    about = "One-way S3 to Google Drive mirror daemon"
)]
struct Cli {
    /// Use alternate config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a single reconciliation pass and exit
    #[arg(long)]
    once: bool,

    /// With --once, print the pass statistics as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// CLI verbosity overrides the configured level; RUST_LOG overrides both.
fn init_tracing(config_level: &str, verbose: u8) {
    let level = match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_engine(config: &Config) -> Result<SyncEngine> {
    let mode: AddressingMode = config
        .sync
        .mode
        .parse()
        .context("Invalid sync.mode in configuration")?;

    let source: Arc<dyn ISourceStore> = Arc::new(
        S3SourceStore::new(&config.source).context("Failed to initialize S3 source store")?,
    );

    let tokens = Arc::new(
        RefreshTokenProvider::new(&config.destination.oauth)
            .context("Failed to initialize OAuth token provider")?,
    );
    let client = DriveClient::new(tokens);
    let dest: Arc<dyn IDestinationStore> = Arc::new(DriveDestinationStore::new(
        client,
        config.destination.root_folder_id.clone(),
    ));

    Ok(SyncEngine::new(source, dest, mode))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            config_path.display()
        )
    })?;

    init_tracing(&config.logging.level, cli.verbose);
    info!(config_path = %config_path.display(), "Loaded configuration");

    let errors = config.validate();
    if !errors.is_empty() {
        for err in &errors {
            error!(%err, "Invalid configuration");
        }
        bail!("Configuration is invalid ({} error(s))", errors.len());
    }

    let mut engine = build_engine(&config)?;

    if cli.once {
        let stats = engine.run_pass().await?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!("{stats}");
        }
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt signal, shutting down after the current pass");
            signal_token.cancel();
        }
    });

    let scheduler = SyncScheduler::new(
        engine,
        Duration::from_secs(config.sync.poll_interval),
        shutdown,
    );
    scheduler.run().await
}
