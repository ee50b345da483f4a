use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Parser;
use classbell_app::bootstrap::build_runner;
use classbell_app::watch::run_watch;
use classbell_core::config::load_config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

/// Sends class reminders that are due right now.
#[derive(Debug, Parser)]
#[command(name = "classbell", version)]
struct Cli {
    /// Config file to read instead of `classbell.toml`.
    #[arg(long, env = "CLASSBELL_CONFIG")]
    config: Option<PathBuf>,

    /// Evaluate the tick at this instant (RFC 3339) instead of the current time.
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Keep running, one tick every MINUTES, until interrupted.
    #[arg(long, value_name = "MINUTES", value_parser = clap::value_parser!(u64).range(1..))]
    watch: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting classbell reminder job");

    let config = load_config(cli.config.as_deref())?;

    tracing::debug!(config = ?config.reminders, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let runner = build_runner(&config)?;

    let Some(minutes) = cli.watch else {
        let now = cli.now.unwrap_or_else(Utc::now);
        runner.run_tick(now).await?;
        return Ok(());
    };

    tracing::info!(minutes, "Running a tick every {minutes} minute(s)");
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    run_watch(&runner, Duration::from_secs(minutes * 60), shutdown).await;

    Ok(())
}
