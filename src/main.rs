//! autoplayd - Main entry point
//!
//! Background daemon that loops numbered videos from removable media,
//! resuming where the previous run left off.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autoplayd::config::{self, Config};
use autoplayd::orchestrator::Orchestrator;
use autoplayd::player::CommandPlayerFactory;

/// Command-line arguments for autoplayd
#[derive(Parser, Debug)]
#[command(name = "autoplayd")]
#[command(about = "Loops numbered videos from removable media, resuming where it left off")]
#[command(version)]
struct Args {
    /// Parent directory scanned for mounted removable volumes
    #[arg(
        short,
        long,
        default_value = config::DEFAULT_STORAGE_ROOT,
        env = "AUTOPLAYD_STORAGE_ROOT"
    )]
    storage_root: PathBuf,

    /// Milliseconds between volume checks
    #[arg(
        short,
        long,
        default_value_t = config::DEFAULT_POLL_INTERVAL_MS,
        env = "AUTOPLAYD_POLL_INTERVAL_MS"
    )]
    poll_interval_ms: u64,

    /// External renderer command
    #[arg(
        long,
        default_value = config::DEFAULT_PLAYER_COMMAND,
        env = "AUTOPLAYD_PLAYER"
    )]
    player_command: String,

    /// Extra argument passed to the renderer (repeatable; replaces the defaults)
    #[arg(long = "player-arg")]
    player_args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autoplayd=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting autoplayd");
    info!("Storage root: {}", args.storage_root.display());
    info!("Renderer: {}", args.player_command);

    let player_args = if args.player_args.is_empty() {
        config::DEFAULT_PLAYER_ARGS
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        args.player_args
    };

    let factory = CommandPlayerFactory::new(args.player_command, player_args);
    let orch_config = Config::new(args.storage_root, args.poll_interval_ms);
    let handle = Orchestrator::spawn(orch_config, factory);

    shutdown_signal().await;

    info!("Shutdown requested, stopping orchestrator");
    handle.shutdown().await?;
    info!("Shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
