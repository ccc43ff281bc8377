#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use ledgen::ledger::local::LocalLedger;
use ledgen::scenario::{ScenarioConfig, run_scenario};
use tokio_util::sync::CancellationToken;

use crate::config::CliArgs;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ScenarioConfig::try_from(args)?;

    telemetry::init_telemetry();

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_for_shutdown(shutdown.clone()));

    let client = Arc::new(LocalLedger::new());
    let result = run_scenario(client, &config, shutdown.clone()).await?;

    println!(
        "{} of {} recipient accounts created and associated.",
        result.completed(),
        result.requested
    );
    println!("secrets ledger: {}", config.secrets_path.display());
    println!("distribution plan: {}", config.distribution_path.display());

    if let Some(err) = &result.failure {
        eprintln!("scenario aborted early: {err}");
        return Ok(ExitCode::FAILURE);
    }
    if shutdown.is_cancelled() {
        eprintln!("scenario interrupted before completion");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Turns Ctrl+C or SIGTERM into cooperative batch cancellation: no new
/// recipient work starts, in-flight items resolve, and the sink drains.
async fn watch_for_shutdown(shutdown: CancellationToken) {
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }

    tracing::info!("shutdown signal received, finishing in-flight work");
    shutdown.cancel();
}
