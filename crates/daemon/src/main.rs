// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Respawn Claim Daemon (rcd)
//!
//! Owns the claim scheduler, fires its timers, and serves holder commands
//! over a Unix socket. Usage: `rcd [STATE_DIR]`.

use std::io::Write;
use std::path::PathBuf;

use rc_adapters::GatewayAdapter;
use rc_daemon::lifecycle::{self, Config, DaemonState, LifecycleError};
use rc_daemon::server;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

/// Marker line appended to the log before tracing starts.
/// Full format: "--- rcd: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- rcd: starting (pid: ";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let state_dir = match std::env::args().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => Config::default_state_dir()?,
    };
    let config = Config::for_state_dir(&state_dir);

    append_log_line(
        &config,
        &format!("{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id()),
    )?;
    let log_guard = setup_logging(&config)?;
    info!(state_dir = %state_dir.display(), "starting rcd");

    let daemon = match lifecycle::startup(&config).await {
        Ok(d) => d,
        Err(e) => {
            // The non-blocking writer may not flush before exit
            let _ = append_log_line(&config, &format!("ERROR Failed to start daemon: {}", e));
            error!(error = %e, "failed to start daemon");
            drop(log_guard);
            return Err(e.into());
        }
    };

    info!(socket = %daemon.config.socket_path.display(), "daemon ready");
    println!("READY");

    serve(daemon).await?;
    info!("daemon stopped");
    Ok(())
}

/// Accept connections and poll timers until a signal or a shutdown request
async fn serve<G: GatewayAdapter>(mut daemon: DaemonState<G>) -> Result<(), LifecycleError> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let poll_interval = daemon.settings.poll_interval;

    loop {
        tokio::select! {
            accepted = daemon.listener.accept() => match accepted {
                Ok((stream, _)) => {
                    if let Err(e) = server::handle_connection(&mut daemon, stream).await {
                        error!(error = %e, "connection failed");
                    }
                }
                Err(e) => error!(error = %e, "accept failed"),
            },
            _ = tokio::time::sleep(poll_interval) => daemon.tick().await,
            _ = sigterm.recv() => {
                info!("SIGTERM received");
                break;
            }
            _ = sigint.recv() => {
                info!("SIGINT received");
                break;
            }
        }

        if daemon.shutdown_requested {
            info!("shutdown requested by client");
            break;
        }
    }

    daemon.shutdown().await
}

fn append_log_line(config: &Config, line: &str) -> Result<(), LifecycleError> {
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let dir = config.log_path.parent().ok_or(LifecycleError::NoStateDir)?;
    let file = config
        .log_path
        .file_name()
        .ok_or(LifecycleError::NoStateDir)?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));

    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer))
        .init();

    Ok(guard)
}
