// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, shutdown, recovery.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use fs2::FileExt;
use rc_adapters::{GatewayAdapter, LogGateway, TracedGatewayAdapter};
use rc_core::SystemClock;
use rc_engine::Runtime;
use rc_storage::{SnapshotError, SnapshotStore};
use thiserror::Error;
use tokio::net::UnixListener;
use tracing::{info, warn};

use crate::settings::{Settings, SettingsError};

/// Gateway used by the daemon binary (wrapped with tracing)
pub type DaemonGateway = TracedGatewayAdapter<LogGateway>;

/// Runtime with the daemon's concrete clock
pub type DaemonRuntime<G> = Runtime<G, SystemClock>;

/// Daemon file locations
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding every file below
    pub state_dir: PathBuf,
    /// Path to Unix socket
    pub socket_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// Path to the optional settings file
    pub settings_path: PathBuf,
    /// Where `LogGateway` publishes the board
    pub board_path: PathBuf,
}

impl Config {
    pub fn for_state_dir(state_dir: &Path) -> Self {
        Self {
            state_dir: state_dir.to_path_buf(),
            socket_path: state_dir.join("rcd.sock"),
            lock_path: state_dir.join("rcd.pid"),
            log_path: state_dir.join("rcd.log"),
            settings_path: state_dir.join("rcd.toml"),
            board_path: state_dir.join("board.txt"),
        }
    }

    /// `$XDG_STATE_HOME/rcd`, falling back to `~/.local/state/rcd`
    pub fn default_state_dir() -> Result<PathBuf, LifecycleError> {
        if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
            return Ok(PathBuf::from(xdg).join("rcd"));
        }
        let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
        Ok(PathBuf::from(home).join(".local/state/rcd"))
    }
}

/// Daemon state during operation
pub struct DaemonState<G: GatewayAdapter> {
    /// Configuration (socket path resolved from settings)
    pub config: Config,
    pub settings: Settings,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Unix socket listener
    pub listener: UnixListener,
    /// Shared with reconnect tasks
    pub runtime: Arc<DaemonRuntime<G>>,
    /// When daemon started
    pub start_time: Instant,
    /// Shutdown requested flag
    pub shutdown_requested: bool,
}

impl<G: GatewayAdapter> DaemonState<G> {
    /// Fire due timers, then reconnect if the gateway dropped
    pub async fn tick(&mut self) {
        self.runtime.tick().await;
        self.maybe_reconnect();
    }

    /// Start a background reconnect if the executor saw the link drop.
    ///
    /// Commands arriving meanwhile are rejected as unavailable.
    pub fn maybe_reconnect(&self) {
        if !self.runtime.link_lost() || self.runtime.is_reconnecting() {
            return;
        }
        let runtime = Arc::clone(&self.runtime);
        tokio::spawn(async move {
            runtime.reconnect().await;
        });
    }

    /// Shutdown the daemon gracefully
    pub async fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        // 1. Persist claims and queues so a planned restart loses nothing
        self.runtime.shutdown().await;

        // 2. Remove socket file
        if self.config.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.socket_path) {
                warn!("Failed to remove socket file: {}", e);
            }
        }

        // 3. Remove PID file
        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // 4. Lock file is released automatically when self.lock_file is dropped

        info!("Daemon shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, std::io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon with the log-file gateway
pub async fn startup(config: &Config) -> Result<DaemonState<DaemonGateway>, LifecycleError> {
    let gateway = TracedGatewayAdapter::new(LogGateway::new(&config.board_path));
    startup_with(config, gateway).await
}

/// Start the daemon with the given gateway
pub async fn startup_with<G: GatewayAdapter>(
    config: &Config,
    gateway: G,
) -> Result<DaemonState<G>, LifecycleError> {
    match startup_inner(config, gateway).await {
        Ok(state) => Ok(state),
        // Another daemon owns these files
        Err(e @ LifecycleError::LockFailed(_)) => Err(e),
        Err(e) => {
            // Clean up any resources created before failure
            cleanup_on_failure(config);
            Err(e)
        }
    }
}

/// Inner startup logic - cleanup_on_failure called if this fails
async fn startup_inner<G: GatewayAdapter>(
    config: &Config,
    gateway: G,
) -> Result<DaemonState<G>, LifecycleError> {
    // 1. Create state directory (needed for socket, lock, etc.)
    std::fs::create_dir_all(&config.state_dir)?;

    // 2. Acquire lock file FIRST - prevents races
    let mut lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    // Write PID to lock file
    use std::io::Write;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    // 3. Load settings BEFORE binding socket (fail fast on bad config)
    let settings = Settings::load(&config.settings_path)?;
    let mut config = config.clone();
    if let Some(socket_path) = &settings.socket_path {
        config.socket_path = socket_path.clone();
    }

    // 4. Remove stale socket and bind (before recovery, which consumes the
    //    snapshot records)
    if let Some(parent) = config.socket_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if config.socket_path.exists() {
        std::fs::remove_file(&config.socket_path)?;
    }
    let listener = UnixListener::bind(&config.socket_path)
        .map_err(|e| LifecycleError::BindFailed(config.socket_path.clone(), e))?;

    // 5. Connect the gateway, then rebuild state from the snapshot records (LAST)
    let store = SnapshotStore::open(&config.state_dir)?;
    let runtime = Runtime::new(gateway, store, SystemClock, settings.runtime_config());
    runtime.connect_with_retry().await;
    let report = runtime.recover().await;

    info!(
        claims = report.claims_restored,
        expired = report.claims_expired,
        queued = report.entries_restored,
        offers = report.offers_restored,
        "state recovered"
    );

    info!("Daemon started in {}", config.state_dir.display());

    Ok(DaemonState {
        config,
        settings,
        lock_file,
        listener,
        runtime: Arc::new(runtime),
        start_time: Instant::now(),
        shutdown_requested: false,
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    // Remove socket if we created it
    if config.socket_path.exists() {
        let _ = std::fs::remove_file(&config.socket_path);
    }

    // Remove PID/lock file
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
