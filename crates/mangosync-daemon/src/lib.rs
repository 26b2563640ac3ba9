//! mangosync-daemon: the mangosyncd background process.
//!
//! A thin shell around [`mangosync_core::SyncScheduler`]: load configuration,
//! install signal handling, run the sync loop until cancelled. All the
//! interesting behavior lives in mangosync-core.

use mangosync_core::config::SyncConfig;
use mangosync_core::events;
use mangosync_core::sync::SyncScheduler;
use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Run the sync loop against the real process table until `shutdown` fires.
pub async fn run(config: SyncConfig, shutdown: CancellationToken) {
    run_scheduler(SyncScheduler::new(config), shutdown).await;
}

/// Run a pre-built scheduler to completion. Tests use this with a scheduler
/// pointed at a scratch process table.
pub async fn run_scheduler(scheduler: SyncScheduler, shutdown: CancellationToken) {
    events::log_daemon_startup(scheduler.config());
    scheduler.run(shutdown).await;
    events::log_daemon_shutdown();
}

/// Wait for SIGINT or SIGTERM.
///
/// If the SIGTERM handler cannot be installed the daemon still responds to
/// ctrl-c, so service managers can always stop it.
pub async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            warn!(event = "daemon.signal.install_failed", error = %e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(event = "daemon.signal.wait_failed", error = %e);
            }
            return;
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => info!(event = "daemon.signal.interrupt_received"),
                Err(e) => error!(event = "daemon.signal.wait_failed", error = %e),
            }
        }
        _ = sigterm.recv() => {
            info!(event = "daemon.signal.terminate_received");
        }
    }
}

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails; the daemon should come up
/// and start mirroring even with a broken config file on disk.
pub fn load_config_with_warning() -> SyncConfig {
    match SyncConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(
                event = "daemon.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            SyncConfig::default()
        }
    }
}
