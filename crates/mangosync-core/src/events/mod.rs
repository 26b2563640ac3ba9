use tracing::info;

use crate::config::SyncConfig;

pub fn log_daemon_startup(config: &SyncConfig) {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        process_prefix = %config.target.process_prefix,
        env_var = %config.target.env_var
    );
}

pub fn log_daemon_shutdown() {
    info!(event = "core.app.shutdown_started");
}
