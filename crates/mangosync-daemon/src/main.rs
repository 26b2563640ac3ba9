use mangosync_core::init_logging;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    init_logging(false);

    let config = mangosync_daemon::load_config_with_warning();

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        mangosync_daemon::shutdown_signal().await;
        signal_token.cancel();
    });

    mangosync_daemon::run(config, shutdown).await;
}
