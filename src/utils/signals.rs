//! Signal handling for graceful shutdown

use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::info;

/// Wait for SIGTERM or SIGINT and return the signal number received
pub async fn shutdown_signal() -> std::io::Result<i32> {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])?;
    let handle = signals.handle();

    let signal = signals.next().await.unwrap_or(signal_hook::consts::SIGTERM);
    info!("Received signal: {}", signal);
    handle.close();

    Ok(signal)
}
