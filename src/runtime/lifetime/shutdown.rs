use std::time::Duration;

use tokio::signal;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::metrics::ExporterHandle;

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Wait for Ctrl+C, then stop sampling and the scrape endpoint.
pub async fn listen_for_shutdown(handle: &ExporterHandle, sampler: Option<JoinHandle<()>>) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping metrics exporter...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    if let Some(sampler) = sampler {
        sampler.abort();
    }

    match timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), handle.stop(true)).await {
        Ok(()) => info!("Metrics exporter shut down"),
        Err(_) => {
            error!(
                "Metrics endpoint did not stop within {} seconds, forcing stop",
                SHUTDOWN_TIMEOUT_SECS
            );
            handle.stop(false).await;
        }
    }
}
