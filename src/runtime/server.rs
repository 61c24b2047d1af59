//! Server mode
//!
//! Starts the exporter and keeps the process alive until Ctrl+C.

use anyhow::Result;

use crate::runtime::lifetime;

/// Run the exporter process
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = crate::config::get_config();

    let startup = lifetime::startup::prepare_exporter_startup(&config.metrics)
        .await
        .map_err(|e| {
            tracing::error!("Exporter startup failed: {:#}", e);
            e
        })?;

    lifetime::shutdown::listen_for_shutdown(startup.exporter.handle(), startup.sampler).await;

    Ok(())
}
