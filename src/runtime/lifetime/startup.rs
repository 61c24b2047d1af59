use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::MetricsConfig;
use crate::metrics::{MetricsExporter, SystemInfoProvider, spawn_resource_sampler};

pub struct StartupContext {
    pub exporter: MetricsExporter,
    pub sampler: Option<JoinHandle<()>>,
}

/// 准备导出器启动的上下文
/// 包括指标注册、抓取端点和资源采样任务
pub async fn prepare_exporter_startup(config: &MetricsConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    // 关闭时不启动采样任务，所有更新本来就是 no-op，周期也无需校验
    // 校验放在绑定端口之前，失败时不会留下监听
    let period = if config.enabled {
        Some(
            config
                .sample_interval()
                .context("Invalid resource sampler configuration")?,
        )
    } else {
        warn!("Metrics collection is disabled in configuration");
        None
    };

    let provider = Arc::new(SystemInfoProvider::new());
    let exporter =
        MetricsExporter::init(config, provider).context("Failed to initialize metrics exporter")?;

    let sampler = period.map(|period| {
        debug!("Resource sampler running every {:?}", period);
        spawn_resource_sampler(exporter.facade().clone(), period)
    });

    info!(
        "Exporter startup completed in {:?}",
        start_time.elapsed()
    );

    Ok(StartupContext { exporter, sampler })
}
