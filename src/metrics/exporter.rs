//! Scrape endpoint
//!
//! Binds the registry to an HTTP listener serving the Prometheus text
//! format at `/metrics`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use chrono::{DateTime, Utc};
use tracing::{error, info};

use super::{MetricRegistry, ResourceSnapshotProvider, SamplingFacade};
use crate::config::MetricsConfig;
use crate::errors::{ExporterError, Result};

/// Scrape path served by the exporter
pub const METRICS_PATH: &str = "/metrics";

/// Worker threads serving scrape requests
pub const EXPORTER_WORKERS: usize = 2;

/// Process-wide exporter state, created once at startup
#[derive(Debug)]
pub struct ExporterState {
    enabled: bool,
    bind_address: String,
    registration_complete: AtomicBool,
}

impl ExporterState {
    pub fn new(enabled: bool, bind_address: impl Into<String>) -> Self {
        Self {
            enabled,
            bind_address: bind_address.into(),
            registration_complete: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &MetricsConfig) -> Self {
        Self::new(config.enabled, config.bind_address.clone())
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn bind_address(&self) -> &str {
        &self.bind_address
    }

    pub fn registration_complete(&self) -> bool {
        self.registration_complete.load(Ordering::Acquire)
    }

    /// Claim the one-time registration. Fails if it already happened.
    fn claim_registration(&self) -> Result<()> {
        self.registration_complete
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| {
                ExporterError::already_registered(format!(
                    "metrics already registered with an endpoint on {}",
                    self.bind_address
                ))
            })
    }
}

// 导出器启动时间
#[derive(Clone, Debug)]
pub struct ExporterStartTime {
    pub start_datetime: DateTime<Utc>,
}

/// Handle metrics export request
pub async fn metrics_handler(
    registry: web::Data<Arc<MetricRegistry>>,
    start_time: web::Data<ExporterStartTime>,
) -> impl Responder {
    let uptime = (Utc::now() - start_time.start_datetime)
        .num_seconds()
        .max(0) as f64;
    registry.uptime_seconds.set(uptime);

    match registry.export() {
        Ok(output) => HttpResponse::Ok()
            .content_type(prometheus::TEXT_FORMAT)
            .body(output),
        Err(e) => {
            error!("Failed to export metrics: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain")
                .body(e.format_simple())
        }
    }
}

/// Routes served by the scrape endpoint
pub fn metrics_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(METRICS_PATH, web::get().to(metrics_handler));
}

/// Owns the network-facing scrape endpoint
pub struct MetricsExporterService {
    state: Arc<ExporterState>,
    registry: Arc<MetricRegistry>,
}

impl MetricsExporterService {
    pub fn new(state: Arc<ExporterState>, registry: Arc<MetricRegistry>) -> Self {
        Self { state, registry }
    }

    /// Bind the listener and start serving scrapes.
    ///
    /// Must run inside a tokio runtime; plain tokio and actix both work.
    /// The registry can be registered with an endpoint only once per
    /// [`ExporterState`].
    pub fn start(&self) -> Result<ExporterHandle> {
        if self.state.registration_complete() {
            return Err(ExporterError::already_registered(format!(
                "metrics already registered with an endpoint on {}",
                self.state.bind_address()
            )));
        }

        let registry = self.registry.clone();
        let start_time = ExporterStartTime {
            start_datetime: Utc::now(),
        };

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(registry.clone()))
                .app_data(web::Data::new(start_time.clone()))
                .configure(metrics_routes)
        })
        .workers(EXPORTER_WORKERS)
        .disable_signals()
        .bind(self.state.bind_address())
        .map_err(|e| {
            ExporterError::bind(format!(
                "failed to bind metrics endpoint on {}: {}",
                self.state.bind_address(),
                e
            ))
        })?;

        self.state.claim_registration()?;

        let local_addrs = server.addrs();
        let server = server.run();
        let handle = server.handle();
        tokio::spawn(async move {
            if let Err(e) = server.await {
                error!("Metrics endpoint stopped with error: {}", e);
            }
        });

        info!(
            "Metrics endpoint listening on http://{}{}",
            self.state.bind_address(),
            METRICS_PATH
        );

        Ok(ExporterHandle {
            handle,
            local_addrs,
        })
    }
}

/// Running scrape endpoint
pub struct ExporterHandle {
    handle: ServerHandle,
    local_addrs: Vec<SocketAddr>,
}

impl ExporterHandle {
    /// Addresses the listener actually bound (resolves port 0)
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    /// Stop serving scrapes. The exporter cannot be started again.
    pub async fn stop(&self, graceful: bool) {
        self.handle.stop(graceful).await;
        info!("Metrics endpoint stopped");
    }
}

/// Exporter context: state, registry, facade and the running endpoint.
///
/// Created once at startup and shared by reference with every component
/// that reports metrics.
pub struct MetricsExporter {
    state: Arc<ExporterState>,
    registry: Arc<MetricRegistry>,
    facade: Arc<SamplingFacade>,
    handle: ExporterHandle,
}

impl MetricsExporter {
    /// Build the instrument set and start the scrape endpoint.
    ///
    /// This is the only fallible step: a malformed, empty, unavailable or
    /// busy bind address is reported here, as is a registration failure.
    /// Callers may treat the error as fatal or keep running without
    /// metrics export.
    pub fn init(
        config: &MetricsConfig,
        provider: Arc<dyn ResourceSnapshotProvider>,
    ) -> Result<Self> {
        let state = Arc::new(ExporterState::from_config(config));
        let registry = Arc::new(MetricRegistry::new()?);
        let handle = MetricsExporterService::new(state.clone(), registry.clone())
            .start()
            .inspect_err(|e| error!("Failed to start metrics endpoint: {}", e))?;
        let facade = Arc::new(SamplingFacade::new(
            state.enabled(),
            registry.clone(),
            provider,
        ));

        Ok(Self {
            state,
            registry,
            facade,
            handle,
        })
    }

    pub fn state(&self) -> &Arc<ExporterState> {
        &self.state
    }

    pub fn registry(&self) -> &Arc<MetricRegistry> {
        &self.registry
    }

    pub fn facade(&self) -> &Arc<SamplingFacade> {
        &self.facade
    }

    pub fn handle(&self) -> &ExporterHandle {
        &self.handle
    }
}
