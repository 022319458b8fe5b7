// HTTP routes: JSON snapshot API, container stats, version, static dashboard

mod http;

use axum::http::{Method, header};
use axum::{Router, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::collectors::{ContainerCollector, NetworkCollector, StorageCollector, SystemCollector};
use crate::config::AppConfig;
use crate::sources::{ContainerEngine, HostMetricsSource};

/// One collector per subsystem. Collectors hold no per-request state, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub(crate) system: SystemCollector,
    pub(crate) storage: StorageCollector,
    pub(crate) network: NetworkCollector,
    pub(crate) docker: ContainerCollector,
}

impl AppState {
    pub fn new(
        host: Arc<dyn HostMetricsSource>,
        engine: Arc<dyn ContainerEngine>,
        config: &AppConfig,
    ) -> Self {
        Self {
            system: SystemCollector::new(host.clone(), config.collectors.cpu_sample_interval()),
            storage: StorageCollector::new(host.clone()),
            network: NetworkCollector::new(host),
            docker: ContainerCollector::new(
                engine,
                config.docker.snapshot_timeout(),
                config.docker.stats_timeout(),
            ),
        }
    }
}

pub fn app(state: AppState, static_dir: &str) -> Router {
    // Unknown paths get index.html so the dashboard's client-side routes resolve.
    let dashboard = ServeDir::new(static_dir)
        .fallback(ServeFile::new(Path::new(static_dir).join("index.html")));

    // Every API route also answers a bare OPTIONS with 200.
    Router::new()
        .route(
            "/api/system",
            get(http::system_handler).options(http::options_handler),
        )
        .route(
            "/api/storage",
            get(http::storage_handler).options(http::options_handler),
        )
        .route(
            "/api/network",
            get(http::network_handler).options(http::options_handler),
        )
        .route(
            "/api/docker",
            get(http::docker_handler).options(http::options_handler),
        )
        .route(
            "/api/docker/{id}/stats",
            get(http::container_stats_handler).options(http::options_handler),
        )
        .route(
            "/version",
            get(http::version_handler).options(http::options_handler),
        )
        .fallback_service(dashboard)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(state)
}
