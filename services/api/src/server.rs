use crate::cli::ServeArgs;
use crate::infra::{seed_repository, AppState};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use gesttravaux::config::AppConfig;
use gesttravaux::error::AppError;
use gesttravaux::sites::SiteAccessService;
use gesttravaux::storage::FilesystemDocumentStore;
use gesttravaux::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    std::fs::create_dir_all(&config.storage.photo_dir)?;
    std::fs::create_dir_all(&config.storage.document_dir)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let store = Arc::new(FilesystemDocumentStore::from_config(&config.storage));
    let repository = seed_repository();
    let service = Arc::new(SiteAccessService::new(repository, store.clone()));

    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        service,
        store,
    };

    let app = with_site_routes(&app_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "construction-site tracking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
