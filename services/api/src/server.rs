use crate::cli::ServeArgs;
use crate::infra::{AppState, Workspace};
use crate::routes::with_admin_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use recruit_desk::config::AppConfig;
use recruit_desk::error::AppError;
use recruit_desk::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let addr = config.server.socket_addr()?;
    let environment = config.environment;
    let backend_url = config.backend.base_url.clone();
    let workspace = Workspace::connect(config)?;

    // The service still starts when the backend is down; refresh routes retry later.
    if let Err(err) = workspace.requests.load().await {
        warn!(error = %err, "initial hire request load failed");
    }
    if let Err(err) = workspace.directory.refresh_employees().await {
        warn!(error = %err, "initial employee load failed");
    }
    if let Err(err) = workspace.directory.load_employers().await {
        warn!(error = %err, "initial employer load failed");
    }

    let app = with_admin_routes(workspace.requests, workspace.directory)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?environment, %addr, backend = %backend_url, "recruit desk admin service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
