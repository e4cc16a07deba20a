use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAggregateStore, InMemoryOrderArchive};
use crate::routes::with_app_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use perfomind::config::AppConfig;
use perfomind::error::AppError;
use perfomind::telemetry;
use perfomind::workflows::repair::orders::OrderIntakeService;
use perfomind::workflows::repair::report::DashboardService;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryAggregateStore::default());
    let archive = Arc::new(InMemoryOrderArchive::default());
    let intake = Arc::new(OrderIntakeService::new(store.clone(), archive));
    let dashboard = Arc::new(DashboardService::new(store));

    let app = with_app_routes(intake, dashboard)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "perfomind service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
