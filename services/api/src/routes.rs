use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;

use perfomind::workflows::repair::orders::{order_router, OrderArchive, OrderIntakeService};
use perfomind::workflows::repair::report::{dashboard_router, DashboardService};
use perfomind::workflows::repair::store::AggregateStore;

use crate::infra::AppState;

pub(crate) fn with_app_routes<S, R>(
    intake: Arc<OrderIntakeService<S, R>>,
    dashboard: Arc<DashboardService<S>>,
) -> axum::Router
where
    S: AggregateStore + 'static,
    R: OrderArchive + 'static,
{
    order_router(intake)
        .merge(dashboard_router(dashboard))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
