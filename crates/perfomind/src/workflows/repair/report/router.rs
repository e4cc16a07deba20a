use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::error::AppError;

use super::super::store::AggregateStore;
use super::summary::DashboardService;
use super::views::DashboardReport;

/// Router builder exposing the dashboard report endpoint.
pub fn dashboard_router<S>(service: Arc<DashboardService<S>>) -> Router
where
    S: AggregateStore + 'static,
{
    Router::new()
        .route("/api/v1/dashboard", get(report_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct DashboardQuery {
    /// Reporting date override; defaults to the server's local date.
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardReport>, AppError>
where
    S: AggregateStore + 'static,
{
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    let report = service.report(today).await?;
    Ok(Json(report))
}
