use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::super::store::AggregateStore;
use super::archive::OrderArchive;
use super::domain::{
    BudgetFigures, OrderNumber, OrderValidationError, ServiceOrderEvent, TechnicianName,
};
use super::service::{IntakeError, OrderIntakeService};

/// Router builder exposing the order intake endpoint.
pub fn order_router<S, R>(service: Arc<OrderIntakeService<S, R>>) -> Router
where
    S: AggregateStore + 'static,
    R: OrderArchive + 'static,
{
    Router::new()
        .route("/api/v1/orders", post(submit_handler::<S, R>))
        .with_state(service)
}

/// Raw form payload; field-level validation happens here, not in the
/// recording planner.
#[derive(Debug, Deserialize)]
pub(crate) struct OrderSubmissionRequest {
    pub(crate) technician: String,
    #[serde(default)]
    pub(crate) order_number: Option<String>,
    #[serde(default)]
    pub(crate) client: String,
    #[serde(default)]
    pub(crate) defect_code: String,
    #[serde(default)]
    pub(crate) repair_code: String,
    #[serde(default)]
    pub(crate) replaced_part: String,
    #[serde(default)]
    pub(crate) notes: String,
    #[serde(default)]
    pub(crate) is_warranty_visit: bool,
    #[serde(default)]
    pub(crate) is_budget_approved: bool,
    #[serde(default)]
    pub(crate) approved_amount: Option<f64>,
    #[serde(default)]
    pub(crate) paid_amount: Option<f64>,
    #[serde(default)]
    pub(crate) is_first_visit_repair: bool,
    /// Recording date override; defaults to the server's local date.
    #[serde(default)]
    pub(crate) recorded_on: Option<NaiveDate>,
}

impl OrderSubmissionRequest {
    pub(crate) fn into_event(self) -> Result<(ServiceOrderEvent, Option<NaiveDate>), OrderValidationError> {
        let technician = TechnicianName::parse(&self.technician)?;

        let order_number = match self.order_number.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(raw) => Some(OrderNumber::parse(raw)?),
        };

        let budget = if self.is_budget_approved {
            match (self.approved_amount, self.paid_amount) {
                (Some(approved_amount), Some(paid_amount)) => Some(BudgetFigures {
                    approved_amount,
                    paid_amount,
                }),
                _ => return Err(OrderValidationError::MissingBudgetFigures),
            }
        } else {
            None
        };

        Ok((
            ServiceOrderEvent {
                technician,
                order_number,
                client: self.client,
                defect_code: self.defect_code,
                repair_code: self.repair_code,
                replaced_part: self.replaced_part,
                notes: self.notes,
                is_warranty_visit: self.is_warranty_visit,
                is_budget_approved: self.is_budget_approved,
                budget,
                is_first_visit_repair: self.is_first_visit_repair,
            },
            self.recorded_on,
        ))
    }
}

pub(crate) async fn submit_handler<S, R>(
    State(service): State<Arc<OrderIntakeService<S, R>>>,
    axum::Json(payload): axum::Json<OrderSubmissionRequest>,
) -> Response
where
    S: AggregateStore + 'static,
    R: OrderArchive + 'static,
{
    let (event, recorded_on) = match payload.into_event() {
        Ok(parsed) => parsed,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    let today = recorded_on.unwrap_or_else(|| Local::now().date_naive());
    match service.record(event, today).await {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(error @ (IntakeError::CarryIn(_) | IntakeError::Warranty { .. })) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
