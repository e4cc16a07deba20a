use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use super::common::*;
use crate::workflows::repair::orders::router::order_router;
use crate::workflows::repair::orders::service::OrderIntakeService;
use crate::workflows::repair::store::{fields, Collection};

fn router_with_memory_store() -> (axum::Router, MemoryAggregateStore) {
    let store = MemoryAggregateStore::default();
    let archive = MemoryOrderArchive::default();
    let service = OrderIntakeService::new(Arc::new(store.clone()), Arc::new(archive));
    (order_router(Arc::new(service)), store)
}

fn post_order(payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn accepts_a_valid_warranty_submission() {
    let (router, store) = router_with_memory_store();

    let response = router
        .oneshot(post_order(json!({
            "technician": "Pablo Henrique",
            "order_number": "4171234567",
            "is_warranty_visit": true,
            "is_first_visit_repair": true,
            "recorded_on": "2026-08-06"
        })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["warranty"]["week"], "2026-8-2");
    assert_eq!(body["warranty"]["first_visit"], true);

    let bucket = store
        .bucket(Collection::FirstVisit, "2026-8-2")
        .expect("week bucket written");
    assert_eq!(bucket.get(fields::TOTAL_WARRANTY_VISITS), Some(1.0));
}

#[tokio::test]
async fn rejects_a_malformed_order_number() {
    let (router, _store) = router_with_memory_store();

    let response = router
        .oneshot(post_order(json!({
            "technician": "Pablo Henrique",
            "order_number": "1234567890"
        })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("417XXXXXXX"));
}

#[tokio::test]
async fn rejects_a_blank_technician() {
    let (router, _store) = router_with_memory_store();

    let response = router
        .oneshot(post_order(json!({ "technician": "   " })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn rejects_budget_approval_without_figures() {
    let (router, _store) = router_with_memory_store();

    let response = router
        .oneshot(post_order(json!({
            "technician": "Daniel Moraes",
            "is_budget_approved": true,
            "approved_amount": 500.0
        })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn maps_store_failures_to_bad_gateway() {
    let archive = MemoryOrderArchive::default();
    let service = OrderIntakeService::new(Arc::new(UnavailableStore), Arc::new(archive));
    let router = order_router(Arc::new(service));

    let response = router
        .oneshot(post_order(json!({
            "technician": "Daniel Moraes",
            "is_budget_approved": true,
            "approved_amount": 500.0,
            "paid_amount": 500.0
        })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
