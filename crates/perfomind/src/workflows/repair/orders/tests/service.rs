use std::sync::Arc;

use chrono::NaiveDate;

use super::common::*;
use crate::workflows::repair::orders::domain::OrderNumber;
use crate::workflows::repair::orders::service::{IntakeError, OrderIntakeService};
use crate::workflows::repair::store::{fields, Collection};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 6).expect("valid date")
}

#[tokio::test]
async fn budget_approval_updates_daily_and_monthly_buckets() {
    let (service, store, archive) = build_service();

    let receipt = service
        .record(budget_event("4171234567", 500.0, 300.0), today())
        .await
        .expect("order records");

    assert!(receipt.carry_in.is_some());
    assert!(receipt.warranty.is_none());

    let daily = store
        .bucket(Collection::CarryIn, "2026-8-6")
        .expect("daily bucket created");
    assert_eq!(daily.get(fields::TOTAL_PAID), Some(300.0));
    assert_eq!(daily.get(fields::TOTAL_APPROVED), Some(500.0));

    let monthly = store
        .bucket(Collection::CarryIn, "2026-8")
        .expect("monthly bucket created");
    assert_eq!(monthly.get(fields::TOTAL_PAID), Some(300.0));
    assert_eq!(monthly.get(fields::TOTAL_APPROVED), Some(500.0));

    let order = OrderNumber::parse("4171234567").expect("valid");
    assert!(archive.stored(&order).is_some());
}

#[tokio::test]
async fn revising_paid_amount_nets_only_the_difference() {
    let (service, store, _archive) = build_service();

    service
        .record(budget_event("4171234567", 500.0, 100.0), today())
        .await
        .expect("first submission records");
    service
        .record(budget_event("4171234567", 500.0, 150.0), today())
        .await
        .expect("revision records");

    let daily = store
        .bucket(Collection::CarryIn, "2026-8-6")
        .expect("daily bucket present");
    assert_eq!(daily.get(fields::TOTAL_PAID), Some(150.0));
    assert_eq!(daily.get(fields::TOTAL_APPROVED), Some(500.0));

    let monthly = store
        .bucket(Collection::CarryIn, "2026-8")
        .expect("monthly bucket present");
    assert_eq!(monthly.get(fields::TOTAL_PAID), Some(150.0));
}

#[tokio::test]
async fn concurrent_warranty_visits_are_both_counted() {
    let (service, store, _archive) = build_service();
    let service = Arc::new(service);

    let first = {
        let service = service.clone();
        tokio::spawn(async move { service.record(warranty_event(true), today()).await })
    };
    let second = {
        let service = service.clone();
        tokio::spawn(async move { service.record(warranty_event(false), today()).await })
    };

    first
        .await
        .expect("task completes")
        .expect("first visit records");
    second
        .await
        .expect("task completes")
        .expect("second visit records");

    let bucket = store
        .bucket(Collection::FirstVisit, "2026-8-2")
        .expect("week bucket created");
    assert_eq!(bucket.get(fields::TOTAL_WARRANTY_VISITS), Some(2.0));
    assert_eq!(bucket.get(fields::FIRST_VISIT_COUNT), Some(1.0));
}

#[tokio::test]
async fn plain_repair_touches_no_buckets() {
    let (service, store, _archive) = build_service();

    let receipt = service
        .record(plain_event("Claudio Cris"), today())
        .await
        .expect("plain repair records");

    assert!(receipt.carry_in.is_none());
    assert!(receipt.warranty.is_none());
    assert!(store.bucket(Collection::CarryIn, "2026-8-6").is_none());
    assert!(store.bucket(Collection::FirstVisit, "2026-8-2").is_none());
}

#[tokio::test]
async fn warranty_failure_reports_carry_in_as_applied() {
    let store = WarrantyFailingStore::default();
    let archive = MemoryOrderArchive::default();
    let service = OrderIntakeService::new(Arc::new(store.clone()), Arc::new(archive));

    // Both flags set: the carry-in batch lands, the warranty batch fails.
    let mut event = budget_event("4171234567", 200.0, 200.0);
    event.is_warranty_visit = true;
    event.is_first_visit_repair = true;

    let error = service
        .record(event, today())
        .await
        .expect_err("warranty write fails");

    match error {
        IntakeError::Warranty {
            carry_in_applied,
            source: _,
        } => assert!(carry_in_applied, "carry-in had already been applied"),
        other => panic!("expected warranty failure, got {other:?}"),
    }

    let daily = store
        .carry_in_bucket("2026-8-6")
        .expect("carry-in bucket was written before the failure");
    assert_eq!(daily.get(fields::TOTAL_PAID), Some(200.0));
}

#[tokio::test]
async fn offline_store_surfaces_carry_in_failure_without_archiving() {
    let archive = MemoryOrderArchive::default();
    let service = OrderIntakeService::new(Arc::new(UnavailableStore), Arc::new(archive.clone()));

    let error = service
        .record(budget_event("4171234567", 100.0, 100.0), today())
        .await
        .expect_err("store is offline");
    assert!(matches!(error, IntakeError::CarryIn(_)));

    let order = OrderNumber::parse("4171234567").expect("valid");
    assert!(
        archive.stored(&order).is_none(),
        "failed submissions must not be archived"
    );
}
