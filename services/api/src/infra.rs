use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use perfomind::workflows::repair::orders::{ArchiveError, OrderArchive, OrderNumber, ServiceOrderEvent};
use perfomind::workflows::repair::store::{
    AggregateStore, BucketFields, Collection, FieldIncrement, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stand-in for the hosted document store. Increments are applied
/// atomically under the lock, matching the remote increment primitive; the
/// KPI collection holds raw JSON documents ordered by their `week` field.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAggregateStore {
    buckets: Arc<Mutex<HashMap<(Collection, String), BucketFields>>>,
    kpi_documents: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl InMemoryAggregateStore {
    pub(crate) fn replace_kpis(&self, documents: Vec<serde_json::Value>) {
        *self.kpi_documents.lock().expect("store mutex poisoned") = documents;
    }
}

#[async_trait]
impl AggregateStore for InMemoryAggregateStore {
    async fn fetch_bucket(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<BucketFields>, StoreError> {
        Ok(self
            .buckets
            .lock()
            .expect("store mutex poisoned")
            .get(&(collection, key.to_string()))
            .cloned())
    }

    async fn apply_increments(
        &self,
        collection: Collection,
        key: &str,
        increments: &[FieldIncrement],
    ) -> Result<(), StoreError> {
        let mut guard = self.buckets.lock().expect("store mutex poisoned");
        let bucket = guard.entry((collection, key.to_string())).or_default();
        for increment in increments {
            bucket.apply(increment);
        }
        Ok(())
    }

    async fn list_ordered(
        &self,
        collection: Collection,
        order_by: &str,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        if collection != Collection::Kpis {
            return Ok(Vec::new());
        }
        let mut documents = self
            .kpi_documents
            .lock()
            .expect("store mutex poisoned")
            .clone();
        documents.sort_by_key(|document| document.get(order_by).and_then(|value| value.as_u64()));
        Ok(documents)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOrderArchive {
    orders: Arc<Mutex<HashMap<OrderNumber, ServiceOrderEvent>>>,
}

#[async_trait]
impl OrderArchive for InMemoryOrderArchive {
    async fn fetch(&self, order: &OrderNumber) -> Result<Option<ServiceOrderEvent>, ArchiveError> {
        Ok(self
            .orders
            .lock()
            .expect("archive mutex poisoned")
            .get(order)
            .cloned())
    }

    async fn upsert(&self, event: ServiceOrderEvent) -> Result<(), ArchiveError> {
        let number = match event.order_number.clone() {
            Some(number) => number,
            None => return Ok(()),
        };
        self.orders
            .lock()
            .expect("archive mutex poisoned")
            .insert(number, event);
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
