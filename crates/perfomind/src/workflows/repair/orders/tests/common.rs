use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::workflows::repair::orders::archive::{ArchiveError, OrderArchive};
use crate::workflows::repair::orders::domain::{
    BudgetFigures, OrderNumber, ServiceOrderEvent, TechnicianName,
};
use crate::workflows::repair::orders::service::OrderIntakeService;
use crate::workflows::repair::store::{
    AggregateStore, BucketFields, Collection, FieldIncrement, StoreError,
};

/// In-memory store with the same contract as the hosted one: increments are
/// applied atomically under the lock, mirroring the remote atomic increment
/// primitive.
#[derive(Default, Clone)]
pub(super) struct MemoryAggregateStore {
    buckets: Arc<Mutex<HashMap<(Collection, String), BucketFields>>>,
}

impl MemoryAggregateStore {
    pub(super) fn bucket(&self, collection: Collection, key: &str) -> Option<BucketFields> {
        self.buckets
            .lock()
            .expect("store mutex poisoned")
            .get(&(collection, key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl AggregateStore for MemoryAggregateStore {
    async fn fetch_bucket(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<BucketFields>, StoreError> {
        Ok(self.bucket(collection, key))
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
        _collection: Collection,
        _order_by: &str,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        Ok(Vec::new())
    }
}

/// Store that accepts carry-in writes but rejects warranty writes, for
/// exercising the partial-application surface.
#[derive(Default, Clone)]
pub(super) struct WarrantyFailingStore {
    inner: MemoryAggregateStore,
}

impl WarrantyFailingStore {
    pub(super) fn carry_in_bucket(&self, key: &str) -> Option<BucketFields> {
        self.inner.bucket(Collection::CarryIn, key)
    }
}

#[async_trait]
impl AggregateStore for WarrantyFailingStore {
    async fn fetch_bucket(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<BucketFields>, StoreError> {
        self.inner.fetch_bucket(collection, key).await
    }

    async fn apply_increments(
        &self,
        collection: Collection,
        key: &str,
        increments: &[FieldIncrement],
    ) -> Result<(), StoreError> {
        if collection == Collection::FirstVisit {
            return Err(StoreError::Unavailable("firstVisit write refused".to_string()));
        }
        self.inner.apply_increments(collection, key, increments).await
    }

    async fn list_ordered(
        &self,
        collection: Collection,
        order_by: &str,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        self.inner.list_ordered(collection, order_by).await
    }
}

/// Store that is entirely offline.
pub(super) struct UnavailableStore;

#[async_trait]
impl AggregateStore for UnavailableStore {
    async fn fetch_bucket(
        &self,
        _collection: Collection,
        _key: &str,
    ) -> Result<Option<BucketFields>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn apply_increments(
        &self,
        _collection: Collection,
        _key: &str,
        _increments: &[FieldIncrement],
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn list_ordered(
        &self,
        _collection: Collection,
        _order_by: &str,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryOrderArchive {
    orders: Arc<Mutex<HashMap<OrderNumber, ServiceOrderEvent>>>,
}

impl MemoryOrderArchive {
    pub(super) fn stored(&self, order: &OrderNumber) -> Option<ServiceOrderEvent> {
        self.orders
            .lock()
            .expect("archive mutex poisoned")
            .get(order)
            .cloned()
    }
}

#[async_trait]
impl OrderArchive for MemoryOrderArchive {
    async fn fetch(&self, order: &OrderNumber) -> Result<Option<ServiceOrderEvent>, ArchiveError> {
        Ok(self.stored(order))
    }

    async fn upsert(&self, event: ServiceOrderEvent) -> Result<(), ArchiveError> {
        let number = event
            .order_number
            .clone()
            .expect("archived events carry an order number");
        self.orders
            .lock()
            .expect("archive mutex poisoned")
            .insert(number, event);
        Ok(())
    }
}

pub(super) fn build_service() -> (
    OrderIntakeService<MemoryAggregateStore, MemoryOrderArchive>,
    MemoryAggregateStore,
    MemoryOrderArchive,
) {
    let store = MemoryAggregateStore::default();
    let archive = MemoryOrderArchive::default();
    let service = OrderIntakeService::new(Arc::new(store.clone()), Arc::new(archive.clone()));
    (service, store, archive)
}

pub(super) fn plain_event(technician: &str) -> ServiceOrderEvent {
    ServiceOrderEvent {
        technician: TechnicianName::parse(technician).expect("valid technician"),
        order_number: None,
        client: "Fulano de Tal".to_string(),
        defect_code: "AA1".to_string(),
        repair_code: "A04".to_string(),
        replaced_part: "Placa principal".to_string(),
        notes: String::new(),
        is_warranty_visit: false,
        is_budget_approved: false,
        budget: None,
        is_first_visit_repair: false,
    }
}

pub(super) fn budget_event(order: &str, approved: f64, paid: f64) -> ServiceOrderEvent {
    ServiceOrderEvent {
        order_number: Some(OrderNumber::parse(order).expect("valid order number")),
        is_budget_approved: true,
        budget: Some(BudgetFigures {
            approved_amount: approved,
            paid_amount: paid,
        }),
        ..plain_event("Daniel Moraes")
    }
}

pub(super) fn warranty_event(first_visit: bool) -> ServiceOrderEvent {
    ServiceOrderEvent {
        is_warranty_visit: true,
        is_first_visit_repair: first_visit,
        ..plain_event("Yago Giordanni")
    }
}
