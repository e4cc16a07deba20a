//! Client trait for the hosted document store.
//!
//! Buckets are documents of numeric counter fields. All writes go through
//! [`AggregateStore::apply_increments`] as relative deltas so that concurrent
//! submissions rely on the store's atomic increment primitive instead of
//! application-layer read-modify-write. Multi-field batches are best-effort
//! merges; callers treat each batch as one logical unit of work.

use async_trait::async_trait;
use std::collections::BTreeMap;

/// Collections owned by this system in the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Daily and monthly carry-in financial buckets, keyed `YYYY-M-D` / `YYYY-M`.
    CarryIn,
    /// Weekly warranty/first-visit buckets, keyed by week-start `YYYY-M-D`.
    FirstVisit,
    /// Externally ingested weekly KPI records, ordered by their `week` field.
    Kpis,
}

impl Collection {
    pub const fn name(self) -> &'static str {
        match self {
            Self::CarryIn => "carryIn",
            Self::FirstVisit => "firstVisit",
            Self::Kpis => "kpis",
        }
    }
}

/// Counter field names used inside bucket documents.
pub mod fields {
    pub const TOTAL_PAID: &str = "totalPaid";
    pub const TOTAL_APPROVED: &str = "totalApproved";
    pub const TOTAL_WARRANTY_VISITS: &str = "totalWarrantyVisits";
    pub const FIRST_VISIT_COUNT: &str = "firstVisitCount";
    pub const WEEK: &str = "week";
}

/// One relative counter update inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIncrement {
    pub field: &'static str,
    pub delta: f64,
}

impl FieldIncrement {
    pub fn new(field: &'static str, delta: f64) -> Self {
        Self { field, delta }
    }
}

/// Numeric counter fields of one bucket document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketFields(BTreeMap<String, f64>);

impl BucketFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: f64) -> Self {
        self.0.insert(field.to_string(), value);
        self
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.0.get(field).copied()
    }

    pub fn apply(&mut self, increment: &FieldIncrement) {
        *self.0.entry(increment.field.to_string()).or_insert(0.0) += increment.delta;
    }
}

/// Carry-in financial bucket (daily or monthly).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarryInBucket {
    pub total_paid: f64,
    pub total_approved: f64,
}

impl CarryInBucket {
    pub fn from_fields(fields_map: &BucketFields) -> Self {
        Self {
            total_paid: fields_map.get(fields::TOTAL_PAID).unwrap_or(0.0),
            total_approved: fields_map.get(fields::TOTAL_APPROVED).unwrap_or(0.0),
        }
    }
}

/// Weekly warranty-visit bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstVisitBucket {
    pub total_warranty_visits: u64,
    pub first_visit_count: u64,
}

impl FirstVisitBucket {
    pub fn from_fields(fields_map: &BucketFields) -> Self {
        let counter = |field: &str| fields_map.get(field).unwrap_or(0.0).max(0.0) as u64;
        Self {
            total_warranty_visits: counter(fields::TOTAL_WARRANTY_VISITS),
            first_visit_count: counter(fields::FIRST_VISIT_COUNT),
        }
    }
}

/// Failure talking to the external store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    /// The read pipeline was cancelled before completing; partial results
    /// must not be treated as authoritative.
    #[error("document store read cancelled before completion")]
    Cancelled,
}

/// Async client for the hosted document store.
#[async_trait]
pub trait AggregateStore: Send + Sync {
    /// Fetch one bucket document; absent buckets are `None`, not an error.
    async fn fetch_bucket(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<BucketFields>, StoreError>;

    /// Apply a batch of relative counter increments to one bucket,
    /// creating it when absent.
    async fn apply_increments(
        &self,
        collection: Collection,
        key: &str,
        increments: &[FieldIncrement],
    ) -> Result<(), StoreError>;

    /// Snapshot of a collection ordered by `order_by`. The live-subscription
    /// lifecycle belongs to the presentation layer; the core consumes
    /// snapshots only.
    async fn list_ordered(
        &self,
        collection: Collection,
        order_by: &str,
    ) -> Result<Vec<serde_json::Value>, StoreError>;
}
