use async_trait::async_trait;

use super::domain::{OrderNumber, ServiceOrderEvent};

/// Storage abstraction for the last recorded state of each numbered order.
/// The intake service reads it to back out a revision's previous
/// contribution before computing deltas; events without an order number are
/// never archived (they cannot be revised).
#[async_trait]
pub trait OrderArchive: Send + Sync {
    async fn fetch(&self, order: &OrderNumber) -> Result<Option<ServiceOrderEvent>, ArchiveError>;
    async fn upsert(&self, event: ServiceOrderEvent) -> Result<(), ArchiveError>;
}

/// Failure talking to the order archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("order archive unavailable: {0}")]
    Unavailable(String),
}
