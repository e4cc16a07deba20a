use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::super::store::{AggregateStore, Collection, StoreError};
use super::archive::{ArchiveError, OrderArchive};
use super::domain::ServiceOrderEvent;
use super::recorder::{plan_updates, CarryInUpdate, WarrantyUpdate};

/// Buckets actually touched while recording one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecordReceipt {
    pub carry_in: Option<CarryInUpdate>,
    pub warranty: Option<WarrantyUpdate>,
}

/// Error raised by order intake. Bucket updates run sequentially, so a
/// failure names the sub-update that broke and whether earlier sub-updates
/// had already landed; nothing is silently rolled back.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("carry-in bucket update failed")]
    CarryIn(#[source] StoreError),
    #[error("warranty bucket update failed (carry-in applied: {carry_in_applied})")]
    Warranty {
        carry_in_applied: bool,
        #[source]
        source: StoreError,
    },
    #[error("order archive lookup failed")]
    ArchiveLookup(#[source] ArchiveError),
    #[error("order archive write failed after bucket updates were applied")]
    ArchiveWrite(#[source] ArchiveError),
}

/// Intake service: looks up the order's previous state, plans delta-only
/// bucket updates, executes them against the store, then archives the event
/// for future revisions.
pub struct OrderIntakeService<S, R> {
    store: Arc<S>,
    archive: Arc<R>,
}

impl<S, R> OrderIntakeService<S, R>
where
    S: AggregateStore + 'static,
    R: OrderArchive + 'static,
{
    pub fn new(store: Arc<S>, archive: Arc<R>) -> Self {
        Self { store, archive }
    }

    /// Record one validated service order dated `today`.
    ///
    /// The previous-state lookup completes before any delta is computed, so
    /// revisions never net against stale figures. Each bucket update is its
    /// own unit of work; see [`IntakeError`] for the partial-failure surface.
    pub async fn record(
        &self,
        event: ServiceOrderEvent,
        today: NaiveDate,
    ) -> Result<RecordReceipt, IntakeError> {
        let previous = match &event.order_number {
            Some(number) => self
                .archive
                .fetch(number)
                .await
                .map_err(IntakeError::ArchiveLookup)?,
            None => None,
        };

        let plan = plan_updates(&event, previous.as_ref(), today);
        if plan.is_empty() {
            debug!(technician = event.technician.as_str(), "plain repair, no bucket updates");
        }

        let mut carry_in_applied = false;
        if let Some(update) = &plan.carry_in {
            self.store
                .apply_increments(
                    Collection::CarryIn,
                    &update.day.to_string(),
                    &update.increments(),
                )
                .await
                .map_err(IntakeError::CarryIn)?;
            self.store
                .apply_increments(
                    Collection::CarryIn,
                    &update.month.to_string(),
                    &update.increments(),
                )
                .await
                .map_err(IntakeError::CarryIn)?;
            carry_in_applied = true;
        }

        if let Some(update) = &plan.warranty {
            self.store
                .apply_increments(
                    Collection::FirstVisit,
                    &update.week.to_string(),
                    &update.increments(),
                )
                .await
                .map_err(|source| IntakeError::Warranty {
                    carry_in_applied,
                    source,
                })?;
        }

        if event.order_number.is_some() {
            self.archive
                .upsert(event.clone())
                .await
                .map_err(IntakeError::ArchiveWrite)?;
        }

        info!(
            technician = event.technician.as_str(),
            order = event.order_number.as_ref().map(|n| n.as_str()),
            revised = previous.is_some(),
            warranty = plan.warranty.is_some(),
            "service order recorded"
        );

        Ok(RecordReceipt {
            carry_in: plan.carry_in,
            warranty: plan.warranty,
        })
    }
}
