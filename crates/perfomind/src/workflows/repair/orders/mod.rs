//! Service-order intake: validated form submissions become delta-only
//! counter updates against the calendar buckets, plus an archived copy of
//! the event for later financial revisions.

pub mod archive;
pub mod domain;
pub mod recorder;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use archive::{ArchiveError, OrderArchive};
pub use domain::{
    BudgetFigures, OrderNumber, OrderValidationError, ServiceOrderEvent, TechnicianName,
};
pub use recorder::{plan_updates, CarryInUpdate, RecordingPlan, WarrantyUpdate};
pub use router::order_router;
pub use service::{IntakeError, OrderIntakeService, RecordReceipt};
