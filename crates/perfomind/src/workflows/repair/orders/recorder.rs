//! Pure planning step of order intake: turn one event (and, for revisions,
//! its previously stored state) into delta-only bucket updates.

use chrono::NaiveDate;
use serde::Serialize;

use super::super::calendar::{DayKey, MonthKey, WeekKey};
use super::super::store::{fields, FieldIncrement};
use super::domain::ServiceOrderEvent;

/// Carry-in deltas for one event: the same paid/approved deltas are applied
/// to the daily bucket and to the monthly bucket, as one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarryInUpdate {
    pub day: DayKey,
    pub month: MonthKey,
    pub paid_delta: f64,
    pub approved_delta: f64,
}

impl CarryInUpdate {
    pub(crate) fn increments(&self) -> [FieldIncrement; 2] {
        [
            FieldIncrement::new(fields::TOTAL_PAID, self.paid_delta),
            FieldIncrement::new(fields::TOTAL_APPROVED, self.approved_delta),
        ]
    }
}

/// Warranty-visit counts for one event, applied to the current week's bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarrantyUpdate {
    pub week: WeekKey,
    pub first_visit: bool,
}

impl WarrantyUpdate {
    pub(crate) fn increments(&self) -> Vec<FieldIncrement> {
        let mut increments = vec![FieldIncrement::new(fields::TOTAL_WARRANTY_VISITS, 1.0)];
        if self.first_visit {
            increments.push(FieldIncrement::new(fields::FIRST_VISIT_COUNT, 1.0));
        }
        increments
    }
}

/// Bucket updates planned for one recorded event. Both branches may be
/// absent (a plain repair touches no bucket).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecordingPlan {
    pub carry_in: Option<CarryInUpdate>,
    pub warranty: Option<WarrantyUpdate>,
}

impl RecordingPlan {
    pub fn is_empty(&self) -> bool {
        self.carry_in.is_none() && self.warranty.is_none()
    }
}

/// Compute the bucket deltas for `event`, backing out the contribution of
/// `previous` (the prior stored state under the same order number) so that
/// repeated submissions converge to the correct totals. Pure function of its
/// explicit inputs; the caller supplies `previous` and the recording date.
pub fn plan_updates(
    event: &ServiceOrderEvent,
    previous: Option<&ServiceOrderEvent>,
    today: NaiveDate,
) -> RecordingPlan {
    let carry_in = if event.is_budget_approved {
        let figures = event.budget_figures();
        let prior = previous
            .map(|stored| stored.budget_figures())
            .unwrap_or_default();
        Some(CarryInUpdate {
            day: DayKey::from_date(today),
            month: MonthKey::from_date(today),
            paid_delta: figures.paid_amount - prior.paid_amount,
            approved_delta: figures.approved_amount - prior.approved_amount,
        })
    } else {
        None
    };

    let warranty = if event.is_warranty_visit {
        Some(WarrantyUpdate {
            week: WeekKey::containing(today),
            first_visit: event.counts_as_first_visit(),
        })
    } else {
        None
    };

    RecordingPlan { carry_in, warranty }
}
