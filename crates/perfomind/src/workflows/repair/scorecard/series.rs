use serde::Serialize;

use super::super::calendar::WeekKey;
use super::super::store::FirstVisitBucket;
use super::kpi::WeeklyKpiRecord;

/// One point of the first-visit chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirstVisitPoint {
    pub week: WeekKey,
    pub label: String,
    pub first_visit_count: u64,
    pub total_warranty_visits: u64,
    /// `firstVisitCount / totalWarrantyVisits * 100`, two decimal places;
    /// 0 when the week saw no warranty visits.
    pub proportion: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the first-visit series for a trailing week window. `buckets[i]` is
/// the stored bucket for `weeks[i]`, `None` when the document is absent.
/// Produces one point per week, oldest first, and never divides by zero.
pub fn first_visit_series(
    weeks: &[WeekKey],
    buckets: &[Option<FirstVisitBucket>],
) -> Vec<FirstVisitPoint> {
    weeks
        .iter()
        .zip(buckets)
        .map(|(week, bucket)| {
            let bucket = bucket.unwrap_or_default();
            let proportion = if bucket.total_warranty_visits > 0 {
                round2(
                    bucket.first_visit_count as f64 / bucket.total_warranty_visits as f64 * 100.0,
                )
            } else {
                0.0
            };
            FirstVisitPoint {
                week: *week,
                label: week.label(),
                first_visit_count: bucket.first_visit_count,
                total_warranty_visits: bucket.total_warranty_visits,
                proportion,
            }
        })
        .collect()
}

/// Cumulative first-visit percentage over the whole window: the sum of
/// first-visit counts against the sum of warranty visits.
pub fn cumulative_first_visit(points: &[FirstVisitPoint]) -> f64 {
    let visits: u64 = points.iter().map(|point| point.total_warranty_visits).sum();
    if visits == 0 {
        return 0.0;
    }
    let first: u64 = points.iter().map(|point| point.first_visit_count).sum();
    round2(first as f64 / visits as f64 * 100.0)
}

/// One point of a KPI chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPoint {
    pub name: String,
    pub value: f64,
}

/// A KPI display series. Weeks without a numeric value are skipped; a series
/// left with no points is an explicit no-data state, never an empty chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "points", rename_all = "snake_case")]
pub enum MetricSeries {
    NoData,
    Points(Vec<MetricPoint>),
}

impl MetricSeries {
    pub fn has_data(&self) -> bool {
        matches!(self, Self::Points(_))
    }
}

/// Project one named metric out of the weekly records (already sorted
/// ascending by week).
pub fn metric_series(records: &[WeeklyKpiRecord], metric: &str) -> MetricSeries {
    let points: Vec<MetricPoint> = records
        .iter()
        .filter_map(|record| {
            record.metric(metric).map(|value| MetricPoint {
                name: record.label(),
                value,
            })
        })
        .collect();

    if points.is_empty() {
        MetricSeries::NoData
    } else {
        MetricSeries::Points(points)
    }
}
