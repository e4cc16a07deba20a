use chrono::NaiveDate;
use serde::Serialize;

use super::super::scorecard::{FirstVisitPoint, MetricSeries, ScoreComponent};
use super::catalog::ReferenceLine;

/// Carry-in totals surfaced at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CarryInView {
    pub paid_today: f64,
    pub paid_month: f64,
    pub approved_today: f64,
    pub approved_month: f64,
}

/// One rendered KPI chart: the series plus its presentation hints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricChartView {
    pub key: &'static str,
    pub title: &'static str,
    pub series: MetricSeries,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_series: Option<MetricSeries>,
    pub reference_lines: Vec<ReferenceLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_max: Option<f64>,
}

/// The first-visit chart: trailing weekly proportions plus the cumulative
/// percentage used by the pie view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirstVisitChartView {
    pub points: Vec<FirstVisitPoint>,
    pub cumulative_percentage: f64,
    pub target: f64,
}

/// Latest week's score with its payout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyScoreView {
    pub week: u32,
    pub score: f64,
    pub accelerators: u8,
    pub detractors: u8,
    pub final_score: f64,
    pub commission: f64,
    pub components: Vec<ScoreComponent>,
}

/// Everything the dashboard renders, assembled from one set of store
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub today: NaiveDate,
    pub carry_in: CarryInView,
    pub charts: Vec<MetricChartView>,
    pub first_visit: FirstVisitChartView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_score: Option<WeeklyScoreView>,
}
