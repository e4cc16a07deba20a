use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use super::super::calendar::{DayKey, MonthKey, WeekKey};
use super::super::scorecard::{
    cumulative_first_visit, first_visit_series, metric_series, ScoringConfig, ScoringEngine,
    WeeklyKpiRecord,
};
use super::super::store::{
    fields, AggregateStore, CarryInBucket, Collection, FirstVisitBucket, StoreError,
};
use super::catalog::ChartCatalog;
use super::views::{
    CarryInView, DashboardReport, FirstVisitChartView, MetricChartView, WeeklyScoreView,
};

/// Number of trailing weeks shown on every dashboard chart.
const CHART_WEEKS: usize = 8;
/// Target line on the first-visit chart.
const FIRST_VISIT_TARGET: f64 = 100.0;

/// Failure assembling a dashboard report. Any store error, including a
/// cancelled read, aborts the whole report; partial data is never served.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read-side service: awaits store snapshots sequentially and feeds the pure
/// rollup functions.
pub struct DashboardService<S> {
    store: Arc<S>,
    engine: ScoringEngine,
    catalog: ChartCatalog,
}

impl<S> DashboardService<S>
where
    S: AggregateStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, ScoringConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: ScoringConfig) -> Self {
        Self {
            store,
            engine: ScoringEngine::new(config),
            catalog: ChartCatalog::standard(),
        }
    }

    pub async fn report(&self, today: NaiveDate) -> Result<DashboardReport, ReportError> {
        let records = self.kpi_window().await?;
        let carry_in = self.carry_in(today).await?;
        let first_visit = self.first_visit(today).await?;

        let charts = self
            .catalog
            .specs()
            .iter()
            .map(|spec| MetricChartView {
                key: spec.key,
                title: spec.title,
                series: metric_series(&records, spec.key),
                quantity_series: spec
                    .quantity_key
                    .map(|quantity| metric_series(&records, quantity)),
                reference_lines: spec.reference_lines.clone(),
                axis_max: spec.axis_max,
            })
            .collect();

        let latest_score = records.last().map(|record| {
            let outcome = self.engine.score_week(record);
            let commission = self.engine.commission(outcome.final_score);
            WeeklyScoreView {
                week: outcome.week,
                score: outcome.score,
                accelerators: outcome.accelerators,
                detractors: outcome.detractors,
                final_score: outcome.final_score,
                commission,
                components: outcome.components,
            }
        });

        Ok(DashboardReport {
            today,
            carry_in,
            charts,
            first_visit,
            latest_score,
        })
    }

    /// Last eight KPI records, ascending by week. Documents that do not
    /// deserialize are skipped, never fatal.
    async fn kpi_window(&self) -> Result<Vec<WeeklyKpiRecord>, ReportError> {
        let documents = self
            .store
            .list_ordered(Collection::Kpis, fields::WEEK)
            .await?;

        let mut records: Vec<WeeklyKpiRecord> = documents
            .into_iter()
            .filter_map(|document| match serde_json::from_value(document) {
                Ok(record) => Some(record),
                Err(error) => {
                    debug!(%error, "skipping malformed KPI record");
                    None
                }
            })
            .collect();

        records.sort_by_key(|record| record.week);
        let start = records.len().saturating_sub(CHART_WEEKS);
        Ok(records.split_off(start))
    }

    async fn carry_in(&self, today: NaiveDate) -> Result<CarryInView, ReportError> {
        let day_key = DayKey::from_date(today).to_string();
        let month_key = MonthKey::from_date(today).to_string();

        let daily = self.fetch_carry_in(&day_key).await?;
        let monthly = self.fetch_carry_in(&month_key).await?;

        Ok(CarryInView {
            paid_today: daily.total_paid,
            paid_month: monthly.total_paid,
            approved_today: daily.total_approved,
            approved_month: monthly.total_approved,
        })
    }

    async fn fetch_carry_in(&self, key: &str) -> Result<CarryInBucket, ReportError> {
        let bucket = self
            .store
            .fetch_bucket(Collection::CarryIn, key)
            .await?
            .map(|fields_map| CarryInBucket::from_fields(&fields_map))
            .unwrap_or_default();
        Ok(bucket)
    }

    async fn first_visit(&self, today: NaiveDate) -> Result<FirstVisitChartView, ReportError> {
        let weeks = WeekKey::trailing(today, CHART_WEEKS);

        let mut buckets = Vec::with_capacity(weeks.len());
        for week in &weeks {
            let bucket = self
                .store
                .fetch_bucket(Collection::FirstVisit, &week.to_string())
                .await?
                .map(|fields_map| FirstVisitBucket::from_fields(&fields_map));
            buckets.push(bucket);
        }

        let points = first_visit_series(&weeks, &buckets);
        let cumulative_percentage = cumulative_first_visit(&points);

        Ok(FirstVisitChartView {
            points,
            cumulative_percentage,
            target: FIRST_VISIT_TARGET,
        })
    }
}
