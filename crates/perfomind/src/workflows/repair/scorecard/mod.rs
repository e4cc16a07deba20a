//! Weekly KPI scorecard: threshold scoring, accelerators/detractors, the
//! commission table, and the derived chart series.

mod config;
mod import;
mod kpi;
mod policy;
mod rules;
mod series;

pub use config::{CommissionBand, CommissionBands, ScoringConfig, META_ORC_IH};
pub use import::{parse_kpi_csv, KpiImportError};
pub use kpi::{metrics, WeeklyKpiRecord};
pub use series::{
    cumulative_first_visit, first_visit_series, metric_series, FirstVisitPoint, MetricPoint,
    MetricSeries,
};

use serde::Serialize;

/// Stateless scorer applying the rubric configuration to one weekly record.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Engine with the production rubric.
    pub fn standard() -> Self {
        Self::new(ScoringConfig::default())
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one week: base threshold points, then accelerators and
    /// detractors folded into the final score.
    pub fn score_week(&self, record: &WeeklyKpiRecord) -> WeeklyScore {
        let (mut components, score) = rules::base_score(record, &self.config);

        let (accelerator_components, accelerators) = policy::accelerators(record, &self.config);
        components.extend(accelerator_components);

        let (detractor_components, detractors) = policy::detractors(record, &self.config);
        components.extend(detractor_components);

        let final_score = score + f64::from(accelerators) - f64::from(detractors);

        WeeklyScore {
            week: record.week,
            score,
            accelerators,
            detractors,
            final_score,
            components,
        }
    }

    /// Commission owed for a final score, per the payout bands.
    pub fn commission(&self, final_score: f64) -> f64 {
        self.config.commission.amount_for(final_score)
    }
}

/// Discrete contribution to a weekly score, for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub metric: &'static str,
    pub points: f64,
    pub notes: String,
}

/// Composite weekly score and its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyScore {
    pub week: u32,
    pub score: f64,
    pub accelerators: u8,
    pub detractors: u8,
    pub final_score: f64,
    pub components: Vec<ScoreComponent>,
}
