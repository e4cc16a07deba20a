//! Dashboard rollup: assembles carry-in totals, the KPI chart catalog, the
//! first-visit series, and the latest week's commissioned score from store
//! snapshots.

mod catalog;
mod router;
mod summary;
pub mod views;

pub use catalog::{ChartCatalog, MetricSpec, ReferenceLine};
pub use router::dashboard_router;
pub use summary::{DashboardService, ReportError};
pub use views::{CarryInView, DashboardReport, FirstVisitChartView, MetricChartView, WeeklyScoreView};
