use serde::Serialize;

use super::super::scorecard::metrics;

/// Horizontal reference line drawn on a KPI chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub label: &'static str,
    pub value: f64,
}

/// One charted KPI: which record field to plot, how to title it, and which
/// target lines to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSpec {
    /// Field name inside the weekly KPI record.
    pub key: &'static str,
    pub title: &'static str,
    /// Companion quantity field shown alongside the percentage, if any.
    pub quantity_key: Option<&'static str>,
    pub reference_lines: Vec<ReferenceLine>,
    /// Upper bound of the chart's y axis; `None` lets the axis auto-scale.
    pub axis_max: Option<f64>,
}

/// The fixed set of KPI charts on the dashboard. Chart variants that used to
/// be separate dashboard copies are entries here instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartCatalog {
    specs: Vec<MetricSpec>,
}

impl ChartCatalog {
    pub fn standard() -> Self {
        let specs = vec![
            MetricSpec {
                key: metrics::LTP_VD,
                title: "LTP VD %",
                quantity_key: Some(metrics::LTP_VD_QTD),
                reference_lines: vec![
                    ReferenceLine { label: "Meta: 12.8%", value: 12.8 },
                    ReferenceLine { label: "P4P: 5%", value: 5.0 },
                ],
                axis_max: Some(40.0),
            },
            MetricSpec {
                key: metrics::EX_LTP_VD,
                title: "EX LTP VD %",
                quantity_key: Some(metrics::EX_LTP_VD_QTD),
                reference_lines: vec![ReferenceLine { label: "Meta: 1.44%", value: 1.44 }],
                axis_max: Some(10.0),
            },
            MetricSpec {
                key: metrics::RRR_VD,
                title: "RRR VD %",
                quantity_key: Some(metrics::RRR_VD_QTD),
                reference_lines: vec![
                    ReferenceLine { label: "Meta: 2.8%", value: 2.8 },
                    ReferenceLine { label: "P4P: 1.5%", value: 1.5 },
                ],
                axis_max: Some(15.0),
            },
            MetricSpec {
                key: metrics::SSR_VD,
                title: "SSR VD %",
                quantity_key: None,
                reference_lines: vec![ReferenceLine { label: "Meta: 0.4%", value: 0.4 }],
                axis_max: None,
            },
            MetricSpec {
                key: metrics::FTC_HAPPY_CALL,
                title: "FTC HAPPY CALL %",
                quantity_key: None,
                reference_lines: vec![ReferenceLine { label: "Meta: 88%", value: 88.0 }],
                axis_max: Some(100.0),
            },
            MetricSpec {
                key: metrics::ECO_REPAIR_VD,
                title: "ECO REPAIR VD %",
                quantity_key: None,
                reference_lines: vec![ReferenceLine { label: "Meta: 60%", value: 60.0 }],
                axis_max: Some(100.0),
            },
            MetricSpec {
                key: metrics::R_NPS_VD,
                title: "R-NPS VD %",
                quantity_key: None,
                reference_lines: vec![ReferenceLine { label: "Meta: 80%", value: 80.0 }],
                axis_max: Some(100.0),
            },
        ];

        Self { specs }
    }

    pub fn specs(&self) -> &[MetricSpec] {
        &self.specs
    }
}
