use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metric field names as they appear in the ingested KPI documents.
pub mod metrics {
    pub const LTP_VD: &str = "LTP VD %";
    pub const EX_LTP_VD: &str = "EX LTP VD %";
    pub const RRR_VD: &str = "RRR VD %";
    pub const SSR_VD: &str = "SSR VD";
    pub const FTC_HAPPY_CALL: &str = "FTC HAPPY CALL";
    pub const R_NPS_VD: &str = "R-NPS VD";
    pub const ECO_REPAIR_VD: &str = "ECO REPAIR VD";
    pub const PO_IN_HOME_D1: &str = "PO IN HOME D+1";
    pub const TREINAMENTOS: &str = "Treinamentos";
    pub const ORCAMENTO: &str = "Orçamento";
    pub const VENDAS_STORE: &str = "VENDAS STORE+";
    pub const FIRST_VISIT_VD: &str = "1ST VISIT VD";
    pub const IN_HOME_D1: &str = "IN HOME D+1";

    pub const LTP_VD_QTD: &str = "LTP VD QTD";
    pub const EX_LTP_VD_QTD: &str = "EX LTP VD QTD";
    pub const RRR_VD_QTD: &str = "RRR VD QTD";
}

/// One externally ingested weekly KPI document. The metric map is read-only
/// input here: values arrive as raw JSON (numbers or strings, with arbitrary
/// extra fields) and are parsed tolerantly on access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyKpiRecord {
    pub week: u32,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, Value>,
}

impl WeeklyKpiRecord {
    pub fn new(week: u32) -> Self {
        Self {
            week,
            metrics: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.metrics.insert(name.to_string(), value.into());
        self
    }

    /// Numeric value of a metric. Missing fields and unparseable values are
    /// `None`; threshold comparisons against `None` award nothing and never
    /// error.
    pub fn metric(&self, name: &str) -> Option<f64> {
        match self.metrics.get(name)? {
            Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
            Value::String(raw) => {
                let trimmed = raw.trim().trim_end_matches('%').trim();
                trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
            }
            _ => None,
        }
    }

    /// Chart label, `W <week>`.
    pub fn label(&self) -> String {
        format!("W {}", self.week)
    }
}
