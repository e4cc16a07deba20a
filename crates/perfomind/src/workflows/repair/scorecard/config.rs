use serde::{Deserialize, Serialize};

/// In-home budget revenue target (R$), the `Orçamento` detractor threshold.
pub const META_ORC_IH: f64 = 75_000.0;

/// Commission payout band: final scores at or above `min_final_score` earn
/// `amount`, up to the next band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionBand {
    pub min_final_score: f64,
    pub amount: f64,
}

/// The three payout bands, lowest first; anything below the first band pays
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionBands {
    pub low: CommissionBand,
    pub mid: CommissionBand,
    pub high: CommissionBand,
}

impl CommissionBands {
    pub fn amount_for(&self, final_score: f64) -> f64 {
        if final_score >= self.high.min_final_score {
            self.high.amount
        } else if final_score >= self.mid.min_final_score {
            self.mid.amount
        } else if final_score >= self.low.min_final_score {
            self.low.amount
        } else {
            0.0
        }
    }
}

impl Default for CommissionBands {
    fn default() -> Self {
        Self {
            low: CommissionBand {
                min_final_score: 5.0,
                amount: 200.0,
            },
            mid: CommissionBand {
                min_final_score: 7.0,
                amount: 300.0,
            },
            high: CommissionBand {
                min_final_score: 9.0,
                amount: 400.0,
            },
        }
    }
}

/// Weekly scoring thresholds. The defaults are the production rubric; tests
/// and what-if runs can override individual fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// LTP VD % at or below this earns +2.
    pub max_ltp_vd: f64,
    /// RRR VD % at or below this earns +1.
    pub max_rrr_vd: f64,
    /// R-NPS VD at or above this earns +0.5.
    pub min_r_nps_vd: f64,
    /// SSR VD at or below this earns +1.
    pub max_ssr_vd: f64,
    /// ECO REPAIR VD at or above this earns +1.
    pub min_eco_repair_vd: f64,
    /// FTC HAPPY CALL at or above this earns +1.
    pub min_ftc_happy_call: f64,

    /// VENDAS STORE+ accelerator threshold.
    pub min_vendas_store: f64,
    /// 1ST VISIT VD accelerator threshold.
    pub min_first_visit_vd: f64,
    /// PO IN HOME D+1 accelerator threshold.
    pub min_po_in_home_d1: f64,

    /// Treinamentos detractor threshold (below fires).
    pub min_treinamentos: f64,
    /// IN HOME D+1 detractor threshold (below fires).
    pub min_in_home_d1: f64,
    /// Orçamento detractor threshold (below fires).
    pub min_orcamento: f64,

    pub commission: CommissionBands,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_ltp_vd: 5.0,
            max_rrr_vd: 1.5,
            min_r_nps_vd: 80.0,
            max_ssr_vd: 0.4,
            min_eco_repair_vd: 60.0,
            min_ftc_happy_call: 88.0,
            min_vendas_store: 3.0,
            min_first_visit_vd: 20.0,
            min_po_in_home_d1: 70.0,
            min_treinamentos: 100.0,
            min_in_home_d1: 20.0,
            min_orcamento: META_ORC_IH,
            commission: CommissionBands::default(),
        }
    }
}
