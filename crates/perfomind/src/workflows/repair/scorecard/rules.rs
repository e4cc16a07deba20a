use super::config::ScoringConfig;
use super::kpi::{metrics, WeeklyKpiRecord};
use super::ScoreComponent;

pub(super) fn meets_ceiling(value: Option<f64>, ceiling: f64) -> bool {
    matches!(value, Some(value) if value <= ceiling)
}

pub(super) fn meets_floor(value: Option<f64>, floor: f64) -> bool {
    matches!(value, Some(value) if value >= floor)
}

fn describe(metric: &str, value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{metric} at {value}"),
        None => format!("{metric} missing or non-numeric"),
    }
}

/// Base score: six independent threshold rules, summed. Absent or
/// unparseable metrics award nothing.
pub(crate) fn base_score(
    record: &WeeklyKpiRecord,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, f64) {
    let mut components = Vec::new();
    let mut total = 0.0;

    let mut rule = |metric: &'static str, earned: bool, points: f64, value: Option<f64>| {
        let awarded = if earned { points } else { 0.0 };
        components.push(ScoreComponent {
            metric,
            points: awarded,
            notes: describe(metric, value),
        });
        total += awarded;
    };

    let ltp = record.metric(metrics::LTP_VD);
    rule(metrics::LTP_VD, meets_ceiling(ltp, config.max_ltp_vd), 2.0, ltp);

    let rrr = record.metric(metrics::RRR_VD);
    rule(metrics::RRR_VD, meets_ceiling(rrr, config.max_rrr_vd), 1.0, rrr);

    let nps = record.metric(metrics::R_NPS_VD);
    rule(metrics::R_NPS_VD, meets_floor(nps, config.min_r_nps_vd), 0.5, nps);

    let ssr = record.metric(metrics::SSR_VD);
    rule(metrics::SSR_VD, meets_ceiling(ssr, config.max_ssr_vd), 1.0, ssr);

    let eco = record.metric(metrics::ECO_REPAIR_VD);
    rule(
        metrics::ECO_REPAIR_VD,
        meets_floor(eco, config.min_eco_repair_vd),
        1.0,
        eco,
    );

    let ftc = record.metric(metrics::FTC_HAPPY_CALL);
    rule(
        metrics::FTC_HAPPY_CALL,
        meets_floor(ftc, config.min_ftc_happy_call),
        1.0,
        ftc,
    );

    (components, total)
}
