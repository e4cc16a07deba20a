use super::config::ScoringConfig;
use super::kpi::{metrics, WeeklyKpiRecord};
use super::rules::meets_floor;
use super::ScoreComponent;

/// Accelerators: each satisfied threshold adds +1 to the final score.
/// Absent metrics never accelerate.
pub(crate) fn accelerators(
    record: &WeeklyKpiRecord,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, u8) {
    let thresholds = [
        (metrics::VENDAS_STORE, config.min_vendas_store),
        (metrics::FIRST_VISIT_VD, config.min_first_visit_vd),
        (metrics::PO_IN_HOME_D1, config.min_po_in_home_d1),
    ];

    let mut components = Vec::new();
    let mut count = 0u8;
    for (metric, floor) in thresholds {
        let value = record.metric(metric);
        let earned = meets_floor(value, floor);
        if earned {
            count += 1;
        }
        components.push(ScoreComponent {
            metric,
            points: if earned { 1.0 } else { 0.0 },
            notes: match value {
                Some(value) => format!("{metric} at {value} (accelerator floor {floor})"),
                None => format!("{metric} missing, no accelerator"),
            },
        });
    }

    (components, count)
}

/// Detractors: each subtracts 1 from the final score. A detractor fires
/// unless the metric is present, numeric, and meets its target, so a week
/// with no data for `Treinamentos` still loses the point.
pub(crate) fn detractors(
    record: &WeeklyKpiRecord,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, u8) {
    let targets = [
        (metrics::TREINAMENTOS, config.min_treinamentos),
        (metrics::IN_HOME_D1, config.min_in_home_d1),
        (metrics::ORCAMENTO, config.min_orcamento),
    ];

    let mut components = Vec::new();
    let mut count = 0u8;
    for (metric, target) in targets {
        let value = record.metric(metric);
        let fired = !meets_floor(value, target);
        if fired {
            count += 1;
        }
        components.push(ScoreComponent {
            metric,
            points: if fired { -1.0 } else { 0.0 },
            notes: match value {
                Some(value) => format!("{metric} at {value} (detractor target {target})"),
                None => format!("{metric} missing, detractor fires"),
            },
        });
    }

    (components, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accelerators_require_values_at_or_above_their_floor() {
        let config = ScoringConfig::default();
        let record = WeeklyKpiRecord::new(1)
            .with_metric(metrics::VENDAS_STORE, 3)
            .with_metric(metrics::FIRST_VISIT_VD, 19.9)
            .with_metric(metrics::PO_IN_HOME_D1, 70);

        let (_, count) = accelerators(&record, &config);
        assert_eq!(count, 2);
    }

    #[test]
    fn missing_accelerator_metrics_add_nothing() {
        let config = ScoringConfig::default();
        let (_, count) = accelerators(&WeeklyKpiRecord::new(1), &config);
        assert_eq!(count, 0);
    }

    #[test]
    fn detractors_fire_on_missing_or_sub_target_metrics() {
        let config = ScoringConfig::default();

        let (_, all_absent) = detractors(&WeeklyKpiRecord::new(1), &config);
        assert_eq!(all_absent, 3);

        let record = WeeklyKpiRecord::new(1)
            .with_metric(metrics::TREINAMENTOS, 100)
            .with_metric(metrics::IN_HOME_D1, 19.9)
            .with_metric(metrics::ORCAMENTO, 75_000);
        let (_, count) = detractors(&record, &config);
        assert_eq!(count, 1);
    }

    #[test]
    fn non_numeric_detractor_values_still_fire() {
        let config = ScoringConfig::default();
        let record = WeeklyKpiRecord::new(1).with_metric(metrics::ORCAMENTO, "pendente");
        let (components, count) = detractors(&record, &config);
        assert_eq!(count, 3);
        assert!(components
            .iter()
            .any(|component| component.metric == metrics::ORCAMENTO && component.points == -1.0));
    }
}
