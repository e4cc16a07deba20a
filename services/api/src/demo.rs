use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::json;

use perfomind::error::AppError;
use perfomind::workflows::repair::orders::{
    BudgetFigures, OrderIntakeService, OrderNumber, ServiceOrderEvent, TechnicianName,
};
use perfomind::workflows::repair::report::{DashboardReport, DashboardService};
use perfomind::workflows::repair::scorecard::{parse_kpi_csv, ScoringEngine, WeeklyKpiRecord};

use crate::infra::{parse_date, InMemoryAggregateStore, InMemoryOrderArchive};

#[derive(Args, Debug)]
pub(crate) struct ScorecardArgs {
    /// Weekly KPI CSV export (a `week` column plus metric columns)
    #[arg(long)]
    pub(crate) kpis: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reporting date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_scorecard(args: ScorecardArgs) -> Result<(), AppError> {
    let file = File::open(&args.kpis)?;
    let records = parse_kpi_csv(file)?;

    render_scorecard(&records);
    Ok(())
}

fn render_scorecard(records: &[WeeklyKpiRecord]) {
    if records.is_empty() {
        println!("No weekly KPI records in the export.");
        return;
    }

    let engine = ScoringEngine::standard();

    println!("Weekly scorecard");
    println!("week | score | accel | detract | final | commission");
    for record in records {
        let outcome = engine.score_week(record);
        println!(
            "{:>4} | {:>5.1} | {:>5} | {:>7} | {:>5.1} | R$ {:.2}",
            outcome.week,
            outcome.score,
            outcome.accelerators,
            outcome.detractors,
            outcome.final_score,
            engine.commission(outcome.final_score)
        );
    }

    let latest = engine.score_week(records.last().expect("non-empty records"));
    println!(
        "\nCommission owed for W {}: R$ {:.2}",
        latest.week,
        engine.commission(latest.final_score)
    );
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let store = Arc::new(InMemoryAggregateStore::default());
    let archive = Arc::new(InMemoryOrderArchive::default());
    let intake = OrderIntakeService::new(store.clone(), archive);

    // A budget approval, later revised upward under the same order number.
    let order = OrderNumber::parse("4171234567").expect("demo order number is valid");
    let mut budget_order = ServiceOrderEvent {
        technician: TechnicianName::parse("Dieliton Fonseca").expect("demo technician is valid"),
        order_number: Some(order),
        client: "Cliente Demo".to_string(),
        defect_code: "AE1".to_string(),
        repair_code: "A10".to_string(),
        replaced_part: "Painel LCD".to_string(),
        notes: "Pagamento pendente".to_string(),
        is_warranty_visit: false,
        is_budget_approved: true,
        budget: Some(BudgetFigures {
            approved_amount: 900.0,
            paid_amount: 400.0,
        }),
        is_first_visit_repair: false,
    };
    intake.record(budget_order.clone(), today).await?;

    budget_order.budget = Some(BudgetFigures {
        approved_amount: 900.0,
        paid_amount: 900.0,
    });
    intake.record(budget_order, today).await?;

    // Two warranty visits this week, one solved on the first visit.
    for first_visit in [true, false] {
        let warranty = ServiceOrderEvent {
            technician: TechnicianName::parse("Matheus Lindoso").expect("demo technician is valid"),
            order_number: None,
            client: String::new(),
            defect_code: "AA1".to_string(),
            repair_code: "A04".to_string(),
            replaced_part: String::new(),
            notes: String::new(),
            is_warranty_visit: true,
            is_budget_approved: false,
            budget: None,
            is_first_visit_repair: first_visit,
        };
        intake.record(warranty, today).await?;
    }

    store.replace_kpis(vec![
        json!({ "week": 31, "LTP VD %": 6.1, "RRR VD %": 1.9, "SSR VD": 0.5 }),
        json!({
            "week": 32,
            "LTP VD %": 4.2,
            "RRR VD %": 1.1,
            "R-NPS VD": 86,
            "SSR VD": 0.3,
            "ECO REPAIR VD": 68,
            "FTC HAPPY CALL": 91,
            "VENDAS STORE+": 4,
            "1ST VISIT VD": 24,
            "PO IN HOME D+1": 78,
            "Treinamentos": 100,
            "IN HOME D+1": 22,
            "Orçamento": 82000
        }),
    ]);

    let dashboard = DashboardService::new(store);
    let report = dashboard.report(today).await?;
    render_dashboard(&report);

    Ok(())
}

fn render_dashboard(report: &DashboardReport) {
    println!("Perfomind dashboard demo ({})", report.today);

    println!("\nCarry-in");
    println!("- paid today: R$ {:.2}", report.carry_in.paid_today);
    println!("- paid this month: R$ {:.2}", report.carry_in.paid_month);
    println!("- approved today: R$ {:.2}", report.carry_in.approved_today);

    println!("\nFirst-visit repairs (last 8 weeks)");
    for point in &report.first_visit.points {
        println!(
            "- {}: {}/{} ({:.2}%)",
            point.label, point.first_visit_count, point.total_warranty_visits, point.proportion
        );
    }
    println!(
        "- cumulative: {:.2}% (target {:.0}%)",
        report.first_visit.cumulative_percentage, report.first_visit.target
    );

    println!("\nKPI charts");
    for chart in &report.charts {
        let status = if chart.series.has_data() {
            "data"
        } else {
            "no data"
        };
        println!("- {}: {}", chart.title, status);
    }

    match &report.latest_score {
        Some(score) => {
            println!("\nWeekly score (W {})", score.week);
            println!(
                "- score {:.1}, accelerators {}, detractors {}",
                score.score, score.accelerators, score.detractors
            );
            println!("- final score {:.1}", score.final_score);
            println!("- commission R$ {:.2}", score.commission);
        }
        None => println!("\nWeekly score: no KPI records yet"),
    }
}
