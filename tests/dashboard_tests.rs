use chrono::{NaiveDate, NaiveDateTime};
use kpi_dash::config::DashboardConfig;
use kpi_dash::dashboard::*;
use kpi_dash::dataset::{BaselineRecord, Dataset, ScenarioRecord};
use kpi_dash::error::DashError;
use std::collections::BTreeMap;
use std::sync::Arc;

const M: f64 = 1_000_000.0;

fn rec(spend_m: f64, roas: f64, marginal_from_baseline: Option<f64>) -> ScenarioRecord {
    ScenarioRecord {
        total_annual_spend: spend_m * M,
        total_annual_sales: spend_m * M * roas,
        total_annual_traffic: spend_m * 50_000.0,
        total_annual_transactions: spend_m * 900.0,
        blended_roas: roas,
        blended_conversion_rate: 0.018,
        blended_aov: 105.0,
        marginal_roas: Some(roas * 0.5),
        marginal_roas_from_137m: marginal_from_baseline,
    }
}

fn dataset(with_column: bool) -> Dataset {
    let annual = (0..20)
        .map(|i| {
            let spend = 100.0 + 10.0 * i as f64;
            let roas = (36.0 - i as f64) / 10.0;
            let marginal = with_column.then(|| 3.2 - 0.15 * i as f64);
            rec(spend, roas, marginal)
        })
        .collect();
    let baseline = (0..10)
        .map(|i| {
            let weekly = 2.0 * M + 0.25 * M * i as f64;
            BaselineRecord {
                weekly_spend: weekly,
                sales: weekly * 3.0,
                marginal_roas: 4.3 - 0.35 * i as f64,
                sales_increase: 80_000.0 - 5_000.0 * i as f64,
            }
        })
        .collect();
    Dataset {
        annual_projections: annual,
        baseline_projections: baseline,
        holiday_projections: Vec::new(),
        summary_metrics: BTreeMap::new(),
        data_timestamp: NaiveDateTime::parse_from_str("2026-02-01 08:15:00", "%Y-%m-%d %H:%M:%S")
            .unwrap(),
    }
}

fn dashboard(with_column: bool) -> Dashboard {
    Dashboard::new(Arc::new(dataset(with_column)), DashboardConfig::default())
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

#[test]
fn test_default_selection_covers_everything() {
    let d = dashboard(true);
    let sel = d.default_selection(AnalysisMode::AnnualOverview);
    assert_eq!(sel.spend_millions, (0, 290));
    assert_eq!(sel.min_roas, 0.0);

    let view = d.interact_on(&sel, today()).unwrap();
    assert_eq!(view.filtered_count(), 20);
    assert_eq!(view.total_count, 20);
    assert_eq!(view.data_timestamp, "2026-02-01 08:15");
    match &view.panel {
        Panel::Overview {
            rows,
            reference_line,
        } => {
            assert_eq!(rows.len(), 20);
            assert_eq!(*reference_line, 2.0);
        }
        other => panic!("expected overview, got {:?}", other),
    }
}

#[test]
fn test_empty_filter_shows_warning_without_metrics() {
    let d = dashboard(true);
    for mode in AnalysisMode::all() {
        let sel = Selection::new((1000, 2000), 0.0, mode);
        let view = d.interact_on(&sel, today()).unwrap();
        assert!(view.headline.is_none(), "{mode}: summarizer must not run");
        assert_eq!(
            view.panel,
            Panel::Empty {
                message: EMPTY_SELECTION_WARNING.to_string()
            }
        );
    }
}

#[test]
fn test_selection_beyond_slider_maximum() {
    let d = dashboard(true);
    let sel = Selection::new((150, 5000), 0.0, AnalysisMode::AnnualOverview);
    let view = d.interact_on(&sel, today()).unwrap();
    assert_eq!(view.selection.spend_millions, (150, 5000));
    assert_eq!(view.filtered_count(), 15);
    assert_eq!(view.bounds.unwrap().max_millions, 290);
}

#[test]
fn test_invalid_selections_rejected() {
    let d = dashboard(true);
    let bad_roas = Selection::new((0, 290), 1.7, AnalysisMode::AnnualOverview);
    assert!(matches!(
        d.interact_on(&bad_roas, today()).unwrap_err(),
        DashError::InvalidSelection(_)
    ));

    let inverted = Selection::new((200, 100), 0.0, AnalysisMode::AnnualOverview);
    assert!(d.interact_on(&inverted, today()).is_err());
}

#[test]
fn test_marginal_mode_uses_column_when_present() {
    let d = dashboard(true);
    let sel = Selection::new((0, 290), 0.0, AnalysisMode::MarginalReturns);
    let view = d.interact_on(&sel, today()).unwrap();

    match view.panel {
        Panel::Marginal(MarginalPanel::FromBaseline {
            baseline_label,
            rows,
            crossings,
        }) => {
            assert_eq!(baseline_label, "$137M");
            assert_eq!(rows.len(), 20);
            let found: Vec<f64> = crossings.iter().map(|c| c.threshold).collect();
            assert_eq!(found, vec![3.0, 2.5, 2.0, 1.5, 1.0, 0.5]);
            // 3.2 - 0.15 i < 3.0 first at i = 2 (spend 120M)
            assert_eq!(crossings[0].annual_spend, 120.0 * M);
            assert_eq!(crossings[0].incremental_spend, 120.0 * M - 137_200_000.0);
        }
        other => panic!("expected marginal-from-baseline panel, got {:?}", other),
    }
}

#[test]
fn test_marginal_mode_falls_back_to_weekly() {
    let d = dashboard(false);
    // 104M..156M annual is 2M..3M weekly
    let sel = Selection::new((104, 156), 0.0, AnalysisMode::MarginalReturns);
    let view = d.interact_on(&sel, today()).unwrap();

    match view.panel {
        Panel::Marginal(MarginalPanel::Weekly { rows, crossings }) => {
            assert_eq!(rows.len(), 5);
            assert_eq!(rows[0].weekly_spend, 2.0 * M);
            let found: Vec<f64> = crossings.iter().map(|c| c.threshold).collect();
            // weekly marginal: 4.3, 3.95, 3.6, 3.25, 2.9
            assert_eq!(found, vec![4.0, 3.5, 3.0]);
            assert_eq!(crossings[0].annual_spend, 2.25 * M * 52.0);
        }
        other => panic!("expected weekly panel, got {:?}", other),
    }
}

#[test]
fn test_comparison_defaults_and_explicit_targets() {
    let d = dashboard(true);
    let sel = Selection::new((0, 290), 0.0, AnalysisMode::ScenarioComparison);
    let view = d.interact_on(&sel, today()).unwrap();
    match &view.panel {
        Panel::Comparison {
            options,
            targets,
            rows,
            warning,
        } => {
            assert_eq!(options.len(), 20);
            assert_eq!(targets, &vec![100.0 * M, 150.0 * M, 200.0 * M]);
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[1].annual_spend, "$150.0M");
            assert!(warning.is_none());
        }
        other => panic!("expected comparison, got {:?}", other),
    }

    let mut explicit = sel.clone();
    explicit.comparison_millions = vec![250.0, 999.0];
    let view = d.interact_on(&explicit, today()).unwrap();
    match &view.panel {
        Panel::Comparison { rows, warning, .. } => {
            assert!(rows.is_empty());
            assert!(warning.as_deref().unwrap().contains("999.0"));
        }
        other => panic!("expected comparison, got {:?}", other),
    }
}

#[test]
fn test_table_mode_builds_export_table() {
    let d = dashboard(false);
    let sel = Selection::new((0, 290), 2.5, AnalysisMode::DataTable);
    let view = d.interact_on(&sel, today()).unwrap();
    match view.panel {
        Panel::Table {
            table,
            has_marginal_from_baseline,
            file_name,
        } => {
            assert!(!has_marginal_from_baseline);
            assert_eq!(table.headers.len(), 7);
            // roas 3.6 - 0.1 i >= 2.5 for i <= 11
            assert_eq!(table.rows.len(), 12);
            assert_eq!(file_name, "kpi_projections_20261019.csv");
        }
        other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn test_headline_metrics_follow_filter() {
    let d = dashboard(true);
    let sel = Selection::new((150, 200), 0.0, AnalysisMode::AnnualOverview);
    let view = d.interact_on(&sel, today()).unwrap();
    let h = view.headline.unwrap();
    assert_eq!(h.scenario_count, 6);
    assert_eq!(h.count_delta, -14);
    assert_eq!(h.optimal_spend, 150.0 * M);
}

#[test]
fn test_mode_parsing() {
    assert_eq!("overview".parse::<AnalysisMode>().unwrap(), AnalysisMode::AnnualOverview);
    assert_eq!("Marginal".parse::<AnalysisMode>().unwrap(), AnalysisMode::MarginalReturns);
    assert_eq!("compare".parse::<AnalysisMode>().unwrap(), AnalysisMode::ScenarioComparison);
    assert_eq!("table".parse::<AnalysisMode>().unwrap(), AnalysisMode::DataTable);
    assert!("pie".parse::<AnalysisMode>().is_err());
}
