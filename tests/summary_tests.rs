use approx::assert_relative_eq;
use kpi_dash::dataset::ScenarioRecord;
use kpi_dash::error::DashError;
use kpi_dash::filter::{ScenarioFilter, SpendRange};
use kpi_dash::summary::HeadlineMetrics;

const M: f64 = 1_000_000.0;

fn rec(spend_m: f64, sales_m: f64, roas: f64) -> ScenarioRecord {
    ScenarioRecord {
        total_annual_spend: spend_m * M,
        total_annual_sales: sales_m * M,
        total_annual_traffic: 1_000_000.0,
        total_annual_transactions: 20_000.0,
        blended_roas: roas,
        blended_conversion_rate: 0.02,
        blended_aov: 110.0,
        marginal_roas: None,
        marginal_roas_from_137m: None,
    }
}

#[test]
fn test_two_record_example() {
    let t = vec![rec(100.0, 250.0, 2.5), rec(200.0, 400.0, 2.0)];
    let filtered: Vec<&ScenarioRecord> = t.iter().collect();
    let h = HeadlineMetrics::compute(&filtered, &t).unwrap();

    assert_eq!(h.scenario_count, 2);
    assert_eq!(h.count_delta, 0);
    assert_relative_eq!(h.max_sales, 400.0 * M);
    assert_relative_eq!(h.best_roas, 2.5);
    assert_relative_eq!(h.optimal_spend, 100.0 * M);
    assert_relative_eq!(h.sales_potential, 150.0 * M);
    assert_relative_eq!(h.roas_range, 0.5, epsilon = 1e-12);
}

#[test]
fn test_deltas_measured_against_full_table() {
    let t = vec![
        rec(50.0, 180.0, 3.6),
        rec(100.0, 300.0, 3.0),
        rec(150.0, 390.0, 2.6),
        rec(200.0, 440.0, 2.2),
    ];
    let filtered = ScenarioFilter::new(SpendRange::from_millions(100, 200), 0.0).apply(&t);
    let h = HeadlineMetrics::compute(&filtered, &t).unwrap();

    assert_eq!(h.scenario_count, 3);
    assert_eq!(h.count_delta, -1);
    assert_relative_eq!(h.sales_potential, (440.0 - 180.0) * M);
    assert_relative_eq!(h.roas_range, 3.0 - 2.2, epsilon = 1e-12);
    assert_relative_eq!(h.optimal_spend, 100.0 * M);
}

#[test]
fn test_argmax_ties_use_first_occurrence() {
    let t = vec![
        rec(100.0, 200.0, 2.0),
        rec(120.0, 300.0, 2.5),
        rec(140.0, 350.0, 2.5),
    ];
    let filtered: Vec<&ScenarioRecord> = t.iter().collect();
    let h = HeadlineMetrics::compute(&filtered, &t).unwrap();
    assert_relative_eq!(h.optimal_spend, 120.0 * M);
}

#[test]
fn test_empty_selection_is_an_error() {
    let t = vec![rec(100.0, 250.0, 2.5)];
    let filtered = ScenarioFilter::new(SpendRange::from_millions(1000, 2000), 0.0).apply(&t);
    assert!(filtered.is_empty());

    let err = HeadlineMetrics::compute(&filtered, &t).unwrap_err();
    assert!(matches!(err, DashError::EmptySelection));
}
