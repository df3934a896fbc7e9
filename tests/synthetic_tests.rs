use chrono::NaiveDate;
use kpi_dash::synthetic::*;

#[test]
fn test_month_end_calendar() {
    let dates = month_ends(START_YEAR, END_YEAR);
    assert_eq!(dates.len(), 36);
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), "2024 is a leap year");
    assert_eq!(dates[13], NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    assert_eq!(dates[3], NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
    assert_eq!(dates[35], NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_values_within_ranges() {
    let rows = generate_monthly(42);
    assert_eq!(rows.len(), 36);
    for r in &rows {
        assert!((100_000..500_000).contains(&r.revenue), "revenue {}", r.revenue);
        assert!((50_000..200_000).contains(&r.costs), "costs {}", r.costs);
        assert!((20_000..150_000).contains(&r.profit), "profit {}", r.profit);
    }
}

#[test]
fn test_seed_determinism() {
    assert_eq!(generate_monthly(7), generate_monthly(7));
    assert_ne!(generate_monthly(7), generate_monthly(8));
}

#[test]
fn test_totals() {
    let rows = generate_monthly(3);
    let totals = SyntheticTotals::from_rows(&rows);
    assert_eq!(totals.revenue, rows.iter().map(|r| r.revenue).sum::<u64>());
    assert_eq!(totals.costs, rows.iter().map(|r| r.costs).sum::<u64>());
    assert_eq!(totals.profit, rows.iter().map(|r| r.profit).sum::<u64>());
    assert!(totals.revenue >= 36 * 100_000);

    let empty = SyntheticTotals::from_rows(&[]);
    assert_eq!(empty.revenue, 0);
}

#[test]
fn test_labels() {
    let names: Vec<String> = ScenarioLabel::all().iter().map(|l| l.to_string()).collect();
    assert_eq!(names, ["Baseline", "Optimistic", "Pessimistic", "Conservative"]);
}
