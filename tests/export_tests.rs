use chrono::NaiveDate;
use kpi_dash::dataset::ScenarioRecord;
use kpi_dash::export::*;

fn rec(spend: f64, marginal_from_baseline: Option<f64>) -> ScenarioRecord {
    ScenarioRecord {
        total_annual_spend: spend,
        total_annual_sales: spend * 2.4567,
        total_annual_traffic: 15_432_100.6,
        total_annual_transactions: 321_000.0,
        blended_roas: 2.4567,
        blended_conversion_rate: 0.021234,
        blended_aov: 842.7,
        marginal_roas: Some(1.23456),
        marginal_roas_from_137m: marginal_from_baseline,
    }
}

#[test]
fn test_table_rounding_and_columns() {
    let t = vec![rec(150_000_000.0, Some(1.98765))];
    let rows: Vec<&ScenarioRecord> = t.iter().collect();
    let table = DataTable::from_rows(&rows, false);

    assert_eq!(table.headers.len(), 7);
    assert_eq!(table.headers[0], "Annual Spend ($M)");
    let row = &table.rows[0];
    assert_eq!(row[0], 150.0);
    assert_eq!(row[2], 2.46);
    assert_eq!(row[3], 2.12);
    assert_eq!(row[4], 843.0);
    assert_eq!(row[5], 15_432_101.0);
    assert_eq!(row[6], 1.235);
}

#[test]
fn test_table_optional_column() {
    let t = vec![rec(150_000_000.0, Some(1.98765)), rec(160_000_000.0, None)];
    let rows: Vec<&ScenarioRecord> = t.iter().collect();
    let table = DataTable::from_rows(&rows, true);

    assert_eq!(table.headers.last().unwrap(), "Marginal ROAS from $137M");
    assert_eq!(table.rows[0][7], 1.988);
    assert!(table.rows[1][7].is_nan());
}

#[test]
fn test_file_name_is_date_stamped() {
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    assert_eq!(export_file_name(date), "kpi_projections_20261019.csv");
}

#[test]
fn test_csv_has_header_and_blank_missing_cells() {
    let t = vec![rec(150_000_000.0, None)];
    let rows: Vec<&ScenarioRecord> = t.iter().collect();
    let table = DataTable::from_rows(&rows, true);
    let csv = to_csv_string(&table).unwrap();

    let mut lines = csv.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("Annual Spend ($M),Annual Sales ($M),ROAS"));
    assert!(header.ends_with("Marginal ROAS from $137M"));
    let first = lines.next().unwrap();
    assert!(first.starts_with("150,"));
    assert!(first.ends_with(','), "missing value should be an empty cell: {first}");
    assert!(lines.next().is_none());
}

#[test]
fn test_save_csv_writes_file() {
    let dir = std::env::temp_dir().join("kpi_dash_test_export");
    let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    let t = vec![rec(150_000_000.0, None), rec(175_000_000.0, None)];
    let rows: Vec<&ScenarioRecord> = t.iter().collect();

    let path = save_csv(&DataTable::from_rows(&rows, false), &dir, date).unwrap();
    assert_eq!(path.file_name().unwrap(), "kpi_projections_20260102.csv");

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 3);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_table_rounds_ties_to_even() {
    let mut r = rec(137_250_000.0, Some(0.1245));
    r.blended_roas = 2.125;
    r.blended_aov = 118.5;
    r.total_annual_traffic = 2_500_000.5;
    let rows = vec![&r];
    let table = DataTable::from_rows(&rows, true);

    let row = &table.rows[0];
    assert_eq!(row[0], 137.2);
    assert_eq!(row[2], 2.12);
    assert_eq!(row[4], 118.0);
    assert_eq!(row[5], 2_500_000.0);
}
