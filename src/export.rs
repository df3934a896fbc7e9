use crate::config::DISPLAY_UNIT;
use crate::dataset::ScenarioRecord;
use crate::error::DashResult;
use crate::format::round_to;
use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Rounded numeric view of the filtered scenarios, as shown and exported.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl DataTable {
    /// Build the table. The marginal-from-baseline column is included only when
    /// `with_marginal_from_baseline` is set; missing values become NaN.
    pub fn from_rows(filtered: &[&ScenarioRecord], with_marginal_from_baseline: bool) -> Self {
        let mut headers: Vec<String> = [
            "Annual Spend ($M)",
            "Annual Sales ($M)",
            "ROAS",
            "Conv Rate (%)",
            "AOV ($)",
            "Annual Traffic",
            "Marginal ROAS",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect();
        if with_marginal_from_baseline {
            headers.push("Marginal ROAS from $137M".to_string());
        }

        let rows = filtered
            .iter()
            .map(|r| {
                let mut row = vec![
                    round_to(r.total_annual_spend / DISPLAY_UNIT, 1),
                    round_to(r.total_annual_sales / DISPLAY_UNIT, 1),
                    round_to(r.blended_roas, 2),
                    round_to(r.blended_conversion_rate * 100.0, 2),
                    round_to(r.blended_aov, 0),
                    round_to(r.total_annual_traffic, 0),
                    r.marginal_roas.map_or(f64::NAN, |m| round_to(m, 3)),
                ];
                if with_marginal_from_baseline {
                    row.push(r.marginal_roas_from_137m.map_or(f64::NAN, |m| round_to(m, 3)));
                }
                row
            })
            .collect();

        DataTable { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `kpi_projections_YYYYMMDD.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("kpi_projections_{}.csv", date.format("%Y%m%d"))
}

fn cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Write the table as CSV (header row, no index column).
pub fn write_csv<W: Write>(table: &DataTable, writer: W) -> DashResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|v| cell(*v)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV text of the table, as embedded in the HTML download button.
pub fn to_csv_string(table: &DataTable) -> DashResult<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Save the table under `dir` with a date-stamped name. Returns the path.
pub fn save_csv(table: &DataTable, dir: &Path, date: NaiveDate) -> DashResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(date));
    let file = std::fs::File::create(&path)?;
    write_csv(table, file)?;
    log::info!("exported {} rows to {}", table.rows.len(), path.display());
    Ok(path)
}
