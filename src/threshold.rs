//! First-crossing scans over spend-ordered tables.
//!
//! A crossing is the first row, in ascending spend order, whose metric is
//! strictly below the threshold. Thresholds without a crossing are omitted.

use crate::config::WEEKS_PER_YEAR;
use crate::dataset::{BaselineRecord, ScenarioRecord};

/// Scan `rows` once per threshold, keeping the input threshold order.
///
/// Returns `(threshold, row)` pairs. `metric` returning `None` skips the row.
pub fn scan_thresholds<'a, T, F>(rows: &[&'a T], thresholds: &[f64], metric: F) -> Vec<(f64, &'a T)>
where
    F: Fn(&T) -> Option<f64>,
{
    thresholds
        .iter()
        .filter_map(|&threshold| {
            rows.iter()
                .find(|row| metric(**row).is_some_and(|m| m < threshold))
                .map(|row| (threshold, *row))
        })
        .collect()
}

/// Crossing of the marginal-from-baseline ROAS.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginalCrossing {
    pub threshold: f64,
    pub annual_spend: f64,
    /// Spend beyond the configured baseline spend.
    pub incremental_spend: f64,
    pub annual_sales: f64,
    pub blended_roas: f64,
}

/// Crossing of weekly marginal ROAS on the baseline curve.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyCrossing {
    pub threshold: f64,
    pub weekly_spend: f64,
    pub annual_spend: f64,
    pub annual_sales: f64,
}

/// Rows that carry the marginal-from-baseline value, in table order.
pub fn with_marginal_from_baseline<'a>(rows: &[&'a ScenarioRecord]) -> Vec<&'a ScenarioRecord> {
    rows.iter()
        .copied()
        .filter(|r| r.marginal_roas_from_137m.is_some())
        .collect()
}

pub fn scan_marginal(
    rows: &[&ScenarioRecord],
    thresholds: &[f64],
    baseline_spend: f64,
) -> Vec<MarginalCrossing> {
    let rows = with_marginal_from_baseline(rows);
    scan_thresholds(&rows, thresholds, |r| r.marginal_roas_from_137m)
        .into_iter()
        .map(|(threshold, r)| MarginalCrossing {
            threshold,
            annual_spend: r.total_annual_spend,
            incremental_spend: r.total_annual_spend - baseline_spend,
            annual_sales: r.total_annual_sales,
            blended_roas: r.blended_roas,
        })
        .collect()
}

pub fn scan_weekly(rows: &[&BaselineRecord], thresholds: &[f64]) -> Vec<WeeklyCrossing> {
    scan_thresholds(rows, thresholds, |r| Some(r.marginal_roas))
        .into_iter()
        .map(|(threshold, r)| WeeklyCrossing {
            threshold,
            weekly_spend: r.weekly_spend,
            annual_spend: r.weekly_spend * WEEKS_PER_YEAR,
            annual_sales: r.sales * WEEKS_PER_YEAR,
        })
        .collect()
}
