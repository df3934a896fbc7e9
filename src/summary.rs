use crate::dataset::ScenarioRecord;
use crate::error::{DashError, DashResult};

/// Headline figures shown above every analysis mode.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineMetrics {
    pub scenario_count: usize,
    /// Filtered count minus total count; zero or negative.
    pub count_delta: i64,
    pub max_sales: f64,
    /// Max filtered sales above the smallest sales in the full table.
    pub sales_potential: f64,
    pub best_roas: f64,
    /// Best filtered ROAS above the smallest ROAS in the full table.
    pub roas_range: f64,
    /// Spend of the first record reaching `best_roas`.
    pub optimal_spend: f64,
}

impl HeadlineMetrics {
    /// Compute headline metrics for `filtered` relative to `full`.
    ///
    /// An empty selection is an error rather than a row of zeros.
    pub fn compute(filtered: &[&ScenarioRecord], full: &[ScenarioRecord]) -> DashResult<Self> {
        let first = filtered.first().ok_or(DashError::EmptySelection)?;

        let max_sales = filtered
            .iter()
            .map(|r| r.total_annual_sales)
            .fold(f64::NEG_INFINITY, f64::max);

        // Strict comparison keeps the first of equal maxima.
        let mut best = *first;
        for &r in &filtered[1..] {
            if r.blended_roas > best.blended_roas {
                best = r;
            }
        }

        let global_min_sales = full
            .iter()
            .map(|r| r.total_annual_sales)
            .fold(f64::INFINITY, f64::min);
        let global_min_roas = full
            .iter()
            .map(|r| r.blended_roas)
            .fold(f64::INFINITY, f64::min);

        Ok(HeadlineMetrics {
            scenario_count: filtered.len(),
            count_delta: filtered.len() as i64 - full.len() as i64,
            max_sales,
            sales_potential: max_sales - global_min_sales,
            best_roas: best.blended_roas,
            roas_range: best.blended_roas - global_min_roas,
            optimal_spend: best.total_annual_spend,
        })
    }
}
