use crate::config::DISPLAY_UNIT;
use crate::dataset::ScenarioRecord;
use crate::error::{DashError, DashResult};
use crate::format;

pub const MAX_SCENARIOS: usize = 3;

/// Preselected option positions for the three scenario selectors.
const DEFAULT_POSITIONS: [usize; MAX_SCENARIOS] = [0, 5, 10];

/// One formatted column of the side-by-side comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub scenario: String,
    pub annual_spend: String,
    pub annual_sales: String,
    pub roas: String,
    pub traffic: String,
    pub conversion_rate: String,
    pub aov: String,
    pub transactions: String,
}

impl ComparisonRow {
    pub const HEADERS: [&'static str; 8] = [
        "Scenario",
        "Annual Spend",
        "Annual Sales",
        "ROAS",
        "Traffic",
        "Conv Rate",
        "AOV",
        "Transactions",
    ];

    fn from_record(label: String, r: &ScenarioRecord) -> Self {
        ComparisonRow {
            scenario: label,
            annual_spend: format::millions(r.total_annual_spend),
            annual_sales: format::millions(r.total_annual_sales),
            roas: format::ratio(r.blended_roas),
            traffic: format::grouped(r.total_annual_traffic),
            conversion_rate: format::percent(r.blended_conversion_rate),
            aov: format!("${:.0}", r.blended_aov),
            transactions: format::grouped(r.total_annual_transactions),
        }
    }

    pub fn cells(&self) -> [&str; 8] {
        [
            self.scenario.as_str(),
            self.annual_spend.as_str(),
            self.annual_sales.as_str(),
            self.roas.as_str(),
            self.traffic.as_str(),
            self.conversion_rate.as_str(),
            self.aov.as_str(),
            self.transactions.as_str(),
        ]
    }
}

/// Selector options: spends rounded to the nearest million, first-seen order.
pub fn spend_options(filtered: &[&ScenarioRecord]) -> Vec<f64> {
    let mut options: Vec<f64> = Vec::new();
    for r in filtered {
        let rounded = (r.total_annual_spend / DISPLAY_UNIT).round_ties_even() * DISPLAY_UNIT;
        if !options.contains(&rounded) {
            options.push(rounded);
        }
    }
    options
}

/// The initial target of each selector. Empty when there are no options.
pub fn default_selection(options: &[f64]) -> Vec<f64> {
    if options.is_empty() {
        return Vec::new();
    }
    let last = options.len() - 1;
    DEFAULT_POSITIONS
        .iter()
        .map(|&pos| options[pos.min(last)])
        .collect()
}

/// First record whose spend lies within `tolerance` (relative) of `target`.
pub fn find_near<'a>(
    filtered: &[&'a ScenarioRecord],
    target: f64,
    tolerance: f64,
) -> Option<&'a ScenarioRecord> {
    let lo = target * (1.0 - tolerance);
    let hi = target * (1.0 + tolerance);
    filtered
        .iter()
        .copied()
        .find(|r| lo <= r.total_annual_spend && r.total_annual_spend <= hi)
}

/// Build one comparison row per target.
pub fn compare(
    filtered: &[&ScenarioRecord],
    targets: &[f64],
    tolerance: f64,
) -> DashResult<Vec<ComparisonRow>> {
    if filtered.is_empty() {
        return Err(DashError::EmptySelection);
    }
    if targets.is_empty() || targets.len() > MAX_SCENARIOS {
        return Err(DashError::InvalidSelection(format!(
            "expected 1 to {MAX_SCENARIOS} comparison spends, got {}",
            targets.len()
        )));
    }

    targets
        .iter()
        .enumerate()
        .map(|(i, &target)| {
            let record = find_near(filtered, target, tolerance).ok_or(
                DashError::NoScenarioNear {
                    target_millions: target / DISPLAY_UNIT,
                },
            )?;
            Ok(ComparisonRow::from_record(
                format!("Scenario {}", i + 1),
                record,
            ))
        })
        .collect()
}
