use crate::config::{DISPLAY_UNIT, ROAS_OPTIONS, WEEKS_PER_YEAR};
use crate::dataset::{BaselineRecord, ScenarioRecord};
use crate::error::{DashError, DashResult};

/// Inclusive annual spend range in currency units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpendRange {
    pub lo: f64,
    pub hi: f64,
}

impl SpendRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        SpendRange { lo, hi }
    }

    /// Build from slider values expressed in $M.
    pub fn from_millions(lo_m: u64, hi_m: u64) -> Self {
        SpendRange {
            lo: lo_m as f64 * DISPLAY_UNIT,
            hi: hi_m as f64 * DISPLAY_UNIT,
        }
    }

    pub fn contains(&self, spend: f64) -> bool {
        self.lo <= spend && spend <= self.hi
    }

    /// The same range expressed as weekly spend.
    pub fn weekly(&self) -> SpendRange {
        SpendRange {
            lo: self.lo / WEEKS_PER_YEAR,
            hi: self.hi / WEEKS_PER_YEAR,
        }
    }
}

/// Spend range plus minimum blended ROAS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioFilter {
    pub spend: SpendRange,
    pub min_roas: f64,
}

impl ScenarioFilter {
    pub fn new(spend: SpendRange, min_roas: f64) -> Self {
        ScenarioFilter { spend, min_roas }
    }

    pub fn matches(&self, record: &ScenarioRecord) -> bool {
        self.spend.contains(record.total_annual_spend) && record.blended_roas >= self.min_roas
    }

    /// Matching records in table order. May be empty.
    pub fn apply<'a>(&self, table: &'a [ScenarioRecord]) -> Vec<&'a ScenarioRecord> {
        let filtered: Vec<&ScenarioRecord> = table.iter().filter(|r| self.matches(r)).collect();
        log::debug!(
            "filter [{:.0}, {:.0}] roas>={:.1}: {} of {} scenarios",
            self.spend.lo,
            self.spend.hi,
            self.min_roas,
            filtered.len(),
            table.len()
        );
        filtered
    }
}

/// Baseline rows whose weekly spend falls inside the weekly equivalent of `range`.
pub fn filter_baseline<'a>(
    table: &'a [BaselineRecord],
    range: &SpendRange,
) -> Vec<&'a BaselineRecord> {
    let weekly = range.weekly();
    table
        .iter()
        .filter(|r| weekly.contains(r.weekly_spend))
        .collect()
}

/// Reject min-ROAS values the selector does not offer.
pub fn validate_min_roas(min_roas: f64) -> DashResult<f64> {
    if ROAS_OPTIONS.iter().any(|o| (o - min_roas).abs() < 1e-9) {
        Ok(min_roas)
    } else {
        Err(DashError::InvalidSelection(format!(
            "minimum ROAS {min_roas} is not one of {ROAS_OPTIONS:?}"
        )))
    }
}

/// Spend slider limits in whole $M.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderBounds {
    pub min_millions: u64,
    pub max_millions: u64,
    pub step: u64,
}

impl SliderBounds {
    /// Derive limits from the table. `None` for an empty table.
    pub fn from_table(table: &[ScenarioRecord], step: u64) -> Option<Self> {
        let min = table
            .iter()
            .map(|r| r.total_annual_spend)
            .reduce(f64::min)?;
        let max = table
            .iter()
            .map(|r| r.total_annual_spend)
            .reduce(f64::max)?;
        Some(SliderBounds {
            min_millions: (min.max(0.0) / DISPLAY_UNIT).floor() as u64,
            max_millions: (max.max(0.0) / DISPLAY_UNIT).floor() as u64,
            step: step.max(1),
        })
    }

    /// The initial selection: everything from zero up to the maximum.
    pub fn default_selection(&self) -> (u64, u64) {
        (0, self.max_millions)
    }
}

/// Reject an inverted spend selection. Values beyond the slider are allowed
/// and simply match nothing there.
pub fn validate_range(lo_m: u64, hi_m: u64) -> DashResult<SpendRange> {
    if lo_m > hi_m {
        return Err(DashError::InvalidSelection(format!(
            "spend range lower bound {lo_m}M exceeds upper bound {hi_m}M"
        )));
    }
    Ok(SpendRange::from_millions(lo_m, hi_m))
}
