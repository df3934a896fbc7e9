//! Synthetic monthly financials for the scenario-label dashboard.
//!
//! The label only changes titles; values are drawn independently of it.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

pub const START_YEAR: i32 = 2024;
pub const END_YEAR: i32 = 2026;

const REVENUE_RANGE: (u64, u64) = (100_000, 500_000);
const COSTS_RANGE: (u64, u64) = (50_000, 200_000);
const PROFIT_RANGE: (u64, u64) = (20_000, 150_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenarioLabel {
    Baseline,
    Optimistic,
    Pessimistic,
    Conservative,
}

impl ScenarioLabel {
    pub fn all() -> [ScenarioLabel; 4] {
        [
            ScenarioLabel::Baseline,
            ScenarioLabel::Optimistic,
            ScenarioLabel::Pessimistic,
            ScenarioLabel::Conservative,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Baseline => "Baseline",
            Self::Optimistic => "Optimistic",
            Self::Pessimistic => "Pessimistic",
            Self::Conservative => "Conservative",
        }
    }
}

impl fmt::Display for ScenarioLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyFinancials {
    pub date: NaiveDate,
    pub revenue: u64,
    pub costs: u64,
    pub profit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticTotals {
    pub revenue: u64,
    pub costs: u64,
    pub profit: u64,
}

impl SyntheticTotals {
    pub fn from_rows(rows: &[MonthlyFinancials]) -> Self {
        SyntheticTotals {
            revenue: rows.iter().map(|r| r.revenue).sum(),
            costs: rows.iter().map(|r| r.costs).sum(),
            profit: rows.iter().map(|r| r.profit).sum(),
        }
    }
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Month-end dates from January of the first year through December of the last.
pub fn month_ends(start_year: i32, end_year: i32) -> Vec<NaiveDate> {
    (start_year..=end_year)
        .flat_map(|year| (1..=12).filter_map(move |month| month_end(year, month)))
        .collect()
}

/// One row per month-end, deterministic for a given seed.
pub fn generate_monthly(seed: u64) -> Vec<MonthlyFinancials> {
    let mut rng = StdRng::seed_from_u64(seed);
    month_ends(START_YEAR, END_YEAR)
        .into_iter()
        .map(|date| MonthlyFinancials {
            date,
            revenue: rng.gen_range(REVENUE_RANGE.0..REVENUE_RANGE.1),
            costs: rng.gen_range(COSTS_RANGE.0..COSTS_RANGE.1),
            profit: rng.gen_range(PROFIT_RANGE.0..PROFIT_RANGE.1),
        })
        .collect()
}
