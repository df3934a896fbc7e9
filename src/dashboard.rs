//! One dashboard session: a shared dataset handle plus configuration.
//!
//! Every interaction recomputes filter, headline metrics and the panel for
//! the selected analysis mode from scratch.

use crate::comparison::{self, ComparisonRow};
use crate::config::{DashboardConfig, DISPLAY_UNIT};
use crate::dataset::{BaselineRecord, Dataset, ScenarioRecord};
use crate::error::{DashError, DashResult};
use crate::export::DataTable;
use crate::filter::{self, ScenarioFilter, SliderBounds, SpendRange};
use crate::summary::HeadlineMetrics;
use crate::threshold::{self, MarginalCrossing, WeeklyCrossing};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const EMPTY_SELECTION_WARNING: &str =
    "No scenarios match your filters. Please adjust the controls.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    AnnualOverview,
    MarginalReturns,
    ScenarioComparison,
    DataTable,
}

impl AnalysisMode {
    pub fn all() -> [AnalysisMode; 4] {
        [
            AnalysisMode::AnnualOverview,
            AnalysisMode::MarginalReturns,
            AnalysisMode::ScenarioComparison,
            AnalysisMode::DataTable,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::AnnualOverview => "Annual Performance Overview",
            Self::MarginalReturns => "Marginal Returns Analysis",
            Self::ScenarioComparison => "Scenario Comparison",
            Self::DataTable => "Complete Data Table",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for AnalysisMode {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overview" | "annual" | "annual-overview" => Ok(Self::AnnualOverview),
            "marginal" | "marginal-returns" => Ok(Self::MarginalReturns),
            "comparison" | "compare" | "scenario-comparison" => Ok(Self::ScenarioComparison),
            "table" | "data-table" => Ok(Self::DataTable),
            other => Err(DashError::InvalidSelection(format!(
                "unknown analysis mode: {other}"
            ))),
        }
    }
}

/// The state of the dashboard controls for one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Spend slider position in $M, inclusive.
    pub spend_millions: (u64, u64),
    pub min_roas: f64,
    pub mode: AnalysisMode,
    /// Comparison targets in $M; empty means the selector defaults.
    pub comparison_millions: Vec<f64>,
}

impl Selection {
    pub fn new(spend_millions: (u64, u64), min_roas: f64, mode: AnalysisMode) -> Self {
        Selection {
            spend_millions,
            min_roas,
            mode,
            comparison_millions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarginalPanel {
    /// The dataset carries marginal ROAS measured from the baseline spend.
    FromBaseline {
        baseline_label: String,
        rows: Vec<ScenarioRecord>,
        crossings: Vec<MarginalCrossing>,
    },
    /// Fallback to the weekly baseline curve.
    Weekly {
        rows: Vec<BaselineRecord>,
        crossings: Vec<WeeklyCrossing>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Empty {
        message: String,
    },
    Overview {
        rows: Vec<ScenarioRecord>,
        reference_line: f64,
    },
    Marginal(MarginalPanel),
    Comparison {
        options: Vec<f64>,
        targets: Vec<f64>,
        rows: Vec<ComparisonRow>,
        warning: Option<String>,
    },
    Table {
        table: DataTable,
        has_marginal_from_baseline: bool,
        file_name: String,
    },
}

/// Everything one interaction renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub selection: Selection,
    pub bounds: Option<SliderBounds>,
    pub total_count: usize,
    pub headline: Option<HeadlineMetrics>,
    pub panel: Panel,
    pub data_timestamp: String,
}

impl DashboardView {
    pub fn filtered_count(&self) -> usize {
        self.headline.as_ref().map_or(0, |h| h.scenario_count)
    }
}

pub struct Dashboard {
    dataset: Arc<Dataset>,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>, config: DashboardConfig) -> Self {
        Dashboard { dataset, config }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn bounds(&self) -> Option<SliderBounds> {
        SliderBounds::from_table(
            &self.dataset.annual_projections,
            self.config.slider_step_millions,
        )
    }

    /// The selection a fresh session starts with.
    pub fn default_selection(&self, mode: AnalysisMode) -> Selection {
        let spend = self.bounds().map_or((0, 0), |b| b.default_selection());
        Selection::new(spend, 0.0, mode)
    }

    pub fn interact(&self, selection: &Selection) -> DashResult<DashboardView> {
        self.interact_on(selection, chrono::Local::now().date_naive())
    }

    /// Like `interact`, with the export date supplied by the caller.
    pub fn interact_on(&self, selection: &Selection, today: NaiveDate) -> DashResult<DashboardView> {
        filter::validate_min_roas(selection.min_roas)?;
        let (lo, hi) = selection.spend_millions;
        let range = filter::validate_range(lo, hi)?;
        let table = &self.dataset.annual_projections;
        let filtered = ScenarioFilter::new(range, selection.min_roas).apply(table);

        let headline = if filtered.is_empty() {
            log::warn!("selection {lo}M..{hi}M, roas>={} matched nothing", selection.min_roas);
            None
        } else {
            Some(HeadlineMetrics::compute(&filtered, table)?)
        };

        let panel = if filtered.is_empty() {
            Panel::Empty {
                message: EMPTY_SELECTION_WARNING.to_string(),
            }
        } else {
            match selection.mode {
                AnalysisMode::AnnualOverview => Panel::Overview {
                    rows: filtered.iter().map(|r| (*r).clone()).collect(),
                    reference_line: self.config.roas_reference_line,
                },
                AnalysisMode::MarginalReturns => {
                    Panel::Marginal(self.marginal_panel(&filtered, &range))
                }
                AnalysisMode::ScenarioComparison => {
                    self.comparison_panel(&filtered, &selection.comparison_millions)
                }
                AnalysisMode::DataTable => {
                    let has_column = self.dataset.has_marginal_from_baseline();
                    Panel::Table {
                        table: DataTable::from_rows(&filtered, has_column),
                        has_marginal_from_baseline: has_column,
                        file_name: crate::export::export_file_name(today),
                    }
                }
            }
        };

        Ok(DashboardView {
            selection: selection.clone(),
            bounds: self.bounds(),
            total_count: table.len(),
            headline,
            panel,
            data_timestamp: self.dataset.timestamp_label(),
        })
    }

    fn marginal_panel(&self, filtered: &[&ScenarioRecord], range: &SpendRange) -> MarginalPanel {
        if self.dataset.has_marginal_from_baseline() {
            let rows = threshold::with_marginal_from_baseline(filtered);
            let crossings = threshold::scan_marginal(
                &rows,
                &self.config.marginal_thresholds,
                self.config.baseline_spend,
            );
            MarginalPanel::FromBaseline {
                baseline_label: self.config.baseline_label(),
                rows: rows.into_iter().cloned().collect(),
                crossings,
            }
        } else {
            let rows = filter::filter_baseline(&self.dataset.baseline_projections, range);
            let crossings = threshold::scan_weekly(&rows, &self.config.weekly_thresholds);
            MarginalPanel::Weekly {
                rows: rows.into_iter().cloned().collect(),
                crossings,
            }
        }
    }

    fn comparison_panel(&self, filtered: &[&ScenarioRecord], requested_millions: &[f64]) -> Panel {
        let options = comparison::spend_options(filtered);
        let targets: Vec<f64> = if requested_millions.is_empty() {
            comparison::default_selection(&options)
        } else {
            requested_millions
                .iter()
                .map(|m| m.round_ties_even() * DISPLAY_UNIT)
                .collect()
        };

        match comparison::compare(filtered, &targets, self.config.comparison_tolerance) {
            Ok(rows) => Panel::Comparison {
                options,
                targets,
                rows,
                warning: None,
            },
            Err(e) => {
                log::warn!("scenario comparison degraded: {e}");
                Panel::Comparison {
                    options,
                    targets,
                    rows: Vec::new(),
                    warning: Some(e.to_string()),
                }
            }
        }
    }
}
