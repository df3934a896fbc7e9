//! Dashboard configuration.
//!
//! Every key is optional; a missing config file means all defaults.

use crate::error::DashResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Currency units per display unit ($M).
pub const DISPLAY_UNIT: f64 = 1_000_000.0;

pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Options offered by the minimum-ROAS selector.
pub const ROAS_OPTIONS: [f64; 8] = [0.0, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset written by the modeling pipeline.
    pub data_path: PathBuf,
    /// Annual spend the marginal-from-baseline column is measured against.
    pub baseline_spend: f64,
    pub marginal_thresholds: Vec<f64>,
    pub weekly_thresholds: Vec<f64>,
    /// Reference lines drawn on the weekly marginal ROAS chart.
    pub weekly_reference_lines: Vec<f64>,
    /// Horizontal reference drawn on the ROAS curve.
    pub roas_reference_line: f64,
    /// Relative band used when matching comparison targets (0.01 = ±1%).
    pub comparison_tolerance: f64,
    pub slider_step_millions: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from("streamlit_data.json"),
            baseline_spend: 137_200_000.0,
            marginal_thresholds: vec![3.0, 2.5, 2.0, 1.5, 1.0, 0.5],
            weekly_thresholds: vec![4.0, 3.5, 3.0, 2.5, 2.0, 1.5, 1.0],
            weekly_reference_lines: vec![3.0, 2.5, 2.0, 1.5, 1.0],
            roas_reference_line: 2.0,
            comparison_tolerance: 0.01,
            slider_step_millions: 5,
        }
    }
}

impl DashboardConfig {
    /// Load a TOML config file.
    pub fn load(path: &Path) -> DashResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: DashboardConfig = toml::from_str(&raw)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> DashResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn baseline_label(&self) -> String {
        format!("${:.0}M", self.baseline_spend / DISPLAY_UNIT)
    }
}
