//! Pipeline dataset: fixed-schema tables loaded once and shared read-only.

use crate::error::{DashError, DashResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// One simulated annual spend level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub total_annual_spend: f64,
    pub total_annual_sales: f64,
    pub total_annual_traffic: f64,
    pub total_annual_transactions: f64,
    pub blended_roas: f64,
    pub blended_conversion_rate: f64,
    pub blended_aov: f64,
    #[serde(default)]
    pub marginal_roas: Option<f64>,
    #[serde(default)]
    pub marginal_roas_from_137m: Option<f64>,
}

/// One weekly spend level of the baseline curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineRecord {
    pub weekly_spend: f64,
    pub sales: f64,
    pub marginal_roas: f64,
    /// Incremental weekly sales for the next spend step.
    #[serde(default)]
    pub sales_increase: f64,
}

/// Holiday rows are passed through untouched; cells may be any JSON value.
pub type HolidayRecord = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub annual_projections: Vec<ScenarioRecord>,
    pub baseline_projections: Vec<BaselineRecord>,
    #[serde(default)]
    pub holiday_projections: Vec<HolidayRecord>,
    #[serde(default)]
    pub summary_metrics: BTreeMap<String, serde_json::Value>,
    pub data_timestamp: NaiveDateTime,
}

impl Dataset {
    /// Parse a dataset from JSON text and restore the spend ordering.
    pub fn from_json(raw: &str) -> DashResult<Self> {
        let mut dataset: Dataset = serde_json::from_str(raw)?;
        dataset.normalize();
        Ok(dataset)
    }

    /// Read the dataset written by the modeling pipeline.
    pub fn load(path: &Path) -> DashResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DashError::DatasetMissing {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        let dataset = Self::from_json(&raw)?;
        log::info!(
            "loaded {}: {} scenarios, {} baseline rows, {} holiday rows (generated {})",
            path.display(),
            dataset.annual_projections.len(),
            dataset.baseline_projections.len(),
            dataset.holiday_projections.len(),
            dataset.timestamp_label()
        );
        Ok(dataset)
    }

    /// Write the dataset as pretty JSON.
    pub fn save(&self, path: &Path) -> DashResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    // Threshold scans depend on ascending spend order.
    fn normalize(&mut self) {
        let scenarios_sorted = self
            .annual_projections
            .windows(2)
            .all(|w| w[0].total_annual_spend <= w[1].total_annual_spend);
        if !scenarios_sorted {
            log::warn!("annual_projections not ordered by spend, sorting");
            self.annual_projections
                .sort_by(|a, b| a.total_annual_spend.total_cmp(&b.total_annual_spend));
        }

        let baseline_sorted = self
            .baseline_projections
            .windows(2)
            .all(|w| w[0].weekly_spend <= w[1].weekly_spend);
        if !baseline_sorted {
            log::warn!("baseline_projections not ordered by weekly spend, sorting");
            self.baseline_projections
                .sort_by(|a, b| a.weekly_spend.total_cmp(&b.weekly_spend));
        }
    }

    /// True when the marginal-from-baseline column is present.
    pub fn has_marginal_from_baseline(&self) -> bool {
        self.annual_projections
            .iter()
            .any(|r| r.marginal_roas_from_137m.is_some())
    }

    pub fn timestamp_label(&self) -> String {
        self.data_timestamp.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn min_sales(&self) -> Option<f64> {
        self.annual_projections
            .iter()
            .map(|r| r.total_annual_sales)
            .reduce(f64::min)
    }

    pub fn min_roas(&self) -> Option<f64> {
        self.annual_projections
            .iter()
            .map(|r| r.blended_roas)
            .reduce(f64::min)
    }
}

/// Process-wide, write-once dataset cache.
///
/// The first `get_or_load` reads the file; later calls hand out the same
/// `Arc`. A failed load is not cached.
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceLock<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_or_load(&self) -> DashResult<Arc<Dataset>> {
        if let Some(dataset) = self.cell.get() {
            return Ok(Arc::clone(dataset));
        }
        let loaded = Arc::new(Dataset::load(&self.path)?);
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
