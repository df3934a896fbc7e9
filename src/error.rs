use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error(
        "Pipeline data not found at {}. Please run the KPI modeling pipeline first.",
        .path.display()
    )]
    DatasetMissing { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("No scenarios match the current filters")]
    EmptySelection,

    #[error("No scenario within tolerance of ${target_millions:.1}M")]
    NoScenarioNear { target_millions: f64 },
}

pub type DashResult<T> = Result<T, DashError>;
