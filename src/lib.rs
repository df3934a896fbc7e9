//! Scenario dashboards over precomputed e-commerce KPI projections.

pub mod comparison;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod report;
pub mod summary;
pub mod synthetic;
pub mod threshold;

pub use error::{DashError, DashResult};
