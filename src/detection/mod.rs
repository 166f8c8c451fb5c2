//! Anomaly screening over raw metric history: outlier removal before model
//! fitting, and distribution-shift detection on the cleaned series.

pub mod drift;
pub mod outlier;

pub use drift::{DriftConfig, DriftDetector};
pub use outlier::{CleanedSeries, OutlierCleaner, OutlierConfig};
