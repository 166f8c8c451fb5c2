//! Error types for the incident-forecast library.
//!
//! The numeric components never fail: short or degenerate inputs degrade to
//! documented defaults. Errors only surface at the engine boundary, where
//! metric history is pulled from a caller-supplied provider.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur at the forecasting engine boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// The metric history provider failed to deliver a series.
    #[error("metric history unavailable: {0}")]
    MetricHistory(String),

    /// The provider has no series under the requested name.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// Invalid configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
