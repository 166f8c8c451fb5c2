//! Point forecasters and the fixed-weight ensemble that combines them.

pub mod autoregressive;
pub mod decomposition;
pub mod ensemble;
pub mod regression;
pub mod smoothing;

pub use autoregressive::Ar1Forecaster;
pub use decomposition::DecompositionForecaster;
pub use ensemble::{EnsembleConfig, EnsembleForecast, EnsembleWeights, ForecastEnsemble};
pub use regression::TimeRegressionForecaster;
pub use smoothing::{HoltSmoother, SmoothingConfig};

use crate::core::Sample;
use crate::features::FeatureSet;
use crate::seasonality::Decomposition;

/// Everything a sub-forecaster may draw on for one prediction.
#[derive(Debug, Clone, Copy)]
pub struct ForecastInput<'a> {
    /// Cleaned series, order preserved.
    pub samples: &'a [Sample],
    /// Lag and rolling-window features over the cleaned values.
    pub features: &'a FeatureSet,
    /// Weekly decomposition of the cleaned series.
    pub decomposition: &'a Decomposition,
    /// Forecast horizon in days.
    pub period_days: u32,
}

impl ForecastInput<'_> {
    /// Last observed value, or 0 on an empty series.
    pub fn last_value(&self) -> f64 {
        self.samples.last().map(|s| s.value).unwrap_or(0.0)
    }
}

/// Common interface for the ensemble's sub-forecasters.
///
/// Object-safe; the ensemble holds them as `Box<dyn PointForecaster>`.
/// Implementations never fail: degenerate inputs degrade to the last
/// observed value (or zero), and every forecast clamps at zero — none of
/// the tracked metrics is meaningful below it.
pub trait PointForecaster {
    /// Predict a single point value at the input's horizon.
    fn forecast(&self, input: &ForecastInput<'_>) -> f64;

    /// Short model name for diagnostics.
    fn name(&self) -> &'static str;
}
