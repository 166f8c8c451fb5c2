//! Decomposition-based forecaster: trend extrapolation plus the weekly
//! profile of the forecast date.

use crate::core::sample::{weekday_index, DAY_MS};
use crate::models::{ForecastInput, PointForecaster};

/// Extrapolates the tail slope of the decomposed trend forward by the
/// forecast horizon, then adds the weekly-profile value for the day of
/// week the forecast date falls on, weighted by seasonality strength.
#[derive(Debug, Clone, Copy)]
pub struct DecompositionForecaster {
    /// Number of trailing trend points whose slope is extrapolated.
    pub trend_tail: usize,
    /// Below this many samples the forecaster returns the last value.
    pub min_samples: usize,
}

impl Default for DecompositionForecaster {
    fn default() -> Self {
        Self {
            trend_tail: 7,
            min_samples: 5,
        }
    }
}

impl PointForecaster for DecompositionForecaster {
    fn forecast(&self, input: &ForecastInput<'_>) -> f64 {
        let trend = &input.decomposition.trend;
        let n = trend.len();
        if n < self.min_samples {
            return input.last_value().max(0.0);
        }

        let tail = self.trend_tail.min(n);
        let slope = if tail >= 2 {
            (trend[n - 1] - trend[n - tail]) / (tail - 1) as f64
        } else {
            0.0
        };
        let base = trend[n - 1] + slope * input.period_days as f64;

        // Day of week the forecast lands on, derived the same way the
        // profile was built (UTC).
        let seasonal = input
            .samples
            .last()
            .map(|last| {
                let forecast_ms = last.timestamp_ms + input.period_days as i64 * DAY_MS;
                input.decomposition.weekly_profile[weekday_index(forecast_ms)]
                    * input.decomposition.strength
            })
            .unwrap_or(0.0);

        (base + seasonal).max(0.0)
    }

    fn name(&self) -> &'static str {
        "decomposition"
    }
}
