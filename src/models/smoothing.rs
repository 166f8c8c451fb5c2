//! Holt's linear trend (double exponential smoothing) forecaster.
//!
//! The model equations are:
//! - Level: `l_t = alpha * y_t + (1-alpha) * (l_{t-1} + b_{t-1})`
//! - Trend: `b_t = beta * (l_t - l_{t-1}) + (1-beta) * b_{t-1}`
//! - Forecast: `y_{t+h} = l_t + h * b_t`
//!
//! The horizon `h` is measured in weeks: `ceil(period_days / 7)`.

use crate::models::{ForecastInput, PointForecaster};

/// Smoothing parameters for Holt's linear trend.
#[derive(Debug, Clone, Copy)]
pub struct SmoothingConfig {
    /// Level smoothing parameter.
    pub alpha: f64,
    /// Trend smoothing parameter.
    pub beta: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.1,
        }
    }
}

/// Exponential-smoothing forecaster with a linear trend state.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoltSmoother {
    config: SmoothingConfig,
}

impl HoltSmoother {
    pub fn new(config: SmoothingConfig) -> Self {
        Self { config }
    }

    /// Run the level/trend recursion over the series, returning the final
    /// state `(level, trend)`.
    fn smooth(&self, values: &[f64]) -> (f64, f64) {
        // Level starts at the first observation, trend at the first
        // difference.
        let mut level = values[0];
        let mut trend = if values.len() > 1 {
            values[1] - values[0]
        } else {
            0.0
        };

        let SmoothingConfig { alpha, beta } = self.config;
        for &y in values.iter().skip(1) {
            let prev_level = level;
            level = alpha * y + (1.0 - alpha) * (prev_level + trend);
            trend = beta * (level - prev_level) + (1.0 - beta) * trend;
        }

        (level, trend)
    }
}

impl PointForecaster for HoltSmoother {
    fn forecast(&self, input: &ForecastInput<'_>) -> f64 {
        let values = &input.features.values;
        if values.is_empty() {
            return 0.0;
        }

        let (level, trend) = self.smooth(values);
        // Horizon in weeks, rounded up.
        let horizon = input.period_days.div_ceil(7) as f64;

        (level + horizon * trend).max(0.0)
    }

    fn name(&self) -> &'static str {
        "smoothing"
    }
}
