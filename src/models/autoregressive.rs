//! AR(1)-style forecaster over the lag-1 feature.

use crate::models::{ForecastInput, PointForecaster};
use crate::utils::stats::mean;

/// Fits `value[t] = phi * value[t-1] + c` by ordinary least squares and
/// blends the one-step AR prediction with the trailing weekly mean to damp
/// noise in the last observation.
#[derive(Debug, Clone, Copy)]
pub struct Ar1Forecaster {
    /// Weight of the raw AR prediction in the blend; the remainder goes to
    /// the trailing rolling-week mean.
    pub ar_blend: f64,
    /// Below this many samples the forecaster returns the last value.
    pub min_samples: usize,
}

impl Default for Ar1Forecaster {
    fn default() -> Self {
        Self {
            ar_blend: 0.6,
            min_samples: 10,
        }
    }
}

impl PointForecaster for Ar1Forecaster {
    fn forecast(&self, input: &ForecastInput<'_>) -> f64 {
        let values = &input.features.values;
        let n = values.len();
        if n < self.min_samples {
            return input.last_value().max(0.0);
        }

        // OLS over (lag1[t], value[t]) pairs, t >= 1.
        let xs = &input.features.lag1[1..];
        let ys = &values[1..];
        let x_mean = mean(xs);
        let y_mean = mean(ys);

        let mut cov = 0.0;
        let mut var = 0.0;
        for (x, y) in xs.iter().zip(ys.iter()) {
            cov += (x - x_mean) * (y - y_mean);
            var += (x - x_mean).powi(2);
        }

        let (phi, c) = if var == 0.0 {
            (0.0, y_mean)
        } else {
            let phi = cov / var;
            (phi, y_mean - phi * x_mean)
        };

        let ar_prediction = phi * input.last_value() + c;
        let blended = self.ar_blend * ar_prediction
            + (1.0 - self.ar_blend) * input.features.last_rolling_mean();

        blended.max(0.0)
    }

    fn name(&self) -> &'static str {
        "autoregressive"
    }
}
