//! Linear regression of value against elapsed days.
//!
//! The time axis is continuous (fractional days since the first sample),
//! not the sample index, so irregular sampling gaps do not distort the
//! slope.

use crate::models::{ForecastInput, PointForecaster};

/// Ordinary least squares over `(elapsed_days, value)`, extrapolated to
/// the last observed day plus the forecast horizon.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeRegressionForecaster;

impl PointForecaster for TimeRegressionForecaster {
    fn forecast(&self, input: &ForecastInput<'_>) -> f64 {
        let samples = input.samples;
        let n = samples.len();
        if n < 2 {
            return input.last_value().max(0.0);
        }

        let origin = samples[0].timestamp_ms;
        let xs: Vec<f64> = samples.iter().map(|s| s.elapsed_days(origin)).collect();

        let x_mean = xs.iter().sum::<f64>() / n as f64;
        let y_mean = samples.iter().map(|s| s.value).sum::<f64>() / n as f64;

        let mut cov = 0.0;
        let mut var = 0.0;
        for (x, s) in xs.iter().zip(samples.iter()) {
            cov += (x - x_mean) * (s.value - y_mean);
            var += (x - x_mean).powi(2);
        }

        let (slope, intercept) = if var == 0.0 {
            (0.0, y_mean)
        } else {
            let slope = cov / var;
            (slope, y_mean - slope * x_mean)
        };

        let target_day = xs[n - 1] + input.period_days as f64;
        (intercept + slope * target_day).max(0.0)
    }

    fn name(&self) -> &'static str {
        "regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::DAY_MS;
    use crate::core::Sample;
    use crate::models::test_support::{prepared, MONDAY};
    use crate::models::ForecastInput;
    use approx::assert_relative_eq;

    fn run(values: &[f64], period_days: u32) -> f64 {
        let (samples, features, decomposition) = prepared(values);
        let input = ForecastInput {
            samples: &samples,
            features: &features,
            decomposition: &decomposition,
            period_days,
        };
        TimeRegressionForecaster.forecast(&input)
    }

    #[test]
    fn short_series_return_last_value() {
        assert_eq!(run(&[12.0], 7), 12.0);
        assert_eq!(run(&[], 7), 0.0);
    }

    #[test]
    fn constant_series_predicts_the_constant() {
        assert_relative_eq!(run(&vec![100.0; 15], 30), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn linear_rise_extrapolates_proportionally_to_slope() {
        // 25 daily samples rising 50 -> 150: slope is 100/24 per day.
        let values: Vec<f64> = (0..25).map(|i| 50.0 + i as f64 * 100.0 / 24.0).collect();
        let slope = 100.0 / 24.0;

        let seven = run(&values, 7);
        assert!(seven > 150.0);
        assert_relative_eq!(seven, 150.0 + 7.0 * slope, epsilon = 1e-6);

        let thirty = run(&values, 30);
        assert_relative_eq!(thirty, 150.0 + 30.0 * slope, epsilon = 1e-6);
    }

    #[test]
    fn irregular_sampling_does_not_distort_the_slope() {
        // Values follow a 1-per-day ramp but the gaps vary: the continuous
        // time axis must recover the daily slope, where an index axis
        // would not.
        let day_offsets = [0_i64, 1, 2, 5, 6, 10, 11, 15];
        let samples: Vec<Sample> = day_offsets
            .iter()
            .map(|&d| Sample::new(MONDAY + d * DAY_MS, 10.0 + d as f64))
            .collect();
        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
        let features = crate::features::engineer(&values);
        let decomposition = crate::seasonality::SeasonalDecomposer::default().decompose(&samples);

        let forecast = TimeRegressionForecaster.forecast(&ForecastInput {
            samples: &samples,
            features: &features,
            decomposition: &decomposition,
            period_days: 10,
        });

        // Perfect daily ramp extrapolated 10 days past day 15.
        assert_relative_eq!(forecast, 10.0 + 25.0, epsilon = 1e-9);
    }

    #[test]
    fn falling_series_clamps_at_zero() {
        let values: Vec<f64> = (0..15).map(|i| (42.0 - 3.0 * i as f64).max(0.0)).collect();
        assert!(run(&values, 30) >= 0.0);
    }
}
