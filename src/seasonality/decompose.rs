//! Trend/seasonal/residual decomposition with a weekly cycle.
//!
//! The trend is a centered moving average with edge-clamped windows, the
//! seasonal component is a day-of-week profile of the detrended series
//! (UTC calendar), and the residual is whatever remains. For every index
//! `trend[i] + seasonal[i] + residual[i]` reconstructs the input exactly.

use crate::core::sample::{values_of, Sample};
use crate::utils::stats::mean_of_squares;

/// Days in the weekly cycle.
const WEEK_DAYS: usize = 7;

/// Configuration for seasonal decomposition.
#[derive(Debug, Clone, Copy)]
pub struct DecomposeConfig {
    /// Cap on the centered moving-average window.
    pub max_trend_window: usize,
    /// Below this many samples the decomposition degrades to identity.
    pub min_samples: usize,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            max_trend_window: 14,
            min_samples: 14,
        }
    }
}

/// Result of decomposing a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Long-term component, same length as the input.
    pub trend: Vec<f64>,
    /// Weekly component broadcast onto every sample.
    pub seasonal: Vec<f64>,
    /// Remainder after trend and seasonal are removed.
    pub residual: Vec<f64>,
    /// Seasonality strength in `[0, 1]`.
    pub strength: f64,
    /// Average detrended value per UTC day-of-week, Monday first.
    pub weekly_profile: [f64; WEEK_DAYS],
}

impl Decomposition {
    /// Identity decomposition for series too short to judge a weekly cycle.
    fn identity(values: Vec<f64>) -> Self {
        let n = values.len();
        Self {
            trend: values,
            seasonal: vec![0.0; n],
            residual: vec![0.0; n],
            strength: 0.0,
            weekly_profile: [0.0; WEEK_DAYS],
        }
    }

    /// Number of decomposed samples.
    pub fn len(&self) -> usize {
        self.trend.len()
    }

    /// Whether the decomposition holds no samples.
    pub fn is_empty(&self) -> bool {
        self.trend.is_empty()
    }
}

/// Splits a series into trend, weekly seasonal and residual components.
#[derive(Debug, Clone, Default)]
pub struct SeasonalDecomposer {
    config: DecomposeConfig,
}

impl SeasonalDecomposer {
    pub fn new(config: DecomposeConfig) -> Self {
        Self { config }
    }

    /// Decompose a cleaned series.
    ///
    /// Series shorter than `min_samples` return the identity: the trend is
    /// the series itself, seasonal and residual are zero, strength is 0.
    pub fn decompose(&self, samples: &[Sample]) -> Decomposition {
        let values = values_of(samples);
        let n = values.len();

        if n < self.config.min_samples {
            return Decomposition::identity(values);
        }

        let window = self.config.max_trend_window.min(n / 2).max(1);
        let trend = centered_moving_average(&values, window);

        let detrended: Vec<f64> = values
            .iter()
            .zip(trend.iter())
            .map(|(v, t)| v - t)
            .collect();

        // Average detrended value per UTC day-of-week.
        let mut sums = [0.0; WEEK_DAYS];
        let mut counts = [0usize; WEEK_DAYS];
        for (sample, d) in samples.iter().zip(detrended.iter()) {
            let day = sample.weekday_index();
            sums[day] += d;
            counts[day] += 1;
        }
        let mut weekly_profile = [0.0; WEEK_DAYS];
        for day in 0..WEEK_DAYS {
            if counts[day] > 0 {
                weekly_profile[day] = sums[day] / counts[day] as f64;
            }
        }

        let seasonal: Vec<f64> = samples
            .iter()
            .map(|s| weekly_profile[s.weekday_index()])
            .collect();

        let residual: Vec<f64> = values
            .iter()
            .zip(trend.iter())
            .zip(seasonal.iter())
            .map(|((v, t), s)| v - t - s)
            .collect();

        let seasonal_var = mean_of_squares(&seasonal);
        let residual_var = mean_of_squares(&residual);
        let denom = seasonal_var + residual_var;
        let denom = if denom == 0.0 { 1.0 } else { denom };
        let strength = (seasonal_var / denom).clamp(0.0, 1.0);

        Decomposition {
            trend,
            seasonal,
            residual,
            strength,
            weekly_profile,
        }
    }
}

/// Centered moving average with the window clamped at the series edges.
///
/// Near the edges the window shrinks rather than zero-padding, so the
/// trend stays on the scale of the data throughout.
fn centered_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let half = window / 2;
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half).min(n - 1);
            let slice = &values[start..=end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::DAY_MS;
    use approx::assert_relative_eq;

    // 2024-01-01T00:00:00Z, a Monday.
    const MONDAY: i64 = 1_704_067_200_000;

    fn daily_samples(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(MONDAY + i as i64 * DAY_MS, v))
            .collect()
    }

    #[test]
    fn short_series_degrade_to_identity() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        let d = SeasonalDecomposer::default().decompose(&daily_samples(&values));

        assert_eq!(d.trend, values.to_vec());
        assert_eq!(d.seasonal, vec![0.0; 5]);
        assert_eq!(d.residual, vec![0.0; 5]);
        assert_eq!(d.strength, 0.0);
    }

    #[test]
    fn components_reconstruct_the_input() {
        let values: Vec<f64> = (0..28)
            .map(|i| 50.0 + i as f64 * 0.5 + if i % 7 == 5 { 12.0 } else { 0.0 })
            .collect();
        let samples = daily_samples(&values);

        let d = SeasonalDecomposer::default().decompose(&samples);

        for i in 0..values.len() {
            assert_relative_eq!(
                d.trend[i] + d.seasonal[i] + d.residual[i],
                values[i],
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn constant_series_has_zero_strength() {
        let d = SeasonalDecomposer::default().decompose(&daily_samples(&vec![100.0; 28]));
        assert_eq!(d.strength, 0.0);
        assert!(d.seasonal.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn strong_weekly_cycle_yields_high_strength() {
        // Same value every weekday, large bump every Saturday.
        let values: Vec<f64> = (0..42)
            .map(|i| if i % 7 == 5 { 80.0 } else { 20.0 })
            .collect();
        let samples = daily_samples(&values);

        let d = SeasonalDecomposer::default().decompose(&samples);

        assert!(d.strength > 0.5, "strength was {}", d.strength);
        assert!(d.strength <= 1.0);
    }

    #[test]
    fn weekly_profile_peaks_on_the_bump_day() {
        let values: Vec<f64> = (0..42)
            .map(|i| if i % 7 == 5 { 80.0 } else { 20.0 })
            .collect();
        let samples = daily_samples(&values);

        let d = SeasonalDecomposer::default().decompose(&samples);

        // Index 5 is Saturday for a Monday-started daily series.
        let max_day = (0..7)
            .max_by(|&a, &b| {
                d.weekly_profile[a]
                    .partial_cmp(&d.weekly_profile[b])
                    .unwrap()
            })
            .unwrap();
        assert_eq!(max_day, 5);
    }

    #[test]
    fn trend_follows_a_linear_ramp() {
        let values: Vec<f64> = (0..28).map(|i| 10.0 + i as f64).collect();
        let samples = daily_samples(&values);

        let d = SeasonalDecomposer::default().decompose(&samples);

        // Away from the edges a centered average of a ramp is the ramp.
        for i in 7..21 {
            assert_relative_eq!(d.trend[i], values[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn strength_stays_in_unit_interval() {
        let values: Vec<f64> = (0..30).map(|i| ((i * 37) % 11) as f64).collect();
        let d = SeasonalDecomposer::default().decompose(&daily_samples(&values));
        assert!((0.0..=1.0).contains(&d.strength));
    }
}
