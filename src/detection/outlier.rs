//! Outlier removal ahead of model fitting.
//!
//! Two screens run independently over the value column — a z-score test
//! against the population mean and an IQR fence test — and the union of
//! their flags is removed. Sample order is preserved on both sides of the
//! partition.

use serde::{Deserialize, Serialize};

use crate::core::sample::{values_of, Sample};
use crate::utils::stats::{mean, percentile_nearest, population_std};

/// Configuration for outlier screening.
#[derive(Debug, Clone, Copy)]
pub struct OutlierConfig {
    /// Z-score above which a sample is flagged.
    pub z_threshold: f64,
    /// IQR fence multiplier.
    pub iqr_multiplier: f64,
    /// Below this many samples no screening happens at all.
    pub min_samples: usize,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            z_threshold: 3.0,
            iqr_multiplier: 1.5,
            min_samples: 10,
        }
    }
}

/// Partition of a raw series into kept samples and removed outliers.
///
/// Every input sample lands in exactly one side; original order is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedSeries {
    pub cleaned: Vec<Sample>,
    pub outliers: Vec<Sample>,
}

impl CleanedSeries {
    /// Number of kept samples.
    pub fn len(&self) -> usize {
        self.cleaned.len()
    }

    /// Whether no samples survived (or none arrived).
    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }

    /// Value column of the kept samples.
    pub fn values(&self) -> Vec<f64> {
        values_of(&self.cleaned)
    }

    /// Number of removed samples.
    pub fn outlier_count(&self) -> usize {
        self.outliers.len()
    }

    /// Share of the input that was removed, in percent.
    pub fn outlier_percentage(&self) -> f64 {
        let total = self.cleaned.len() + self.outliers.len();
        if total == 0 {
            0.0
        } else {
            100.0 * self.outliers.len() as f64 / total as f64
        }
    }
}

/// Removes statistically anomalous samples before model fitting.
#[derive(Debug, Clone, Default)]
pub struct OutlierCleaner {
    config: OutlierConfig,
}

impl OutlierCleaner {
    pub fn new(config: OutlierConfig) -> Self {
        Self { config }
    }

    /// Partition `samples` into kept values and outliers.
    ///
    /// Short series (< `min_samples`) are passed through untouched: too
    /// little data to judge anomalies safely. Never fails.
    pub fn clean(&self, samples: &[Sample]) -> CleanedSeries {
        if samples.len() < self.config.min_samples {
            return CleanedSeries {
                cleaned: samples.to_vec(),
                outliers: Vec::new(),
            };
        }

        let values = values_of(samples);
        let m = mean(&values);
        // Zero-variance guard: the denominator floors at 1.
        let std = population_std(&values).max(1.0);

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let q1 = percentile_nearest(&sorted, 0.25);
        let q3 = percentile_nearest(&sorted, 0.75);
        let iqr = q3 - q1;
        let lower_fence = q1 - self.config.iqr_multiplier * iqr;
        let upper_fence = q3 + self.config.iqr_multiplier * iqr;

        let mut cleaned = Vec::with_capacity(samples.len());
        let mut outliers = Vec::new();

        for sample in samples {
            let z = (sample.value - m).abs() / std;
            let z_flagged = z > self.config.z_threshold;
            let iqr_flagged = sample.value < lower_fence || sample.value > upper_fence;
            if z_flagged || iqr_flagged {
                outliers.push(*sample);
            } else {
                cleaned.push(*sample);
            }
        }

        CleanedSeries { cleaned, outliers }
    }
}
