//! Distribution-shift detection between early and recent history.
//!
//! A drifted metric means historical patterns may no longer predict future
//! behavior; the confidence scorer penalizes forecasts accordingly.

use crate::utils::stats::{mean, population_std};

/// Configuration for drift detection.
#[derive(Debug, Clone, Copy)]
pub struct DriftConfig {
    /// Minimum series length before drift can be judged at all.
    pub min_samples: usize,
    /// Fraction of the series treated as the "early" window.
    pub split_ratio: f64,
    /// Mean gap threshold as a multiple of the early window's std-dev.
    pub threshold: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            min_samples: 20,
            split_ratio: 0.7,
            threshold: 0.3,
        }
    }
}

/// Flags a distributional shift between early and recent windows.
#[derive(Debug, Clone, Default)]
pub struct DriftDetector {
    config: DriftConfig,
}

impl DriftDetector {
    pub fn new(config: DriftConfig) -> Self {
        Self { config }
    }

    /// Whether the recent window's mean has moved away from the early
    /// window's mean by more than `threshold` early standard deviations.
    ///
    /// Series shorter than `min_samples` never report drift.
    pub fn detect(&self, values: &[f64]) -> bool {
        if values.len() < self.config.min_samples {
            return false;
        }

        let split = (values.len() as f64 * self.config.split_ratio) as usize;
        if split == 0 || split >= values.len() {
            return false;
        }

        let early = &values[..split];
        let recent = &values[split..];

        (mean(recent) - mean(early)).abs() > self.config.threshold * population_std(early)
    }
}
