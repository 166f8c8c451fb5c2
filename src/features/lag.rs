//! Lag and rolling-window features.
//!
//! The lag-7 column backfills its first seven slots with `values[0]`
//! instead of a true historical lag. That simplification is part of the
//! stored-model contract and is reproduced exactly; downstream consumers
//! were trained against it.

use crate::core::sample::{values_of, Sample};
use crate::utils::stats::{mean, population_std};

/// Width of the rolling window and long lag, one calendar week of daily
/// samples.
const WEEK: usize = 7;

/// Engineered feature columns, all the same length as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub values: Vec<f64>,
    pub lag1: Vec<f64>,
    pub lag7: Vec<f64>,
    pub rolling_mean7: Vec<f64>,
    pub rolling_std7: Vec<f64>,
}

impl FeatureSet {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set holds no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Last rolling-week mean, or 0 on an empty set.
    pub fn last_rolling_mean(&self) -> f64 {
        self.rolling_mean7.last().copied().unwrap_or(0.0)
    }
}

/// Build lag and rolling-window features from a cleaned value column.
pub fn engineer(values: &[f64]) -> FeatureSet {
    let n = values.len();
    let mut lag1 = Vec::with_capacity(n);
    let mut lag7 = Vec::with_capacity(n);
    let mut rolling_mean7 = Vec::with_capacity(n);
    let mut rolling_std7 = Vec::with_capacity(n);

    for i in 0..n {
        lag1.push(if i > 0 { values[i - 1] } else { values[0] });
        lag7.push(if i >= WEEK { values[i - WEEK] } else { values[0] });

        let start = i.saturating_sub(WEEK - 1);
        let window = &values[start..=i];
        rolling_mean7.push(mean(window));
        rolling_std7.push(population_std(window));
    }

    FeatureSet {
        values: values.to_vec(),
        lag1,
        lag7,
        rolling_mean7,
        rolling_std7,
    }
}

/// Build features directly from samples, using only the value column.
pub fn engineer_samples(samples: &[Sample]) -> FeatureSet {
    engineer(&values_of(samples))
}
