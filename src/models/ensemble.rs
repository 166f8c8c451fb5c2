//! Fixed-weight ensemble over the four point forecasters.
//!
//! The four sub-forecasts are treated as an empirical distribution: the
//! weighted sum is the prediction, and their spread drives the interval
//! width. Weights are fixed, not adaptively re-fit.

use crate::core::sample::{values_of, Sample};
use crate::core::{ForecastPeriod, PredictionInterval};
use crate::error::{ForecastError, Result};
use crate::features::FeatureSet;
use crate::models::{
    Ar1Forecaster, DecompositionForecaster, ForecastInput, HoltSmoother, PointForecaster,
    SmoothingConfig, TimeRegressionForecaster,
};
use crate::seasonality::Decomposition;
use crate::utils::stats::{population_std, quantile_normal};

/// MAPE reported when the series is too short to measure predictability.
const DEFAULT_MAPE: f64 = 20.0;

/// Fixed combination weights, one per sub-forecaster.
#[derive(Debug, Clone, Copy)]
pub struct EnsembleWeights {
    pub autoregressive: f64,
    pub decomposition: f64,
    pub smoothing: f64,
    pub regression: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            autoregressive: 0.35,
            decomposition: 0.30,
            smoothing: 0.20,
            regression: 0.15,
        }
    }
}

impl EnsembleWeights {
    fn sum(&self) -> f64 {
        self.autoregressive + self.decomposition + self.smoothing + self.regression
    }

    /// Weights must be finite, non-negative and sum to 1.
    pub fn validate(&self) -> Result<()> {
        let all = [
            self.autoregressive,
            self.decomposition,
            self.smoothing,
            self.regression,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ForecastError::InvalidParameter(
                "ensemble weights must be finite and non-negative".to_string(),
            ));
        }
        if (self.sum() - 1.0).abs() > 1e-6 {
            return Err(ForecastError::InvalidParameter(format!(
                "ensemble weights must sum to 1, got {}",
                self.sum()
            )));
        }
        Ok(())
    }
}

/// Configuration for the ensemble.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnsembleConfig {
    pub weights: EnsembleWeights,
    pub smoothing: SmoothingConfig,
    /// Coverage level of the prediction interval.
    pub interval_level: IntervalLevel,
}

/// Two-sided coverage level, e.g. 0.95.
#[derive(Debug, Clone, Copy)]
pub struct IntervalLevel(pub f64);

impl Default for IntervalLevel {
    fn default() -> Self {
        Self(0.95)
    }
}

/// One sub-forecaster's contribution, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelComponent {
    pub name: &'static str,
    pub value: f64,
}

/// Combined output of one ensemble run.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleForecast {
    /// Weighted point prediction, never negative.
    pub predicted: f64,
    /// Empirical interval from the sub-forecast spread, lower clamped at
    /// zero.
    pub interval: PredictionInterval,
    /// Raw sub-forecasts in combination order.
    pub components: Vec<ModelComponent>,
    /// Baseline MAPE of the cleaned series, in percent.
    pub model_accuracy: f64,
}

/// Four independent forecasters combined by fixed weights.
pub struct ForecastEnsemble {
    models: Vec<(Box<dyn PointForecaster>, f64)>,
    interval_z: f64,
}

impl ForecastEnsemble {
    pub fn new(config: EnsembleConfig) -> Self {
        let w = config.weights;
        let models: Vec<(Box<dyn PointForecaster>, f64)> = vec![
            (Box::new(Ar1Forecaster::default()), w.autoregressive),
            (Box::new(DecompositionForecaster::default()), w.decomposition),
            (Box::new(HoltSmoother::new(config.smoothing)), w.smoothing),
            (Box::new(TimeRegressionForecaster), w.regression),
        ];
        let level = config.interval_level.0.clamp(0.5, 0.999);
        Self {
            models,
            interval_z: quantile_normal(0.5 + level / 2.0),
        }
    }

    /// Combine the sub-forecasters into one prediction with an interval
    /// and a baseline accuracy figure.
    pub fn forecast(
        &self,
        samples: &[Sample],
        features: &FeatureSet,
        decomposition: &Decomposition,
        period: ForecastPeriod,
    ) -> EnsembleForecast {
        let input = ForecastInput {
            samples,
            features,
            decomposition,
            period_days: period.days(),
        };

        let components: Vec<ModelComponent> = self
            .models
            .iter()
            .map(|(model, _)| ModelComponent {
                name: model.name(),
                value: model.forecast(&input),
            })
            .collect();

        let predicted: f64 = components
            .iter()
            .zip(self.models.iter())
            .map(|(c, (_, weight))| c.value * weight)
            .sum();

        let raw: Vec<f64> = components.iter().map(|c| c.value).collect();
        let spread = population_std(&raw);
        let interval = PredictionInterval {
            lower: (predicted - self.interval_z * spread).max(0.0),
            upper: predicted + self.interval_z * spread,
        };

        EnsembleForecast {
            predicted,
            interval,
            components,
            model_accuracy: baseline_mape(&values_of(samples)),
        }
    }
}

impl Default for ForecastEnsemble {
    fn default() -> Self {
        Self::new(EnsembleConfig::default())
    }
}

/// Baseline predictability of a series as MAPE of the one-step-lookback
/// naive forecast over the trailing 20% (at least 7 points).
///
/// This measures how predictable the series is at all, not the ensemble's
/// own error; true backtesting of the ensemble would need a holdout the
/// retention caps rarely leave room for. Series shorter than 10 points
/// report a flat 20%.
pub fn baseline_mape(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 10 {
        return DEFAULT_MAPE;
    }

    let tail = (n / 5).max(7);
    let start = (n - tail).max(1);

    let mut sum = 0.0;
    let mut count = 0usize;
    for i in start..n {
        let denom = if values[i] == 0.0 { 1.0 } else { values[i].abs() };
        sum += ((values[i] - values[i - 1]) / denom).abs();
        count += 1;
    }

    if count == 0 {
        DEFAULT_MAPE
    } else {
        100.0 * sum / count as f64
    }
}
