//! Forecast orchestration over a caller-supplied metric history.
//!
//! The engine is the only place the pipeline stages meet: pull the raw
//! series, clean it, engineer features and decompose in parallel branches,
//! run the ensemble, check drift, then score confidence and classify the
//! trend. Everything below this layer is pure; the provider seam is where
//! callers plug in their storage.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::confidence::{ConfidenceConfig, ConfidenceScorer};
use crate::core::sample::Sample;
use crate::core::{ForecastPeriod, ForecastResult, TrendDirection};
use crate::detection::{DriftConfig, DriftDetector, OutlierCleaner, OutlierConfig};
use crate::error::{ForecastError, Result};
use crate::features::engineer;
use crate::models::{EnsembleConfig, ForecastEnsemble};
use crate::seasonality::{DecomposeConfig, SeasonalDecomposer};

/// Source of metric history, implemented by the caller's storage layer.
///
/// The engine never writes back; the provider owns retention. A provider
/// should surface storage failures as [`ForecastError::MetricHistory`] so
/// callers can fall back via [`ForecastEngine::forecast_or_fallback`].
pub trait MetricHistoryProvider {
    /// The full retained series for a named metric, ordered by timestamp
    /// ascending. An empty series is valid and not an error.
    fn history(&self, metric: &str) -> Result<Vec<Sample>>;
}

/// In-memory provider for tests and embedded callers.
#[derive(Debug, Clone, Default)]
pub struct StaticHistoryProvider {
    series: HashMap<String, Vec<Sample>>,
}

impl StaticHistoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metric's series, replacing any previous one.
    pub fn insert(&mut self, metric: impl Into<String>, samples: Vec<Sample>) {
        self.series.insert(metric.into(), samples);
    }
}

impl MetricHistoryProvider for StaticHistoryProvider {
    fn history(&self, metric: &str) -> Result<Vec<Sample>> {
        self.series
            .get(metric)
            .cloned()
            .ok_or_else(|| ForecastError::UnknownMetric(metric.to_string()))
    }
}

/// Aggregated configuration for the whole forecast pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastConfig {
    pub outlier: OutlierConfig,
    pub decompose: DecomposeConfig,
    pub ensemble: EnsembleConfig,
    pub drift: DriftConfig,
    pub confidence: ConfidenceConfig,
}

impl ForecastConfig {
    /// Reject configurations that would produce meaningless output.
    pub fn validate(&self) -> Result<()> {
        self.ensemble.weights.validate()?;
        if !(0.0..1.0).contains(&self.drift.split_ratio) || self.drift.split_ratio <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "drift split ratio must lie in (0, 1), got {}",
                self.drift.split_ratio
            )));
        }
        let alpha = self.ensemble.smoothing.alpha;
        let beta = self.ensemble.smoothing.beta;
        if !(0.0..=1.0).contains(&alpha) || !(0.0..=1.0).contains(&beta) {
            return Err(ForecastError::InvalidParameter(format!(
                "smoothing parameters must lie in [0, 1], got alpha={alpha}, beta={beta}"
            )));
        }
        Ok(())
    }
}

/// Runs the full forecast pipeline for named metrics.
pub struct ForecastEngine<P> {
    provider: P,
    cleaner: OutlierCleaner,
    decomposer: SeasonalDecomposer,
    ensemble: ForecastEnsemble,
    drift: DriftDetector,
    scorer: ConfidenceScorer,
}

impl<P: MetricHistoryProvider> ForecastEngine<P> {
    /// Engine with the standard configuration.
    pub fn new(provider: P) -> Self {
        // The default configuration is always valid.
        Self::build(provider, ForecastConfig::default())
    }

    /// Engine with explicit configuration, validated up front.
    pub fn with_config(provider: P, config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(provider, config))
    }

    fn build(provider: P, config: ForecastConfig) -> Self {
        Self {
            provider,
            cleaner: OutlierCleaner::new(config.outlier),
            decomposer: SeasonalDecomposer::new(config.decompose),
            ensemble: ForecastEnsemble::new(config.ensemble),
            drift: DriftDetector::new(config.drift),
            scorer: ConfidenceScorer::new(config.confidence),
        }
    }

    /// Forecast a metric over the given horizon.
    pub fn forecast(&self, metric: &str, period: ForecastPeriod) -> Result<ForecastResult> {
        self.forecast_at(metric, period, Utc::now())
    }

    /// Deterministic variant with an explicit result timestamp; apart from
    /// `generated_at` the output is a pure function of the stored series.
    pub fn forecast_at(
        &self,
        metric: &str,
        period: ForecastPeriod,
        now: DateTime<Utc>,
    ) -> Result<ForecastResult> {
        let raw = self.provider.history(metric)?;
        let cleaned = self.cleaner.clean(&raw);
        debug!(
            metric,
            raw = raw.len(),
            outliers = cleaned.outlier_count(),
            "cleaned metric history"
        );

        let values = cleaned.values();
        let features = engineer(&values);
        let decomposition = self.decomposer.decompose(&cleaned.cleaned);

        let ensemble =
            self.ensemble
                .forecast(&cleaned.cleaned, &features, &decomposition, period);

        let drift_detected = self.drift.detect(&values);
        let confidence = self.scorer.score(
            ensemble.model_accuracy,
            decomposition.strength,
            drift_detected,
            values.len(),
        );

        let current_value = values.last().copied().unwrap_or(0.0);
        let change_percent =
            (ensemble.predicted - current_value) / current_value.max(1.0) * 100.0;
        let trend = TrendDirection::classify(change_percent, confidence);
        debug!(
            metric,
            predicted = ensemble.predicted,
            confidence,
            drift = drift_detected,
            ?trend,
            "forecast complete"
        );

        Ok(ForecastResult {
            metric: metric.to_string(),
            current_value,
            predicted_value: ensemble.predicted,
            confidence,
            prediction_interval: ensemble.interval,
            trend,
            change_percent,
            period,
            model_accuracy: ensemble.model_accuracy,
            drift_detected,
            seasonality_strength: decomposition.strength * 100.0,
            generated_at: now,
        })
    }

    /// Forecast, degrading to the conservative default when the provider
    /// fails. Keeps a surrounding analysis pipeline non-fatal.
    pub fn forecast_or_fallback(&self, metric: &str, period: ForecastPeriod) -> ForecastResult {
        let now = Utc::now();
        match self.forecast_at(metric, period, now) {
            Ok(result) => result,
            Err(err) => {
                debug!(metric, %err, "falling back to conservative forecast");
                ForecastResult::fallback(metric, period, now)
            }
        }
    }
}
