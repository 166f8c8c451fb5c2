//! End-to-end forecasting scenarios through the public engine API.

use chrono::Utc;
use incident_forecast::core::sample::DAY_MS;
use incident_forecast::core::{ForecastPeriod, Sample, TrendDirection};
use incident_forecast::engine::{ForecastEngine, MetricHistoryProvider, StaticHistoryProvider};
use incident_forecast::error::{ForecastError, Result};
use incident_forecast::features::engineer;
use incident_forecast::models::{ForecastInput, PointForecaster, TimeRegressionForecaster};
use incident_forecast::seasonality::SeasonalDecomposer;
use rand::{rngs::StdRng, Rng, SeedableRng};

// 2024-01-01T00:00:00Z.
const BASE_MS: i64 = 1_704_067_200_000;

fn daily_samples(values: &[f64]) -> Vec<Sample> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Sample::new(BASE_MS + i as i64 * DAY_MS, v))
        .collect()
}

fn engine_with(metric: &str, values: &[f64]) -> ForecastEngine<StaticHistoryProvider> {
    let mut provider = StaticHistoryProvider::new();
    provider.insert(metric, daily_samples(values));
    ForecastEngine::new(provider)
}

#[test]
fn constant_metric_stays_stable_over_every_horizon() {
    // 20 daily samples pinned at 100.
    let engine = engine_with("resolution-time", &vec![100.0; 20]);

    for period in ForecastPeriod::all() {
        let result = engine.forecast("resolution-time", period).unwrap();
        assert!(
            (result.predicted_value - 100.0).abs() < 1e-6,
            "predicted {} for {:?}",
            result.predicted_value,
            period
        );
        assert_eq!(result.trend, TrendDirection::Stable);
        assert!(!result.drift_detected);
    }
}

#[test]
fn linear_regression_extrapolates_past_the_last_value() {
    // 25 daily samples rising linearly from 50 to 150.
    let values: Vec<f64> = (0..25).map(|i| 50.0 + i as f64 * 100.0 / 24.0).collect();
    let samples = daily_samples(&values);
    let features = engineer(&values);
    let decomposition = SeasonalDecomposer::default().decompose(&samples);

    let slope = 100.0 / 24.0;
    for period in ForecastPeriod::all() {
        let forecast = TimeRegressionForecaster.forecast(&ForecastInput {
            samples: &samples,
            features: &features,
            decomposition: &decomposition,
            period_days: period.days(),
        });
        let expected = 150.0 + period.days() as f64 * slope;
        assert!(forecast > 150.0);
        assert!(
            (forecast - expected).abs() < 1e-6,
            "expected {expected}, got {forecast}"
        );
    }
}

#[test]
fn noisy_history_produces_bounded_sane_output() {
    let mut rng = StdRng::seed_from_u64(42);
    let values: Vec<f64> = (0..120)
        .map(|i| 80.0 + (i as f64 * 0.4).sin() * 10.0 + rng.gen_range(-5.0..5.0))
        .collect();
    let engine = engine_with("incidents-per-day", &values);

    let result = engine
        .forecast("incidents-per-day", ForecastPeriod::FourteenDays)
        .unwrap();

    assert!(result.predicted_value >= 0.0);
    assert!(result.prediction_interval.lower >= 0.0);
    assert!(result.prediction_interval.lower <= result.predicted_value);
    assert!(result.predicted_value <= result.prediction_interval.upper);
    assert!((0.0..=100.0).contains(&result.confidence));
    assert!((0.0..=100.0).contains(&result.seasonality_strength));
    assert!(result.model_accuracy.is_finite());
}

#[test]
fn level_shift_flags_drift_and_lowers_confidence() {
    // Flat at 40 for most of the history, then jumps to 90.
    let mut values = vec![40.0; 30];
    values.extend(std::iter::repeat(90.0).take(12));
    let shifted = engine_with("error-rate", &values);
    let steady = engine_with("error-rate", &vec![40.0; 42]);

    let with_drift = shifted
        .forecast("error-rate", ForecastPeriod::SevenDays)
        .unwrap();
    let without_drift = steady
        .forecast("error-rate", ForecastPeriod::SevenDays)
        .unwrap();

    assert!(with_drift.drift_detected);
    assert!(!without_drift.drift_detected);
    assert!(with_drift.confidence < without_drift.confidence);
}

struct FailingProvider;

impl MetricHistoryProvider for FailingProvider {
    fn history(&self, _metric: &str) -> Result<Vec<Sample>> {
        Err(ForecastError::MetricHistory("store unreachable".to_string()))
    }
}

#[test]
fn provider_failure_degrades_to_the_conservative_default() {
    let engine = ForecastEngine::new(FailingProvider);

    let result = engine.forecast_or_fallback("anything", ForecastPeriod::ThirtyDays);

    assert_eq!(result.confidence, 50.0);
    assert_eq!(result.trend, TrendDirection::Stable);
    assert_eq!(result.predicted_value, 0.0);
    assert_eq!(result.current_value, 0.0);
    assert!(!result.drift_detected);
    assert_eq!(result.period, ForecastPeriod::ThirtyDays);
}

#[test]
fn repeated_forecasts_are_bit_identical() {
    let values: Vec<f64> = (0..60).map(|i| 55.0 + ((i * 13) % 17) as f64).collect();
    let engine = engine_with("queue-depth", &values);
    let now = Utc::now();

    let first = engine
        .forecast_at("queue-depth", ForecastPeriod::SevenDays, now)
        .unwrap();
    let second = engine
        .forecast_at("queue-depth", ForecastPeriod::SevenDays, now)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn duplicate_timestamps_are_tolerated() {
    // The store never deduplicates; neither does the pipeline.
    let mut samples = daily_samples(&vec![25.0; 18]);
    samples.push(Sample::new(samples[17].timestamp_ms, 26.0));
    samples.push(Sample::new(samples[17].timestamp_ms, 24.0));

    let mut provider = StaticHistoryProvider::new();
    provider.insert("dupes", samples);
    let engine = ForecastEngine::new(provider);

    let result = engine.forecast("dupes", ForecastPeriod::SevenDays).unwrap();
    assert!(result.predicted_value > 0.0);
    assert_eq!(result.trend, TrendDirection::Stable);
}
