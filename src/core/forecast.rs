//! Forecast result structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Horizon over which a metric is forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForecastPeriod {
    #[serde(rename = "7days")]
    SevenDays,
    #[serde(rename = "14days")]
    FourteenDays,
    #[serde(rename = "30days")]
    ThirtyDays,
}

impl ForecastPeriod {
    /// Horizon length in days.
    pub fn days(self) -> u32 {
        match self {
            ForecastPeriod::SevenDays => 7,
            ForecastPeriod::FourteenDays => 14,
            ForecastPeriod::ThirtyDays => 30,
        }
    }

    /// All supported horizons, shortest first.
    pub fn all() -> [ForecastPeriod; 3] {
        [
            ForecastPeriod::SevenDays,
            ForecastPeriod::FourteenDays,
            ForecastPeriod::ThirtyDays,
        ]
    }
}

/// Direction a metric is forecast to move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Degrading,
    Critical,
}

impl TrendDirection {
    /// Classify a forecast from its relative change and confidence.
    ///
    /// Small moves in either direction are `Stable`. A rise is `Critical`
    /// only when it is both large (> 20%) and confidently predicted
    /// (> 70), otherwise `Degrading`. Any fall, however large, classifies
    /// as `Improving` regardless of confidence.
    pub fn classify(change_percent: f64, confidence: f64) -> Self {
        if change_percent.abs() < 5.0 {
            TrendDirection::Stable
        } else if change_percent > 0.0 {
            if change_percent > 20.0 && confidence > 70.0 {
                TrendDirection::Critical
            } else {
                TrendDirection::Degrading
            }
        } else {
            TrendDirection::Improving
        }
    }
}

/// Lower/upper bound pair around a point prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Complete output of one forecast invocation.
///
/// Constructed fresh on every call and never mutated afterwards;
/// persistence is a caller concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// Name of the forecast metric.
    pub metric: String,
    /// Last observed (cleaned) value.
    pub current_value: f64,
    /// Ensemble point prediction.
    pub predicted_value: f64,
    /// Overall confidence, 0..=100.
    pub confidence: f64,
    /// Empirical interval around the prediction.
    pub prediction_interval: PredictionInterval,
    /// Trend classification of the predicted move.
    pub trend: TrendDirection,
    /// Relative change from current to predicted, in percent.
    pub change_percent: f64,
    /// Forecast horizon.
    pub period: ForecastPeriod,
    /// Baseline predictability as MAPE, in percent.
    pub model_accuracy: f64,
    /// Whether a distributional shift was detected in the history.
    pub drift_detected: bool,
    /// Weekly seasonality strength, 0..=100.
    pub seasonality_strength: f64,
    /// When this result was produced.
    pub generated_at: DateTime<Utc>,
}

impl ForecastResult {
    /// Conservative default used by callers when the metric history cannot
    /// be read: all values zeroed, confidence 50, trend stable. Keeps a
    /// surrounding pipeline non-fatal without pretending to predict.
    pub fn fallback(
        metric: impl Into<String>,
        period: ForecastPeriod,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            metric: metric.into(),
            current_value: 0.0,
            predicted_value: 0.0,
            confidence: 50.0,
            prediction_interval: PredictionInterval {
                lower: 0.0,
                upper: 0.0,
            },
            trend: TrendDirection::Stable,
            change_percent: 0.0,
            period,
            model_accuracy: 0.0,
            drift_detected: false,
            seasonality_strength: 0.0,
            generated_at: now,
        }
    }
}
