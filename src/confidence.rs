//! Confidence scoring for forecast results.
//!
//! Combines baseline model error, dataset size, seasonality strength and
//! drift into one 0-100 figure. The score starts from full confidence and
//! pays penalties; strong seasonality is the only bonus, since a seasonal
//! metric is inherently more predictable.

/// Penalty and bonus weights for the confidence score.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceConfig {
    /// Confidence points lost per MAPE percent.
    pub mape_weight: f64,
    /// Sample count below which the small-sample penalty applies.
    pub small_sample_floor: usize,
    /// Confidence points lost per sample missing from the floor.
    pub small_sample_weight: f64,
    /// Bonus at full seasonality strength.
    pub seasonality_bonus: f64,
    /// Flat penalty when drift was detected.
    pub drift_penalty: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            mape_weight: 0.5,
            small_sample_floor: 30,
            small_sample_weight: 0.5,
            seasonality_bonus: 10.0,
            drift_penalty: 20.0,
        }
    }
}

/// Combines model error, dataset size, seasonality and drift into a single
/// confidence value.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceScorer {
    config: ConfidenceConfig,
}

impl ConfidenceScorer {
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    /// Score a forecast, clamped into `[0, 100]`.
    ///
    /// `seasonality_strength` is the decomposition's `[0, 1]` strength.
    pub fn score(
        &self,
        mape: f64,
        seasonality_strength: f64,
        drift_detected: bool,
        sample_count: usize,
    ) -> f64 {
        let cfg = &self.config;
        let mut confidence = 100.0 - cfg.mape_weight * mape;

        if sample_count < cfg.small_sample_floor {
            confidence -=
                cfg.small_sample_weight * (cfg.small_sample_floor - sample_count) as f64;
        }

        confidence += cfg.seasonality_bonus * seasonality_strength;

        if drift_detected {
            confidence -= cfg.drift_penalty;
        }

        confidence.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_inputs_score_full_confidence() {
        let scorer = ConfidenceScorer::default();
        assert_relative_eq!(scorer.score(0.0, 0.0, false, 30), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn mape_erodes_confidence() {
        let scorer = ConfidenceScorer::default();
        assert_relative_eq!(scorer.score(20.0, 0.0, false, 30), 90.0, epsilon = 1e-12);
        assert_relative_eq!(scorer.score(60.0, 0.0, false, 30), 70.0, epsilon = 1e-12);
    }

    #[test]
    fn small_samples_pay_a_penalty() {
        let scorer = ConfidenceScorer::default();
        // 20 samples: 10 below the floor at 0.5 each.
        assert_relative_eq!(scorer.score(0.0, 0.0, false, 20), 95.0, epsilon = 1e-12);
        // At or above the floor no penalty applies.
        assert_relative_eq!(scorer.score(0.0, 0.0, false, 300), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn seasonality_earns_a_bonus() {
        let scorer = ConfidenceScorer::default();
        let with = scorer.score(20.0, 1.0, false, 30);
        let without = scorer.score(20.0, 0.0, false, 30);
        assert_relative_eq!(with - without, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn bonus_cannot_push_past_the_ceiling() {
        let scorer = ConfidenceScorer::default();
        assert_relative_eq!(scorer.score(0.0, 1.0, false, 30), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn drift_costs_a_flat_penalty() {
        let scorer = ConfidenceScorer::default();
        let drifted = scorer.score(10.0, 0.0, true, 30);
        let steady = scorer.score(10.0, 0.0, false, 30);
        assert_relative_eq!(steady - drifted, 20.0, epsilon = 1e-12);
    }

    #[test]
    fn score_clamps_at_zero() {
        let scorer = ConfidenceScorer::default();
        // Hopeless metric: enormous error, tiny sample, drifting.
        assert_eq!(scorer.score(500.0, 0.0, true, 2), 0.0);
    }

    #[test]
    fn config_overrides_take_effect() {
        let scorer = ConfidenceScorer::new(ConfidenceConfig {
            drift_penalty: 50.0,
            ..ConfidenceConfig::default()
        });
        assert_relative_eq!(scorer.score(0.0, 0.0, true, 30), 50.0, epsilon = 1e-12);
    }
}
