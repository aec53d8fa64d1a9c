//! Rolling z-score anomaly detection

use crate::anomaly::DetectionResult;
use crate::error::{Result, ZbandError};
use crate::series::Series;
use crate::stats::{self, SummaryStats};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the rolling z-score detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollingZScoreConfig {
    /// Trailing window size; larger = smoother, slower-adapting local baseline
    pub window: usize,
    /// Z-score threshold; higher = fewer flagged anomalies
    pub threshold: f64,
}

impl Default for RollingZScoreConfig {
    fn default() -> Self {
        Self {
            window: 30,
            threshold: 3.0,
        }
    }
}

impl RollingZScoreConfig {
    /// Set the window size
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the z-score threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Minimum trailing observations before local statistics apply
    ///
    /// Derived from the window (`max(5, window / 3)`), not independently
    /// tunable.
    pub fn min_periods(&self) -> usize {
        stats::min_periods(self.window)
    }

    fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(ZbandError::InvalidParameter {
                name: "window".to_string(),
                value: self.window.to_string(),
                reason: "must be a positive integer".to_string(),
            });
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ZbandError::InvalidParameter {
                name: "threshold".to_string(),
                value: self.threshold.to_string(),
                reason: "must be a positive real number".to_string(),
            });
        }
        Ok(())
    }
}

/// Rolling z-score anomaly detector
///
/// Scores each point of a series against the mean and population standard
/// deviation of its trailing window. Indices without enough trailing history
/// (fewer than `min_periods` observations) fall back to statistics computed
/// over the whole series, so early points are still scored rather than
/// skipped.
///
/// Stateless and side-effect free: `detect` is a pure function of the series
/// and configuration, and identical inputs yield bit-identical results.
#[derive(Debug, Clone, Default)]
pub struct RollingZScore {
    config: RollingZScoreConfig,
}

impl RollingZScore {
    pub fn new(config: RollingZScoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RollingZScoreConfig {
        &self.config
    }

    /// Detect anomalies in a series
    ///
    /// Returns five index-aligned sequences: anomaly flags, absolute
    /// z-scores, the local mean, and the upper/lower visualization bands at
    /// `threshold` standard deviations around it. An empty series yields
    /// empty sequences.
    ///
    /// Known sharp edge: every standard deviation estimate is floored at a
    /// small epsilon so a zero-variance window never divides by zero. A
    /// perfectly flat series therefore scores 0 everywhere, but even a tiny
    /// deviation from the flat value can produce a very large (finite)
    /// z-score and get flagged. Intentional; tune `threshold` if flat series
    /// with noise at the epsilon scale are expected.
    pub fn detect(&self, series: &Series) -> Result<DetectionResult> {
        self.config.validate()?;
        let threshold = self.config.threshold;

        let n = series.len();
        let values = series.values();

        // Global fallback statistics, computed once per call. An empty
        // series has none and yields empty output sequences.
        let global = match SummaryStats::from_values(&values) {
            Some(stats) => stats,
            None => {
                return Ok(DetectionResult {
                    is_anomaly: Vec::new(),
                    score: Array1::zeros(0),
                    mean: Array1::zeros(0),
                    upper_band: Array1::zeros(0),
                    lower_band: Array1::zeros(0),
                    threshold,
                    n_anomalies: 0,
                });
            }
        };

        // Pass 1: trailing-window statistics with an explicit defined-mask.
        let rolled = stats::rolling_mean_std(&values, self.config.window, self.config.min_periods());

        // Pass 2: merge with the global fallback, per index.
        let mut is_anomaly = vec![false; n];
        let mut score = Array1::zeros(n);
        let mut mean = Array1::zeros(n);
        let mut upper_band = Array1::zeros(n);
        let mut lower_band = Array1::zeros(n);

        for i in 0..n {
            let (m, s) = if rolled.defined[i] {
                (rolled.mean[i], rolled.std_dev[i])
            } else {
                (global.mean, global.std_dev)
            };
            let z = (values[i] - m) / s;

            score[i] = z.abs();
            is_anomaly[i] = score[i] > threshold;
            mean[i] = m;
            upper_band[i] = m + threshold * s;
            lower_band[i] = m - threshold * s;
        }

        let n_anomalies = is_anomaly.iter().filter(|&&flag| flag).count();
        debug!(
            points = n,
            anomalies = n_anomalies,
            window = self.config.window,
            threshold,
            "rolling z-score detection complete"
        );

        Ok(DetectionResult {
            is_anomaly,
            score,
            mean,
            upper_band,
            lower_band,
            threshold,
            n_anomalies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_of(values: &[f64]) -> Series {
        Series::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (format!("t{}", i), v))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_zero_window() {
        let detector = RollingZScore::new(RollingZScoreConfig::default().with_window(0));
        let result = detector.detect(&series_of(&[1.0, 2.0, 3.0]));
        assert!(matches!(
            result,
            Err(ZbandError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_rejects_nonpositive_threshold() {
        for bad in [0.0, -1.5, f64::NAN] {
            let detector = RollingZScore::new(RollingZScoreConfig::default().with_threshold(bad));
            assert!(detector.detect(&series_of(&[1.0, 2.0])).is_err());
        }
    }

    #[test]
    fn test_empty_series_yields_empty_result() {
        let detector = RollingZScore::default();
        let result = detector.detect(&Series::new(Vec::new()).unwrap()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.score.len(), 0);
        assert_eq!(result.n_anomalies, 0);
    }

    #[test]
    fn test_short_series_uses_global_statistics() {
        // window=30 -> min_periods=10, so all 5 indices use the global stats
        let values = [5.0, 5.1, 5.2, 5.0, 10.0];
        let detector = RollingZScore::default();
        let result = detector.detect(&series_of(&values)).unwrap();

        let global_mean = values.iter().sum::<f64>() / 5.0;
        let variance =
            values.iter().map(|v| (v - global_mean).powi(2)).sum::<f64>() / 5.0;
        let global_std = variance.sqrt();

        for i in 0..5 {
            assert!((result.mean[i] - global_mean).abs() < 1e-12);
            let expected = ((values[i] - global_mean) / global_std).abs();
            assert!((result.score[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_local_statistics_once_history_accumulates() {
        // window=6 -> min_periods=5: index 4 onward gets local stats
        let values: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let detector = RollingZScore::new(RollingZScoreConfig::default().with_window(6));
        let result = detector.detect(&series_of(&values)).unwrap();

        // At index 10, window is [5..=10], mean 7.5
        assert!((result.mean[10] - 7.5).abs() < 1e-12);
        // At index 3 the window is too short; global mean of 0..11 is 5.5
        assert!((result.mean[3] - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_band_construction() {
        let values: Vec<f64> = (0..20).map(|i| (i % 4) as f64).collect();
        let config = RollingZScoreConfig::default()
            .with_window(8)
            .with_threshold(2.5);
        let result = RollingZScore::new(config).detect(&series_of(&values)).unwrap();

        for i in 0..20 {
            let half = result.upper_band[i] - result.mean[i];
            assert!(half > 0.0);
            // Bands are symmetric around the mean
            assert!((result.mean[i] - result.lower_band[i] - half).abs() < 1e-9);
        }
    }
}
