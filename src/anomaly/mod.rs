//! Anomaly detection module
//!
//! Provides rolling z-score anomaly detection for univariate time series,
//! plus the result and payload types its callers consume.

mod rolling_zscore;

pub use rolling_zscore::{RollingZScore, RollingZScoreConfig};

use crate::series::Series;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Detection result: length-N parallel sequences, index-aligned with the input
///
/// For every input index `i`: `lower_band[i] <= mean[i] <= upper_band[i]`,
/// `score[i] >= 0` and never NaN, and `is_anomaly[i]` holds exactly when
/// `score[i] > threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Anomaly flag per index
    pub is_anomaly: Vec<bool>,
    /// Absolute z-score per index
    pub score: Array1<f64>,
    /// Local trend estimate per index (rolling mean or global fallback)
    pub mean: Array1<f64>,
    /// `mean + threshold * stddev` per index
    pub upper_band: Array1<f64>,
    /// `mean - threshold * stddev` per index
    pub lower_band: Array1<f64>,
    /// Threshold used for classification
    pub threshold: f64,
    /// Number of anomalies detected
    pub n_anomalies: usize,
}

impl DetectionResult {
    /// Number of points in the result (equals the input series length)
    pub fn len(&self) -> usize {
        self.is_anomaly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_anomaly.is_empty()
    }

    /// Positions where `is_anomaly` is true, in input order
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.is_anomaly
            .iter()
            .enumerate()
            .filter(|(_, &flag)| flag)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Serializable response payload: the detection result joined with the input
/// series it was computed from, as parallel arrays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionPayload {
    pub timestamps: Vec<String>,
    pub values: Vec<f64>,
    pub is_anomaly: Vec<bool>,
    pub score: Vec<f64>,
    pub mean: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    pub anomaly_indices: Vec<usize>,
}

impl DetectionPayload {
    /// Join a series with its detection result
    ///
    /// The caller is responsible for passing the same series the result was
    /// computed from; the payload is a plain positional join.
    pub fn from_result(series: &Series, result: &DetectionResult) -> Self {
        Self {
            timestamps: series.timestamps(),
            values: series.values().to_vec(),
            is_anomaly: result.is_anomaly.clone(),
            score: result.score.to_vec(),
            mean: result.mean.to_vec(),
            upper: result.upper_band.to_vec(),
            lower: result.lower_band.to_vec(),
            anomaly_indices: result.anomaly_indices(),
        }
    }
}
