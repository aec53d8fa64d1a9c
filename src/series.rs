//! Input model: timestamped observations and ordered series
//!
//! Timestamps are opaque labels carried through verbatim; the detector never
//! parses or reorders them. Order in a [`Series`] is temporal order and is
//! preserved index-for-index in every output sequence.

use crate::error::{Result, ZbandError};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// One (timestamp, value) pair in an input series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Opaque timestamp label, preserved verbatim
    pub timestamp: String,
    /// Observed value; must be finite
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}

/// Ordered sequence of observations
///
/// Construction validates every value up front: a NaN or infinite value is a
/// [`ZbandError::MalformedInput`], raised at load time rather than silently
/// coerced. Duplicate timestamps are allowed; the series is strictly
/// positional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Create a series from observations, validating that every value is finite
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        for (i, obs) in observations.iter().enumerate() {
            if !obs.value.is_finite() {
                return Err(ZbandError::MalformedInput(format!(
                    "value at index {} ({}) is not a finite number",
                    i, obs.value
                )));
            }
        }
        Ok(Self { observations })
    }

    /// Create a series from (timestamp, value) pairs
    pub fn from_pairs<T: Into<String>>(pairs: Vec<(T, f64)>) -> Result<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(ts, v)| Observation::new(ts, v))
                .collect(),
        )
    }

    /// Parse a textual value for series construction
    ///
    /// Helper for callers loading from tabular text sources; rejects
    /// unparseable and non-finite values with [`ZbandError::MalformedInput`].
    pub fn parse_value(raw: &str) -> Result<f64> {
        let v: f64 = raw
            .trim()
            .parse()
            .map_err(|_| ZbandError::MalformedInput(format!("cannot parse {:?} as a number", raw)))?;
        if !v.is_finite() {
            return Err(ZbandError::MalformedInput(format!(
                "parsed value {} is not finite",
                v
            )));
        }
        Ok(v)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Extract the value sequence, index-aligned with the series
    pub fn values(&self) -> Array1<f64> {
        Array1::from_iter(self.observations.iter().map(|o| o.value))
    }

    /// Extract the timestamp labels, index-aligned with the series
    pub fn timestamps(&self) -> Vec<String> {
        self.observations
            .iter()
            .map(|o| o.timestamp.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_preserves_order() {
        let series = Series::from_pairs(vec![
            ("2021-01-03", 3.0),
            ("2021-01-01", 1.0),
            ("2021-01-02", 2.0),
        ])
        .unwrap();

        // Strictly positional: no reordering by timestamp
        let values = series.values();
        assert_eq!(values[0], 3.0);
        assert_eq!(values[1], 1.0);
        assert_eq!(values[2], 2.0);
        assert_eq!(series.timestamps()[0], "2021-01-03");
    }

    #[test]
    fn test_series_rejects_nan() {
        let result = Series::from_pairs(vec![("a", 1.0), ("b", f64::NAN), ("c", 3.0)]);
        assert!(matches!(result, Err(ZbandError::MalformedInput(_))));
    }

    #[test]
    fn test_series_rejects_infinity() {
        let result = Series::from_pairs(vec![("a", f64::INFINITY)]);
        assert!(matches!(result, Err(ZbandError::MalformedInput(_))));
    }

    #[test]
    fn test_series_allows_duplicate_timestamps() {
        let series = Series::from_pairs(vec![("t", 1.0), ("t", 2.0)]).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(Series::parse_value(" 4.5 ").unwrap(), 4.5);
        assert!(Series::parse_value("not-a-number").is_err());
        assert!(Series::parse_value("inf").is_err());
    }

    #[test]
    fn test_empty_series() {
        let series = Series::new(Vec::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.values().len(), 0);
    }
}
