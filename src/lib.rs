//! zband - Rolling z-score anomaly detection for univariate time series
//!
//! Given an ordered series of timestamped observations, zband flags points
//! that deviate from their local trend, scoring each point against the mean
//! and standard deviation of a trailing window and falling back to
//! whole-series statistics where the window lacks history. Alongside the
//! flags it produces the visualization bands (rolling mean, upper/lower
//! thresholds) a chart overlay needs.
//!
//! # Modules
//!
//! - [`anomaly`] - The rolling z-score detector and its result types
//! - [`series`] - Timestamped observation input model with load-time validation
//! - [`stats`] - Summary and trailing-window statistics primitives
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```
//! use zband::prelude::*;
//!
//! let series = Series::from_pairs(vec![
//!     ("2021-01-01", 5.0),
//!     ("2021-01-02", 5.1),
//!     ("2021-01-03", 5.2),
//!     ("2021-01-04", 5.0),
//!     ("2021-01-05", 10.0),
//!     ("2021-01-06", 5.1),
//! ])?;
//!
//! let detector = RollingZScore::new(RollingZScoreConfig::default().with_threshold(2.0));
//! let result = detector.detect(&series)?;
//!
//! assert_eq!(result.len(), series.len());
//! assert_eq!(result.anomaly_indices(), vec![4]);
//! # Ok::<(), zband::ZbandError>(())
//! ```

pub mod anomaly;
pub mod error;
pub mod series;
pub mod stats;

pub use error::{Result, ZbandError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::anomaly::{
        DetectionPayload, DetectionResult, RollingZScore, RollingZScoreConfig,
    };
    pub use crate::error::{Result, ZbandError};
    pub use crate::series::{Observation, Series};
    pub use crate::stats::SummaryStats;
}
