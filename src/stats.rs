//! Statistics primitives: summary and trailing-window mean/stddev
//!
//! All standard deviations are population standard deviations (divisor =
//! count, not count - 1) and are floored at [`EPSILON`] so a zero-variance
//! window never divides a z-score by zero.

use ndarray::{s, Array1};
use rayon::prelude::*;

/// Floor applied to every standard deviation estimate
pub const EPSILON: f64 = 1e-6;

/// Series length above which the rolling pass is split across threads
const PARALLEL_CUTOFF: usize = 8192;

/// Minimum number of trailing observations required for local statistics
///
/// Derived from the window size rather than independently tunable:
/// `max(5, window / 3)`.
pub fn min_periods(window: usize) -> usize {
    (window / 3).max(5)
}

/// Mean and population standard deviation of a complete value sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl SummaryStats {
    /// Compute summary statistics; `None` for an empty sequence
    pub fn from_values(values: &Array1<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.sum() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            mean,
            std_dev: variance.sqrt().max(EPSILON),
        })
    }
}

/// Per-index trailing-window statistics with an explicit defined-mask
///
/// `mean[i]` and `std_dev[i]` are only meaningful where `defined[i]` is true;
/// undefined slots hold zero rather than a NaN sentinel.
#[derive(Debug, Clone)]
pub struct RollingStats {
    pub mean: Array1<f64>,
    pub std_dev: Array1<f64>,
    pub defined: Vec<bool>,
}

/// Trailing-window mean/stddev over `values`
///
/// The window at index `i` is `values[max(0, i + 1 - window) ..= i]`. An
/// index whose window holds fewer than `min_periods` values is left
/// undefined.
pub fn rolling_mean_std(values: &Array1<f64>, window: usize, min_periods: usize) -> RollingStats {
    let n = values.len();

    let stat_at = |i: usize| -> (f64, f64, bool) {
        let start = if i + 1 >= window { i + 1 - window } else { 0 };
        let len = i + 1 - start;
        if len < min_periods {
            return (0.0, 0.0, false);
        }
        let win = values.slice(s![start..=i]);
        let mean = win.sum() / len as f64;
        let variance = win.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len as f64;
        (mean, variance.sqrt().max(EPSILON), true)
    };

    // Windows only read trailing input, so index ranges are independent and
    // the parallel split is bit-identical to the sequential pass.
    let stats: Vec<(f64, f64, bool)> = if n >= PARALLEL_CUTOFF {
        (0..n).into_par_iter().map(stat_at).collect()
    } else {
        (0..n).map(stat_at).collect()
    };

    let mut mean = Array1::zeros(n);
    let mut std_dev = Array1::zeros(n);
    let mut defined = vec![false; n];
    for (i, (m, s, d)) in stats.into_iter().enumerate() {
        mean[i] = m;
        std_dev[i] = s;
        defined[i] = d;
    }

    RollingStats {
        mean,
        std_dev,
        defined,
    }
}
