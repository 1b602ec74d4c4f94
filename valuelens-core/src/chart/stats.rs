//! Summary statistics over a chart series.

use serde::{Deserialize, Serialize};

/// `last` is the most recent retained value; `mean`, `max`, `min` cover the
/// whole filtered series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub last: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl SummaryStats {
    /// `None` for an empty series.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let last = *values.last()?;
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        Some(Self {
            last,
            // Summation error can push the mean a hair outside the range.
            mean: mean.clamp(min, max),
            max,
            min,
        })
    }
}
