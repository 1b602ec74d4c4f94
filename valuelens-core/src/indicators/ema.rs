//! Exponential Moving Average (EMA), no-adjustment form.
//!
//! alpha = 2 / (span + 1)
//! EMA[0] = x[0]
//! EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1]
//!
//! There is no warm-up window: the first output equals the first input and
//! every index has a value. Inputs must be free of missing values.

use std::num::NonZeroUsize;

use crate::error::SmoothingError;
use crate::indicators::Smoother;

#[derive(Debug, Clone, PartialEq)]
pub struct Ema {
    span: usize,
    alpha: f64,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Result<Self, SmoothingError> {
        NonZeroUsize::new(span)
            .map(Self::with_span)
            .ok_or(SmoothingError::InvalidSpan(span))
    }

    pub fn with_span(span: NonZeroUsize) -> Self {
        let span = span.get();
        Self {
            span,
            alpha: 2.0 / (span as f64 + 1.0),
            name: format!("ema_{span}"),
        }
    }

    pub fn span(&self) -> usize {
        self.span
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Smoother for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn smooth(&self, values: &[f64]) -> Vec<f64> {
        let mut result = Vec::with_capacity(values.len());
        let mut iter = values.iter();

        let Some(&first) = iter.next() else {
            return result;
        };
        result.push(first);

        let mut prev = first;
        for &v in iter {
            // Flat runs stay exactly flat.
            let next = if v == prev {
                prev
            } else {
                self.alpha * v + (1.0 - self.alpha) * prev
            };
            result.push(next);
            prev = next;
        }

        result
    }
}

/// EMA of `series` with the given span.
pub fn ema(series: &[f64], span: usize) -> Result<Vec<f64>, SmoothingError> {
    Ok(Ema::new(span)?.smooth(series))
}
