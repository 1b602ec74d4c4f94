//! Series smoothing.
//!
//! Smoothers run over an already null-filtered, chronologically ordered
//! series and return one output per input.

pub mod ema;

pub use ema::{ema, Ema};

/// A smoothing filter over an ordered numeric series.
pub trait Smoother {
    /// Short name, e.g. `ema_20`.
    fn name(&self) -> &str;

    /// Produce a series of the same length as `values`.
    fn smooth(&self, values: &[f64]) -> Vec<f64>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for smoothing tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
