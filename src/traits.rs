//! Core traits for streaming moment accumulators
//!
//! Accumulators implement the base [`Sketch`] trait, and the moment family
//! adds [`MomentSketch`] on top of it for the derived statistics.

use core::fmt::Debug;

use crate::math;

/// Error bounds for an estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBounds {
    /// Lower bound of the estimate
    pub lower: f64,
    /// Point estimate
    pub estimate: f64,
    /// Upper bound of the estimate
    pub upper: f64,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence: f64,
}

impl ErrorBounds {
    /// Create new error bounds
    pub fn new(lower: f64, estimate: f64, upper: f64, confidence: f64) -> Self {
        Self {
            lower,
            estimate,
            upper,
            confidence,
        }
    }

    /// Check if a value falls within bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Width of the confidence interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Relative width (width / estimate)
    pub fn relative_width(&self) -> f64 {
        if self.estimate == 0.0 {
            0.0
        } else {
            self.width() / self.estimate
        }
    }
}

/// Two-sided z-score for a confidence level (step approximation)
pub(crate) fn z_score(confidence: f64) -> f64 {
    match confidence {
        c if c >= 0.99 => 2.576,
        c if c >= 0.95 => 1.96,
        c if c >= 0.90 => 1.645,
        c if c >= 0.80 => 1.282,
        _ => 1.0,
    }
}

/// Core trait for all streaming accumulators
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item: ?Sized;

    /// Add an item to the sketch
    fn update(&mut self, item: &Self::Item);

    /// Merge another sketch into this one
    ///
    /// The result is equivalent to having fed both input streams into a
    /// single sketch. `other` is left untouched.
    fn merge(&mut self, other: &Self);

    /// Reset sketch to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items processed
    fn count(&self) -> u64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Sketches that summarize a numeric stream by its first four moments
pub trait MomentSketch: Sketch<Item = f64> {
    /// Arithmetic mean
    fn mean(&self) -> f64;

    /// Sample variance (Bessel-corrected)
    fn variance(&self) -> f64;

    /// Sample standard deviation
    fn stddev(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Skewness of the observations
    fn skewness(&self) -> f64;

    /// Kurtosis minus 3
    fn excess_kurtosis(&self) -> f64;

    /// Normal-approximation confidence interval for the mean
    ///
    /// The margin is `z * stddev / sqrt(count)`. With fewer than two
    /// observations there is no spread to estimate and the interval
    /// collapses onto the mean.
    fn mean_bounds(&self, confidence: f64) -> ErrorBounds {
        let mean = self.mean();
        let n = self.count();
        if n <= 1 {
            return ErrorBounds::new(mean, mean, mean, confidence);
        }

        let margin = z_score(confidence) * self.stddev() / math::sqrt(n as f64);
        ErrorBounds::new(mean - margin, mean, mean + margin, confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_bounds() {
        let bounds = ErrorBounds::new(90.0, 100.0, 110.0, 0.95);

        assert!(bounds.contains(100.0));
        assert!(bounds.contains(90.0));
        assert!(bounds.contains(110.0));
        assert!(!bounds.contains(89.0));
        assert!(!bounds.contains(111.0));

        assert_eq!(bounds.width(), 20.0);
        assert!((bounds.relative_width() - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_relative_width_zero_estimate() {
        let bounds = ErrorBounds::new(-1.0, 0.0, 1.0, 0.95);
        assert_eq!(bounds.relative_width(), 0.0);
    }

    #[test]
    fn test_z_score_steps() {
        assert_eq!(z_score(0.999), 2.576);
        assert_eq!(z_score(0.99), 2.576);
        assert_eq!(z_score(0.95), 1.96);
        assert_eq!(z_score(0.90), 1.645);
        assert_eq!(z_score(0.80), 1.282);
        assert_eq!(z_score(0.5), 1.0);
    }
}
