//! Running moments (mean, variance, skewness, kurtosis)
//!
//! Computes the first four central moments of a stream in a single pass with
//! O(1) memory, after Knuth (TAOCP vol 2, 3rd edition, page 232) and
//! John D. Cook's extension to the third and fourth moments. Supports merging
//! for distributed computation.

use core::fmt;
use core::iter::{FromIterator, Sum};

use crate::math;
use crate::traits::{MomentSketch, Sketch};

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Running moment accumulator
///
/// Keeps the observation count, the running mean and the sums of squared,
/// cubed and fourth-power deviations from that mean. Updates are numerically
/// stable: they never form a raw sum of squares, so large offsets do not
/// cancel out the spread.
///
/// # Example
///
/// ```
/// use flowmoments::statistics::Moments;
///
/// let mut stats = Moments::new();
/// for value in [0.0, 2.0, 4.0] {
///     stats.push(value);
/// }
///
/// assert_eq!(stats.mean(), 2.0);
/// assert_eq!(stats.stddev(), 2.0);
/// assert_eq!(
///     stats.describe(),
///     "N=3 μ=2.000000 σ=2.000000 skew=0.000000 ek=-1.500000"
/// );
/// ```
///
/// # Distributed Usage
///
/// ```
/// use flowmoments::statistics::Moments;
///
/// let a: Moments = [2.0, 10.0, 103.0].into_iter().collect();
/// let b: Moments = [6.0, 50.0, 100.0].into_iter().collect();
///
/// let merged = Moments::combined(&a, &b);
/// assert_eq!(merged.len(), 6);
/// assert!((merged.mean() - 45.166666666667).abs() < 1e-10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Moments {
    /// Number of values seen
    count: u64,
    /// Running mean
    m1: f64,
    /// Sum of squared deviations from the mean
    m2: f64,
    /// Sum of cubed deviations from the mean
    m3: f64,
    /// Sum of fourth-power deviations from the mean
    m4: f64,
}

impl Default for Moments {
    fn default() -> Self {
        Self::new()
    }
}

impl Moments {
    /// Create a new empty accumulator
    pub const fn new() -> Self {
        Self {
            count: 0,
            m1: 0.0,
            m2: 0.0,
            m3: 0.0,
            m4: 0.0,
        }
    }

    /// Add a value to the statistics
    ///
    /// NaN and infinite values are not filtered; they propagate into every
    /// moment.
    pub fn push(&mut self, x: f64) {
        let n1 = self.count as f64;
        self.count += 1;
        let n = self.count as f64;

        let delta = x - self.m1;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1;

        // m4 reads the old m2 and m3, m3 reads the old m2.
        self.m1 += delta_n;
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
    }

    /// Merge two accumulators into a new one
    ///
    /// The result matches an accumulator that saw the observations of `a`
    /// followed by those of `b`. Neither input is modified.
    pub fn combined(a: &Self, b: &Self) -> Self {
        if b.count == 0 {
            #[cfg(feature = "tracing")]
            tracing::trace!(count = a.count, "combine with empty right side");
            return *a;
        }
        if a.count == 0 {
            #[cfg(feature = "tracing")]
            tracing::trace!(count = b.count, "combine with empty left side");
            return *b;
        }

        let count = a.count + b.count;
        let an = a.count as f64;
        let bn = b.count as f64;
        let cn = count as f64;

        let delta = b.m1 - a.m1;
        let delta2 = delta * delta;
        let delta3 = delta * delta2;
        let delta4 = delta2 * delta2;

        let m1 = (an * a.m1 + bn * b.m1) / cn;
        let m2 = a.m2 + b.m2 + delta2 * an * bn / cn;

        let m3 = a.m3
            + b.m3
            + delta3 * an * bn * (an - bn) / (cn * cn)
            + 3.0 * delta * (an * b.m2 - bn * a.m2) / cn;

        let m4 = a.m4
            + b.m4
            + delta4 * an * bn * (an * an - an * bn + bn * bn) / (cn * cn * cn)
            + 6.0 * delta2 * (an * an * b.m2 + bn * bn * a.m2) / (cn * cn)
            + 4.0 * delta * (an * b.m3 - bn * a.m3) / cn;

        Self {
            count,
            m1,
            m2,
            m3,
            m4,
        }
    }

    /// Merge `other` into this accumulator
    pub fn combine(&mut self, other: &Self) {
        *self = Self::combined(self, other);
    }

    /// Get the number of values
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Get the mean (0 when empty)
    pub fn mean(&self) -> f64 {
        self.m1
    }

    /// Get the sample variance
    ///
    /// Uses Bessel's correction. Returns 0 with fewer than two values.
    pub fn variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / (self.count as f64 - 1.0)
        } else {
            0.0
        }
    }

    /// Get the population variance
    pub fn population_variance(&self) -> f64 {
        if self.count > 0 {
            self.m2 / self.count as f64
        } else {
            0.0
        }
    }

    /// Get the sample standard deviation
    pub fn stddev(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Skewness, the asymmetry of the distribution around its mean
    ///
    /// Positive values mean the right tail is longer, negative values the
    /// left one. Computed as `sqrt(n) * m3 / m2^1.5`, the biased
    /// (population) estimator without small-sample correction.
    ///
    /// With fewer than two distinct values `m2` is zero and the result is
    /// NaN.
    pub fn skewness(&self) -> f64 {
        math::sqrt(self.count as f64) * self.m3 / math::powf(self.m2, 1.5)
    }

    /// Kurtosis minus 3 (the "excess kurtosis")
    ///
    /// Positive values mean heavier tails than the normal distribution,
    /// negative values thinner ones. NaN when `m2` is zero.
    pub fn excess_kurtosis(&self) -> f64 {
        self.count as f64 * self.m4 / (self.m2 * self.m2) - 3.0
    }

    /// Get the sum of all values
    pub fn sum(&self) -> f64 {
        self.m1 * self.count as f64
    }

    /// Sums of squared, cubed and fourth-power deviations from the mean
    pub fn central_moments(&self) -> (f64, f64, f64) {
        (self.m2, self.m3, self.m4)
    }

    /// Human-readable one-line summary for logs
    pub fn describe(&self) -> String {
        use core::fmt::Write;

        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write!(out, "{}", self);
        out
    }
}

impl fmt::Display for Moments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N={} μ={:.6} σ={:.6} skew={:.6} ek={:.6}",
            self.count,
            self.mean(),
            self.stddev(),
            self.skewness(),
            self.excess_kurtosis()
        )
    }
}

impl Extend<f64> for Moments {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

impl<'a> Extend<&'a f64> for Moments {
    fn extend<I: IntoIterator<Item = &'a f64>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl FromIterator<f64> for Moments {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

impl<'a> FromIterator<&'a f64> for Moments {
    fn from_iter<I: IntoIterator<Item = &'a f64>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl Sum for Moments {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), |acc, m| Self::combined(&acc, &m))
    }
}

impl<'a> Sum<&'a Moments> for Moments {
    fn sum<I: Iterator<Item = &'a Moments>>(iter: I) -> Self {
        iter.fold(Self::new(), |acc, m| Self::combined(&acc, m))
    }
}

impl Sketch for Moments {
    type Item = f64;

    fn update(&mut self, item: &Self::Item) {
        self.push(*item);
    }

    fn merge(&mut self, other: &Self) {
        self.combine(other);
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl MomentSketch for Moments {
    fn mean(&self) -> f64 {
        Moments::mean(self)
    }

    fn variance(&self) -> f64 {
        Moments::variance(self)
    }

    fn skewness(&self) -> f64 {
        Moments::skewness(self)
    }

    fn excess_kurtosis(&self) -> f64 {
        Moments::excess_kurtosis(self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Moments {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Moments", 5)?;
        state.serialize_field("count", &self.count)?;
        state.serialize_field("m1", &self.m1)?;
        state.serialize_field("m2", &self.m2)?;
        state.serialize_field("m3", &self.m3)?;
        state.serialize_field("m4", &self.m4)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Moments {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct MomentsData {
            count: u64,
            m1: f64,
            m2: f64,
            m3: f64,
            m4: f64,
        }

        let data = MomentsData::deserialize(deserializer)?;
        Ok(Moments {
            count: data.count,
            m1: data.m1,
            m2: data.m2,
            m3: data.m3,
            m4: data.m4,
        })
    }
}
