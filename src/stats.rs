//! Online accumulation of Monte Carlo observations
//!
//! Observations are folded into the statistics one at a time and then
//! forgotten, so memory use does not depend on the number of samples. With
//! x_n the n-th observation (1-indexed), the recurrences are
//!
//! ```text
//! variance[n] = ((n-2)/(n-1))·variance[n-1] + (1/n)·(x_n - mean[n-1])²   (n > 1)
//! mean[n]     = ((n-1)/n)·mean[n-1] + x_n/n
//! ```
//!
//! The variance update must read the mean *before* it absorbs x_n. These are
//! exactly equivalent to the two-pass mean and unbiased sample variance, but
//! not bit-identical to them nor to Welford's algorithm.

use crate::numeric::Float;
use prefix_num_ops::real::*;

/// Running mean and sample variance of a stream of observations
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunningStatistics {
    /// Number of observations so far
    count: usize,

    /// Mean of all observations so far
    mean: Float,

    /// Unbiased sample variance, only meaningful once count >= 2
    variance: Float,
}
//
impl RunningStatistics {
    /// Start from an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate one observation
    pub fn observe(&mut self, x: Float) {
        self.count += 1;
        let n = self.count as Float;
        if self.count > 1 {
            self.variance =
                ((n - 2.) / (n - 1.)) * self.variance + (1. / n) * (x - self.mean).powi(2);
        }
        self.mean = ((n - 1.) / n) * self.mean + x / n;
    }

    /// Number of integrated observations
    pub fn count(&self) -> usize {
        self.count
    }

    /// Current mean estimate
    pub fn mean(&self) -> Float {
        self.mean
    }

    /// Current sample variance estimate (0 until two observations were seen)
    pub fn variance(&self) -> Float {
        self.variance
    }

    /// Standard error of the mean estimate
    pub fn standard_error(&self) -> Float {
        if self.count == 0 {
            return 0.;
        }
        sqrt(self.variance / self.count as Float)
    }
}
//
impl Extend<Float> for RunningStatistics {
    fn extend<I: IntoIterator<Item = Float>>(&mut self, iter: I) {
        iter.into_iter().for_each(|x| self.observe(x));
    }
}

/// Running mean of a stream of observations, without variance tracking
///
/// Used by trials whose variance is never reported, to keep per-trial state
/// minimal.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunningMean {
    count: usize,
    mean: Float,
}
//
impl RunningMean {
    /// Start from an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate one observation, using the same recurrence as
    /// RunningStatistics so that both agree bit for bit on the mean
    pub fn observe(&mut self, x: Float) {
        self.count += 1;
        let n = self.count as Float;
        self.mean = ((n - 1.) / n) * self.mean + x / n;
    }

    /// Current mean estimate
    pub fn mean(&self) -> Float {
        self.mean
    }
}
