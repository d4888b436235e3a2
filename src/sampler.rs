//! Generation of individual observations: a uniform draw is turned into an
//! exponentially distributed point, at which the integrand is evaluated.
//!
//! Averaging g(y) over y ~ Exp(1) estimates the integral of g(x)·e^(-x) over
//! [0, +∞), which is 1/2 for the reference integrand cos(x).

use crate::{numeric::Float, random::RandomGenerator};
use prefix_num_ops::real::*;

/// Function whose expectation under the exponential distribution we estimate
pub type Integrand = fn(Float) -> Float;

/// Reference integrand
pub fn cosine(x: Float) -> Float {
    cos(x)
}

/// Inverse CDF of the unit exponential distribution, applied to a uniform
/// variate in (0, 1)
pub fn exponential_transform(u: Float) -> Float {
    -ln(u)
}

/// Produces one observation per call, advancing the caller's generator
#[derive(Clone, Copy)]
pub struct Sampler {
    integrand: Integrand,
}
//
impl Sampler {
    /// Build a sampler for a given integrand
    pub fn new(integrand: Integrand) -> Self {
        Self { integrand }
    }

    /// Draw one observation
    ///
    /// Consumes exactly one uniform variate from `rng`, so successive draws
    /// from the same generator must happen in sequence.
    ///
    pub fn draw(&self, rng: &mut RandomGenerator) -> Float {
        let u = rng.random();
        let y = exponential_transform(u);
        (self.integrand)(y)
    }
}
//
impl Default for Sampler {
    fn default() -> Self {
        Self::new(cosine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn transform_inverts_exponential_cdf() {
        // CDF(y) = 1 - e^(-y), and -ln(u) has the same law as -ln(1 - u)
        for &u in &[0.9, 0.5, 0.1, 1e-6] {
            let y = exponential_transform(u);
            assert!(y > 0.);
            assert_relative_eq!((-y).exp(), u, max_relative = 1e-12);
        }
        assert_eq!(exponential_transform(1.), 0.);
    }

    #[test]
    fn draw_applies_integrand_to_transformed_variate() {
        let mut rng = RandomGenerator::new(3);
        let mut mirror = rng.clone();
        let sampler = Sampler::new(|y| y);
        for _ in 0..10 {
            let expected = exponential_transform(mirror.random());
            assert_eq!(sampler.draw(&mut rng), expected);
        }
    }

    #[test]
    fn default_sampler_is_bounded_by_cosine() {
        let mut rng = RandomGenerator::new(11);
        let sampler = Sampler::default();
        for _ in 0..10_000 {
            let x = sampler.draw(&mut rng);
            assert!((-1. ..=1.).contains(&x));
        }
    }
}
