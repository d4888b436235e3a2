//! Execution of individual Monte Carlo trials
//!
//! A trial draws a fixed number of observations from the sampler, in sequence
//! and from a single generator, and reduces them to one mean estimate.

use crate::{
    numeric::Float,
    random::RandomGenerator,
    sampler::Sampler,
    stats::{RunningMean, RunningStatistics},
};

/// Run one trial and return its mean
///
/// This is the lightweight flavor used when many trials are run and only their
/// means are kept: no variance is tracked.
///
pub fn run_trial(sampler: &Sampler, rng: &mut RandomGenerator, sample_count: usize) -> Float {
    // Should have been checked at configuration time, but bugs can happen...
    assert!(sample_count > 0, "A trial must draw at least one sample");

    let mut accumulator = RunningMean::new();
    for _ in 0..sample_count {
        accumulator.observe(sampler.draw(rng));
    }
    accumulator.mean()
}

/// Run one trial, tracking both the mean and the variance of its observations
pub fn run_trial_with_variance(
    sampler: &Sampler,
    rng: &mut RandomGenerator,
    sample_count: usize,
) -> RunningStatistics {
    assert!(sample_count > 0, "A trial must draw at least one sample");

    let mut accumulator = RunningStatistics::new();
    for _ in 0..sample_count {
        accumulator.observe(sampler.draw(rng));
    }
    accumulator
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fixed_seed_is_bit_reproducible() {
        let sampler = Sampler::default();
        let first = run_trial(&sampler, &mut RandomGenerator::new(42), 1000);
        for _ in 0..5 {
            let again = run_trial(&sampler, &mut RandomGenerator::new(42), 1000);
            assert_eq!(first.to_bits(), again.to_bits());
        }
    }

    #[test]
    fn both_flavors_agree_on_the_mean() {
        let sampler = Sampler::default();
        let mean = run_trial(&sampler, &mut RandomGenerator::new(8), 5000);
        let stats = run_trial_with_variance(&sampler, &mut RandomGenerator::new(8), 5000);
        assert_eq!(stats.count(), 5000);
        assert_eq!(mean.to_bits(), stats.mean().to_bits());
    }

    #[test]
    fn single_sample_trial_returns_that_sample() {
        let sampler = Sampler::default();
        let mut mirror = RandomGenerator::new(99);
        let expected = sampler.draw(&mut mirror);

        let stats = run_trial_with_variance(&sampler, &mut RandomGenerator::new(99), 1);
        assert_eq!(stats.mean(), expected);
        assert_eq!(stats.variance(), 0.);
        assert_eq!(run_trial(&sampler, &mut RandomGenerator::new(99), 1), expected);
    }

    #[test]
    fn consecutive_trials_continue_the_stream() {
        let sampler = Sampler::default();
        let mut rng = RandomGenerator::new(5);
        let first = run_trial(&sampler, &mut rng, 100);
        let second = run_trial(&sampler, &mut rng, 100);
        assert_ne!(first, second);
    }

    #[test]
    fn converges_to_laplace_transform_of_cosine() {
        // ∫₀^∞ cos(x)·e^(-x) dx = 1/2
        let sampler = Sampler::default();
        let mean = run_trial(&sampler, &mut RandomGenerator::new(42), 10_000);
        assert_abs_diff_eq!(mean, 0.5, epsilon = 0.05);

        // Var[cos(Y)] = 3/5 - 1/4 for Y ~ Exp(1)
        let stats = run_trial_with_variance(&sampler, &mut RandomGenerator::new(42), 100_000);
        assert_abs_diff_eq!(stats.mean(), 0.5, epsilon = 0.01);
        assert_abs_diff_eq!(stats.variance(), 0.35, epsilon = 0.02);
    }

    #[test]
    #[should_panic(expected = "at least one sample")]
    fn empty_trial_is_rejected() {
        run_trial(&Sampler::default(), &mut RandomGenerator::new(1), 0);
    }
}
