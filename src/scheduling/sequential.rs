//! Single-process back-end of the simulation

use crate::{
    random::RandomGenerator, sampler::Sampler, stats::RunningStatistics,
    trial::run_trial_with_variance,
};

use tracing::info;

/// Run one trial of `sample_count` samples in the calling thread
///
/// Unlike multi-worker jobs, which only keep trial means, this tracks the
/// variance of the observations too.
///
pub fn run_serial_job(sampler: &Sampler, sample_count: usize, seed: u64) -> RunningStatistics {
    // Some double-checking cannot hurt...
    assert!(sample_count > 0, "Must draw at least one sample");

    info!(sample_count, seed, "starting single-process run");
    let mut rng = RandomGenerator::new(seed);
    run_trial_with_variance(sampler, &mut rng, sample_count)
}
