//! This module takes care of scheduling the simulation work: splitting trials
//! between workers, seeding them, and running them either in this thread or
//! across a fixed set of worker threads.

mod multi_threading;
mod sequential;
mod world;

pub use self::{multi_threading::run_parallel_job, sequential::run_serial_job};

use tracing::warn;

use std::time::{SystemTime, UNIX_EPOCH};

/// Rank of the worker which owns the job parameters and collects the results
pub const COORDINATOR: usize = 0;

/// Parameters which the coordinator shares with every worker before any
/// sampling begins
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JobParameters {
    /// Seed from which every worker's seed is offset
    pub base_seed: u64,

    /// Number of samples drawn by each trial
    pub samples_per_trial: usize,

    /// Number of trials run by each worker
    pub trials_per_worker: usize,
}
//
impl JobParameters {
    /// Split `total_trials` evenly between `num_workers` workers
    ///
    /// Every worker gets floor(total_trials / num_workers) trials. Leftover
    /// trials are not run, so fewer than `total_trials` results may come out.
    ///
    pub fn new(
        samples_per_trial: usize,
        total_trials: usize,
        num_workers: usize,
        base_seed: u64,
    ) -> Self {
        assert!(num_workers > 0, "There should be at least one worker");
        let trials_per_worker = total_trials / num_workers;
        let dropped = total_trials % num_workers;
        if dropped != 0 {
            warn!(
                total_trials,
                num_workers,
                dropped,
                "trial count is not a multiple of the worker count, leftover trials will not run"
            );
        }
        if trials_per_worker == 0 {
            warn!(total_trials, num_workers, "fewer trials than workers, no trial will run");
        }
        Self {
            base_seed,
            samples_per_trial,
            trials_per_worker,
        }
    }

    /// Work assigned to a given worker
    pub fn assignment(&self, worker_id: usize) -> WorkerAssignment {
        WorkerAssignment {
            worker_id,
            trial_count: self.trials_per_worker,
            seed: worker_seed(self.base_seed, worker_id),
        }
    }

    /// Every worker's assignment, in rank order
    pub fn plan(&self, num_workers: usize) -> Vec<WorkerAssignment> {
        (0..num_workers).map(|id| self.assignment(id)).collect()
    }

    /// Number of trials which will actually run across all workers
    pub fn executed_trials(&self, num_workers: usize) -> usize {
        self.trials_per_worker * num_workers
    }
}

/// Work of one worker, fixed for the lifetime of the job
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerAssignment {
    /// Rank of the worker, in [0, num_workers)
    pub worker_id: usize,

    /// Number of trials to run
    pub trial_count: usize,

    /// Seed of the worker's random number generator
    pub seed: u64,
}

/// Seed of a worker's generator, as a fixed offset from the shared base seed
///
/// Seeds are pairwise distinct as long as there are fewer than 2^64 workers.
///
pub fn worker_seed(base_seed: u64, worker_id: usize) -> u64 {
    base_seed.wrapping_add(worker_id as u64)
}

/// Derive a base seed from the wall-clock time, in seconds since the epoch
///
/// This makes every launch draw different numbers.
///
pub fn clock_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(since_epoch) => since_epoch.as_secs(),
        // A clock set before 1970 still gives a usable seed
        Err(before_epoch) => before_epoch.duration().as_secs(),
    }
}
