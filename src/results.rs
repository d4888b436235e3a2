//! This module contains everything that is needed to store and summarize the
//! gathered results of a multi-worker job

use crate::{numeric::Float, scheduling::JobParameters, stats::RunningStatistics, Result};

use eyre::{eyre, WrapErr};

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Trial means of a whole job, in worker-major order
///
/// Element k comes from worker k / trials_per_worker, and is the
/// (k mod trials_per_worker)-th trial which that worker ran.
///
#[derive(Debug, PartialEq)]
pub struct ResultSet {
    /// Mean of every executed trial
    trial_means: Vec<Float>,

    /// Number of trials run by each worker
    trials_per_worker: usize,

    /// Base seed of the job that produced these results
    base_seed: u64,
}
//
impl ResultSet {
    /// Wrap the output of a gather over `num_workers` workers
    pub fn new(trial_means: Vec<Float>, params: &JobParameters, num_workers: usize) -> Self {
        assert_eq!(
            trial_means.len(),
            params.executed_trials(num_workers),
            "Every worker should have reported all of its trials"
        );
        Self {
            trial_means,
            trials_per_worker: params.trials_per_worker,
            base_seed: params.base_seed,
        }
    }

    /// Trial means, in worker-major order
    pub fn trial_means(&self) -> &[Float] {
        &self.trial_means
    }

    /// Number of executed trials
    pub fn len(&self) -> usize {
        self.trial_means.len()
    }

    /// Truth that no trial ran at all
    pub fn is_empty(&self) -> bool {
        self.trial_means.is_empty()
    }

    /// Base seed of the job
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Number of trials run by each worker
    pub fn trials_per_worker(&self) -> usize {
        self.trials_per_worker
    }

    /// Statistics of the trial means across the whole job
    pub fn statistics(&self) -> RunningStatistics {
        let mut stats = RunningStatistics::new();
        stats.extend(self.trial_means().iter().copied());
        stats
    }

    /// Store the results in a binary file
    ///
    /// The file starts with the number of trials as a native-endian 32-bit
    /// signed integer, followed by each trial mean as a native-endian 64-bit
    /// IEEE-754 float.
    ///
    pub fn write_to(&self, file_name: &Path) -> Result<()> {
        let file = File::create(file_name)
            .wrap_err_with(|| format!("Unable to create output file {}", file_name.display()))?;
        let mut writer = BufWriter::new(file);
        self.encode(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize the results into any byte sink, see `write_to`
    fn encode(&self, writer: &mut impl Write) -> Result<()> {
        let count = i32::try_from(self.len())
            .map_err(|_| eyre!("{} trials do not fit in the output header", self.len()))?;
        writer.write_all(&count.to_ne_bytes())?;
        for mean in &self.trial_means {
            writer.write_all(&mean.to_ne_bytes())?;
        }
        Ok(())
    }
}
