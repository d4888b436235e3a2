//! This module is in charge of reporting run results and timings on the
//! standard output
//!
//! None of this is persisted: the only file output of a run is the binary
//! trial means written by `ResultSet::write_to`.

use crate::{results::ResultSet, stats::RunningStatistics, Result};

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use std::{path::Path, time::Duration};

/// Announce the seed of a single-process run before sampling starts
pub fn print_serial_seed(seed: u64) {
    println!("Seed from clock time is {}", seed);
}

/// Display the outcome of a single-process run
pub fn print_serial_report(stats: &RunningStatistics, elapsed_time: Duration) -> Result<()> {
    println!("Estimate for integral is {:.6}", stats.mean());
    println!("Estimate for variance is {:.6}", stats.variance());
    println!(
        "Standard error over {} samples is {:e}",
        stats.count(),
        stats.standard_error()
    );
    println!("Time elapsed: {} seconds", elapsed_time.as_secs_f64());
    print_timestamp()
}

/// Display the outcome of a multi-worker run
pub fn print_parallel_report(
    results: &ResultSet,
    output_file: &Path,
    elapsed_time: Duration,
) -> Result<()> {
    println!(
        "Ran {} trials ({} per worker) from base seed {}",
        results.len(),
        results.trials_per_worker(),
        results.base_seed()
    );
    println!("Trial means written to {}", output_file.display());

    // A quick look at the spread of the trials, the full data is in the file
    if !results.is_empty() {
        let stats = results.statistics();
        println!(
            "Mean over trials is {:.6}, with standard error {:e}",
            stats.mean(),
            stats.standard_error()
        );
    }

    println!("Execution time = {:e} seconds", elapsed_time.as_secs_f64());
    print_timestamp()
}

/// Display when the run ended
fn print_timestamp() -> Result<()> {
    let timestamp = OffsetDateTime::now_utc().format(&Rfc3339)?;
    println!("Run completed at {}", timestamp);
    Ok(())
}
