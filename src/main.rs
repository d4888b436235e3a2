//! mcquad: Monte Carlo quadrature with online statistics
//!
//!
//! # Introduction (for the mathematician)
//!
//! This small program estimates the integral of g(x)·e^(-x) over [0, +∞) as
//! the expectation of g(Y) for an exponentially distributed Y. The reference
//! integrand is g = cos, for which the exact answer is 1/2.
//!
//!
//! # Introduction (for the numerical guy)
//!
//! Samples are drawn by inverse-CDF transform of uniform variates, and folded
//! into recurrence relations for the mean and variance as soon as they are
//! produced, so no sample is ever stored:
//!
//! ```text
//! mean[n]     = ((n-1)/n)·mean[n-1] + (1/n)·g(x_n)
//! variance[n] = ((n-2)/(n-1))·variance[n-1] + (1/n)·(g(x_n) - mean[n-1])²
//! ```
//!
//!
//! # Introduction (for the computer guy)
//!
//! There are two ways to run it:
//!
//! * `serial` runs one big trial in this thread and reports its mean and
//!   variance.
//! * `parallel` splits many independent trials between a fixed set of
//!   workers, each with its own seed, and gathers every trial mean into one
//!   binary file, so that the spread of the estimator can be studied offline.

#![warn(missing_docs)]

mod config;
mod numeric;
mod output;
mod random;
mod results;
mod sampler;
mod scheduling;
mod stats;
mod trial;

use crate::{
    config::{ParallelConfig, SerialConfig},
    sampler::Sampler,
};

use clap::{Parser, Subcommand};
use eyre::{ensure, WrapErr};

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

/// We'll use eyre's type-erased result type throughout the application
type Result<T> = eyre::Result<T>;

/// Monte Carlo estimation of ∫₀^∞ cos(x)·e^(-x) dx
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Maximal level of the log messages printed on stderr
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    mode: Mode,
}

/// Supported ways of running the simulation
#[derive(Subcommand)]
enum Mode {
    /// Run one trial in this process, reporting its mean and variance
    Serial {
        /// Text file containing the number of samples
        input: PathBuf,
    },

    /// Run many trials across a fixed set of workers, storing every trial mean
    Parallel {
        /// Text file containing the number of samples per trial, then the
        /// number of trials
        input: PathBuf,

        /// Binary file receiving the trial count and the trial means
        output: PathBuf,

        /// Number of workers (defaults to one per CPU)
        #[arg(short, long)]
        workers: Option<usize>,
    },
}

/// This will act as our main function, with suitable error handling
fn main() -> Result<()> {
    // Argument errors are reported by clap, which then exits with status 2
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.mode {
        Mode::Serial { input } => run_serial(&input),
        Mode::Parallel {
            input,
            output,
            workers,
        } => run_parallel(&input, &output, workers),
    }
}

/// Single-process mode
fn run_serial(input: &Path) -> Result<()> {
    let cfg = SerialConfig::load(input).wrap_err("Failed to load the configuration")?;

    // Start the clock after configuration I/O, to avoid IO-induced timing
    // fluctuations
    let saved_time = Instant::now();

    let seed = scheduling::clock_seed();
    output::print_serial_seed(seed);
    let stats = scheduling::run_serial_job(&Sampler::default(), cfg.sample_count, seed);

    output::print_serial_report(&stats, saved_time.elapsed())
}

/// Multi-worker mode
fn run_parallel(input: &Path, output_file: &Path, workers: Option<usize>) -> Result<()> {
    let num_workers = workers.unwrap_or_else(rayon::current_num_threads);
    ensure!(num_workers > 0, "Please run at least one worker");

    let cfg = ParallelConfig::load(input).wrap_err("Failed to load the configuration")?;
    let saved_time = Instant::now();

    // The base seed always comes from the coordinator's clock here
    let results = scheduling::run_parallel_job(&cfg, num_workers, None, &Sampler::default())?;

    // Nothing is written unless every worker made it through the gather
    results
        .write_to(output_file)
        .wrap_err("Failed to output the results")?;

    output::print_parallel_report(&results, output_file, saved_time.elapsed())
}
