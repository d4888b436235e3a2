//! Multi-worker back-end of the simulation
//!
//! A job runs as a fixed set of workers which all execute the same program,
//! one worker per thread of a dedicated thread pool. Workers are launched
//! together, never spawned or resized afterwards, and only synchronize at two
//! points: when the coordinator broadcasts the job parameters, and when it
//! gathers the trial results.

use crate::{
    config::ParallelConfig,
    numeric::Float,
    random::RandomGenerator,
    results::ResultSet,
    sampler::Sampler,
    scheduling::{clock_seed, world::World, JobParameters, COORDINATOR},
    trial::run_trial,
    Result,
};

use eyre::{ensure, WrapErr};
use rayon::ThreadPoolBuilder;
use tracing::{debug, info};

/// Run a job across `num_workers` workers
///
/// The coordinator derives the base seed from the wall-clock time, unless
/// `base_seed` forces one. Returns the trial means of every worker, in
/// worker-major order.
///
pub fn run_parallel_job(
    cfg: &ParallelConfig,
    num_workers: usize,
    base_seed: Option<u64>,
    sampler: &Sampler,
) -> Result<ResultSet> {
    ensure!(num_workers > 0, "Please run at least one worker");

    // One thread per worker, so that every worker can block in a collective
    // operation while the others keep going
    let pool = ThreadPoolBuilder::new()
        .num_threads(num_workers)
        .thread_name(|index| format!("mcquad-worker-{index}"))
        .build()
        .wrap_err("Failed to start the worker threads")?;
    let world = World::new(num_workers);

    // This only returns once every worker has gone through the gather
    let mut outcomes =
        pool.broadcast(|ctx| run_worker(ctx.index(), &world, cfg, base_seed, sampler));

    Ok(outcomes
        .swap_remove(COORDINATOR)
        .expect("The coordinator should hold the gathered results"))
}

/// Program executed by every worker of a job
fn run_worker(
    rank: usize,
    world: &World<JobParameters>,
    cfg: &ParallelConfig,
    base_seed: Option<u64>,
    sampler: &Sampler,
) -> Option<ResultSet> {
    // Only the coordinator knows the job parameters at first...
    let root_params = (rank == COORDINATOR).then(|| {
        let base_seed = base_seed.unwrap_or_else(clock_seed);
        let params =
            JobParameters::new(cfg.sample_count, cfg.total_trials, world.size(), base_seed);
        info!(
            base_seed,
            num_workers = world.size(),
            trials_per_worker = params.trials_per_worker,
            samples_per_trial = params.samples_per_trial,
            "starting multi-worker job"
        );
        for assignment in params.plan(world.size()) {
            debug!(
                worker = assignment.worker_id,
                trials = assignment.trial_count,
                seed = assignment.seed,
                "worker assignment"
            );
        }
        params
    });

    // ...and no worker may start sampling before everyone has received them
    let params = world.broadcast(rank, root_params);
    let assignment = params.assignment(rank);

    // The generator is seeded once here and then only ever advanced by this
    // worker's trials, in order
    let mut rng = RandomGenerator::new(assignment.seed);
    let local: Vec<Float> = (0..assignment.trial_count)
        .map(|_| run_trial(sampler, &mut rng, params.samples_per_trial))
        .collect();
    debug!(worker = rank, trials = local.len(), "worker finished its trials");

    world
        .gather(rank, local)
        .map(|trial_means| ResultSet::new(trial_means, &params, world.size()))
}
