//! Collective communication between the workers of a job
//!
//! Workers only ever talk to each other through two collective operations:
//! a broadcast of the job parameters from the coordinator, and a gather of the
//! trial results to the coordinator. Both are all-or-nothing: every worker of
//! the world must take part, and none of them returns before all of them have
//! reached the operation. There is no timeout, so a worker that never shows
//! up blocks the whole job.

use crate::{numeric::Float, scheduling::COORDINATOR};

use std::sync::{Barrier, Mutex};

/// Shared state of a fixed-size group of cooperating workers
///
/// `B` is the type of the message broadcast by the coordinator.
///
pub struct World<B> {
    /// Number of workers, fixed at creation
    size: usize,

    /// Synchronization point bounding each collective phase
    barrier: Barrier,

    /// Message being broadcast by the coordinator
    broadcast_slot: Mutex<Option<B>>,

    /// Local results of each worker, indexed by rank
    gather_slots: Box<[Mutex<Option<Vec<Float>>>]>,
}
//
impl<B: Clone> World<B> {
    /// Set up communication between `size` workers
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "There should be at least one worker");
        Self {
            size,
            barrier: Barrier::new(size),
            broadcast_slot: Mutex::new(None),
            gather_slots: (0..size)
                .map(|_| Mutex::new(None))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        }
    }

    /// Number of workers in this world
    pub fn size(&self) -> usize {
        self.size
    }

    /// Share the coordinator's message with every worker
    ///
    /// Must be called by every worker. The coordinator passes `Some(message)`,
    /// other workers pass `None`, and everyone gets the message back.
    ///
    pub fn broadcast(&self, rank: usize, message: Option<B>) -> B {
        assert!(rank < self.size, "Worker rank should be in range");
        if rank == COORDINATOR {
            let message = message.expect("The coordinator should provide the broadcast message");
            *self
                .broadcast_slot
                .lock()
                .expect("Mutex data should be valid") = Some(message);
        }

        // Nobody reads before the coordinator has written...
        self.barrier.wait();
        let received = self
            .broadcast_slot
            .lock()
            .expect("Mutex data should be valid")
            .clone()
            .expect("Broadcast message should be ready");

        // ...and nobody moves on before everyone has read
        self.barrier.wait();
        received
    }

    /// Collect every worker's local results at the coordinator
    ///
    /// Must be called by every worker. The coordinator gets all results
    /// concatenated in rank order, each worker's results in the order it
    /// produced them. Other workers get `None` and keep no copy.
    ///
    pub fn gather(&self, rank: usize, local: Vec<Float>) -> Option<Vec<Float>> {
        assert!(rank < self.size, "Worker rank should be in range");
        {
            let mut slot = self.gather_slots[rank]
                .lock()
                .expect("Mutex data should be valid");
            assert!(slot.is_none(), "Workers should not report results twice");
            *slot = Some(local);
        }

        // The coordinator waits for every contribution...
        self.barrier.wait();
        let gathered: Option<Vec<Float>> = (rank == COORDINATOR).then(|| {
            self.gather_slots
                .iter()
                .flat_map(|slot| {
                    slot.lock()
                        .expect("Mutex data should be valid")
                        .take()
                        .expect("Result should be ready")
                })
                .collect()
        });

        // ...and everyone waits for the coordinator to be done collecting
        self.barrier.wait();
        gathered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run the same closure on `size` threads, like the workers of a job
    fn spmd<R: Send>(
        world: &World<u64>,
        worker: impl Fn(usize, &World<u64>) -> R + Sync,
    ) -> Vec<R> {
        std::thread::scope(|scope| {
            let handles = (0..world.size())
                .map(|rank| {
                    let worker = &worker;
                    scope.spawn(move || worker(rank, world))
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("Worker should not panic"))
                .collect()
        })
    }

    #[test]
    fn broadcast_reaches_every_worker() {
        let world = World::new(5);
        let received = spmd(&world, |rank, world| {
            world.broadcast(rank, (rank == COORDINATOR).then_some(1234))
        });
        assert_eq!(received, vec![1234; 5]);
    }

    #[test]
    fn gather_concatenates_in_rank_order() {
        let world = World::new(4);
        let gathered = spmd(&world, |rank, world| {
            // Make later ranks finish first
            std::thread::sleep(std::time::Duration::from_millis(10 * (4 - rank as u64)));
            let local = (0..3).map(|i| (10 * rank + i) as Float).collect();
            world.gather(rank, local)
        });

        let expected: Vec<Float> = [0, 1, 2, 10, 11, 12, 20, 21, 22, 30, 31, 32]
            .iter()
            .map(|&x| x as Float)
            .collect();
        assert_eq!(gathered[COORDINATOR].as_ref(), Some(&expected));
        assert!(gathered[1..].iter().all(Option::is_none));
    }

    #[test]
    fn empty_contributions() {
        let world = World::<u64>::new(3);
        let gathered = spmd(&world, |rank, world| world.gather(rank, Vec::new()));
        assert_eq!(gathered[COORDINATOR], Some(Vec::new()));
    }

    #[test]
    fn single_worker_world() {
        let world = World::new(1);
        assert_eq!(world.broadcast(COORDINATOR, Some(7)), 7);
        assert_eq!(world.gather(COORDINATOR, vec![0.5]), Some(vec![0.5]));
    }
}
