//! Per-queue worker threads.
//!
//! Each worker is bound to exactly one [`WorkQueue`](crate::scheduler::WorkQueue)
//! for its whole lifetime and alternates between two states:
//!
//! 1. **Polling**: try to dequeue; if the queue is empty, sleep for the
//!    configured poll interval and re-check the termination flag.
//! 2. **Executing**: run the job through [`JobExecutor`] synchronously, then
//!    hand the result to the completion sink.
//!
//! Workers never block on an empty queue — polling keeps the termination
//! flag observable without anyone having to wake them. A zero poll interval
//! degenerates to a true busy-wait, trading a saturated core for the lowest
//! pickup latency.

pub mod executor;

pub use executor::JobExecutor;

use std::time::Duration;

use crate::error::Result;
use crate::scheduler::WorkQueue;
use crate::shutdown::Shutdown;
use crate::sink::CompletionSink;

/// Drain one queue until the termination flag is raised.
///
/// Jobs still queued when the flag goes up are abandoned; that is safe
/// because the flag is only set once every generated job has completed, at
/// which point the queues are already empty.
pub fn run_worker(
    index: usize,
    queue: &WorkQueue,
    sink: &CompletionSink,
    shutdown: &Shutdown,
    poll_interval: Duration,
) -> Result<()> {
    let executor = JobExecutor::new();
    tracing::debug!(worker = index, "Worker started");

    while !shutdown.is_triggered() {
        match queue.try_dequeue() {
            Some(job) => {
                let done = executor.execute(job);
                sink.record(&done)?;
            }
            None => {
                if !poll_interval.is_zero() {
                    std::thread::sleep(poll_interval);
                }
            }
        }
    }

    tracing::debug!(worker = index, "Worker exiting");
    Ok(())
}
