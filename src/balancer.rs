use crate::scheduler::WorkQueue;

/// Post-dispatch redistribution of queued jobs.
///
/// The balancer runs on its own thread and may move jobs between queues
/// while workers drain them. Implementations must never duplicate or drop a
/// job; a job that vanishes from the source between the depth read and the
/// dequeue attempt was taken by its worker and is simply not migrated.
pub trait Balancer: Send {
    /// Inspect queue depths and migrate jobs as the policy dictates.
    /// Returns the number of jobs moved.
    fn rebalance(&mut self, queues: &[WorkQueue]) -> usize;
}

/// The default balancer: observes nothing, moves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBalancer;

impl Balancer for NoopBalancer {
    fn rebalance(&mut self, _queues: &[WorkQueue]) -> usize {
        0
    }
}

/// Moves jobs from the deepest queue to the shallowest whenever the depth
/// spread exceeds a threshold.
///
/// Depths are read one lock at a time, not as an atomic snapshot; transient
/// skew only makes a migration less useful, never incorrect.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdBalancer {
    threshold: usize,
}

impl ThresholdBalancer {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }
}

impl Balancer for ThresholdBalancer {
    fn rebalance(&mut self, queues: &[WorkQueue]) -> usize {
        if queues.len() < 2 {
            return 0;
        }

        let depths: Vec<usize> = queues.iter().map(|q| q.len()).collect();
        let (deepest, &max_depth) = match depths.iter().enumerate().max_by_key(|(_, d)| **d) {
            Some(found) => found,
            None => return 0,
        };
        let (shallowest, &min_depth) = match depths.iter().enumerate().min_by_key(|(_, d)| **d) {
            Some(found) => found,
            None => return 0,
        };

        let spread = max_depth - min_depth;
        if spread <= self.threshold || deepest == shallowest {
            return 0;
        }

        let mut moved = 0;
        for _ in 0..spread / 2 {
            let job = match queues[deepest].try_dequeue() {
                Some(job) => job,
                None => {
                    // The worker got there first; nothing to migrate.
                    tracing::trace!(queue = deepest, "Migration source already drained");
                    break;
                }
            };
            let job_id = job.id;
            if let Err(job) = queues[shallowest].enqueue(job) {
                // Destination at capacity; put the job back where it came
                // from and stop this round.
                queues[deepest].reinstate(job);
                break;
            }
            tracing::trace!(
                job_id,
                from = deepest,
                to = shallowest,
                "Job migrated"
            );
            moved += 1;
        }

        if moved > 0 {
            tracing::debug!(moved, from = deepest, to = shallowest, "Rebalanced queues");
        }
        moved
    }
}
