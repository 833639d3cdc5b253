use std::collections::VecDeque;
use std::sync::Mutex;

use crate::scheduler::job::Job;

/// One FIFO lane of pending jobs, paired with exactly one worker.
///
/// Shared by the generator (producer), its worker (consumer), and the
/// balancer (both); every operation takes the queue's own lock and holds it
/// only for the splice. Unbounded unless constructed with a capacity, in
/// which case an overflowing enqueue hands the job back to the caller.
#[derive(Debug)]
pub struct WorkQueue {
    jobs: Mutex<VecDeque<Job>>,
    capacity: Option<usize>,
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkQueue {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(VecDeque::new()),
            capacity: None,
        }
    }

    pub fn bounded(capacity: usize) -> Self {
        Self {
            jobs: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: Some(capacity),
        }
    }

    /// Append a job at the tail. Returns the job when the queue is bounded
    /// and already at capacity.
    pub fn enqueue(&self, job: Job) -> Result<(), Job> {
        let mut jobs = self.lock();
        if let Some(cap) = self.capacity {
            if jobs.len() >= cap {
                return Err(job);
            }
        }
        jobs.push_back(job);
        Ok(())
    }

    /// Remove and return the oldest job, or `None` if the queue is currently
    /// empty. Never blocks waiting for work; callers poll so they can also
    /// observe the global termination flag.
    pub fn try_dequeue(&self) -> Option<Job> {
        self.lock().pop_front()
    }

    /// Put a job back at the head, ignoring any capacity bound. Used by the
    /// balancer to undo a migration whose destination rejected the job, so a
    /// move can never drop work.
    pub fn reinstate(&self, job: Job) {
        self.lock().push_front(job);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Job>> {
        // Poison here means a thread panicked mid-splice; propagate.
        self.jobs.lock().expect("work queue mutex poisoned")
    }
}
