use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::scheduler::job::{Job, PAYLOAD_LEN};
use crate::scheduler::{DispatchPolicy, WorkQueue};

/// Produces the configured number of jobs, routes each through the dispatch
/// policy, and sleeps an exponentially distributed interval between
/// emissions (simulated Poisson arrivals).
///
/// Single-threaded by construction: ids, the RNG, and round-robin state need
/// no synchronization. The generator finishes before the termination flag
/// can be raised, since the last job cannot complete before it is emitted.
pub struct JobGenerator {
    policy: DispatchPolicy,
    num_jobs: u64,
    max_rounds: u32,
    mean_delay_us: u64,
    rng: StdRng,
}

impl JobGenerator {
    pub fn new(config: &SimConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self {
            policy: config.policy,
            num_jobs: config.num_jobs,
            max_rounds: config.max_rounds,
            mean_delay_us: config.mean_delay_us,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Emit all jobs into `queues`. Fails only when a bounded queue rejects
    /// a dispatch; with unbounded queues generation cannot fail.
    pub fn run(&mut self, queues: &[WorkQueue]) -> Result<()> {
        // Mean of Exp(rate) is 1/rate; the configured lambda is the mean.
        let delay = Exp::new(1.0 / self.mean_delay_us as f64)
            .map_err(|e| SimError::InvalidConfig(format!("lambda: {e}")))?;

        for id in 0..self.num_jobs {
            let job = Job::new(id, self.random_payload(), self.rng.gen_range(1..=self.max_rounds));
            let target = self.policy.select(id, queues.len(), &mut self.rng);

            tracing::trace!(job_id = id, queue = target, rounds = job.rounds, "Job dispatched");
            queues[target].enqueue(job).map_err(|_| SimError::QueueFull {
                queue: target,
                capacity: queues[target].capacity().unwrap_or(0),
            })?;

            let sleep_us = delay.sample(&mut self.rng);
            std::thread::sleep(Duration::from_micros(sleep_us as u64));
        }

        tracing::debug!(jobs = self.num_jobs, "Generator finished");
        Ok(())
    }

    fn random_payload(&mut self) -> [u8; PAYLOAD_LEN] {
        let mut payload = [0u8; PAYLOAD_LEN];
        for byte in payload.iter_mut() {
            *byte = self.rng.sample(Alphanumeric);
        }
        payload
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
