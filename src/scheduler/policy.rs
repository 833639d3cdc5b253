use clap::ValueEnum;
use rand::Rng;

/// Rule mapping a new job to a queue index. Selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DispatchPolicy {
    /// Uniform random target queue.
    Random,
    /// `job id mod number of queues`.
    RoundRobin,
}

impl std::fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchPolicy::Random => write!(f, "random"),
            DispatchPolicy::RoundRobin => write!(f, "round-robin"),
        }
    }
}

impl DispatchPolicy {
    /// Pick the target queue for a job. Pure in the job id for round-robin;
    /// random mode draws from the caller's generator, so only the generator
    /// thread touches that state.
    pub fn select<R: Rng>(&self, job_id: u64, num_queues: usize, rng: &mut R) -> usize {
        debug_assert!(num_queues > 0);
        match self {
            DispatchPolicy::Random => rng.gen_range(0..num_queues),
            DispatchPolicy::RoundRobin => (job_id % num_queues as u64) as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn round_robin_cycles_through_queues() {
        let mut rng = StdRng::seed_from_u64(0);
        for id in 0..16u64 {
            let target = DispatchPolicy::RoundRobin.select(id, 4, &mut rng);
            assert_eq!(target, (id % 4) as usize);
        }
    }

    #[test]
    fn random_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for id in 0..1000u64 {
            let target = DispatchPolicy::Random.select(id, 3, &mut rng);
            assert!(target < 3);
        }
    }

    #[test]
    fn single_queue_always_selected() {
        let mut rng = StdRng::seed_from_u64(1);
        for id in 0..10u64 {
            assert_eq!(DispatchPolicy::Random.select(id, 1, &mut rng), 0);
            assert_eq!(DispatchPolicy::RoundRobin.select(id, 1, &mut rng), 0);
        }
    }
}
