use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SimError};
use crate::scheduler::DispatchPolicy;

/// Configuration for one simulation run.
///
/// Defaults match the classic simulator: 8 queues, round-robin dispatch,
/// 100000 jobs, 200µs mean inter-arrival delay, up to 5000 hash rounds per
/// job, balancing off, results in `results.csv`.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of queues, and therefore of worker threads.
    pub num_queues: usize,
    /// Rule assigning each new job to a queue.
    pub policy: DispatchPolicy,
    /// Total jobs to generate.
    pub num_jobs: u64,
    /// Run the threshold load balancer alongside the workers.
    pub balance_load: bool,
    /// Mean inter-arrival delay in microseconds (exponentially distributed).
    pub mean_delay_us: u64,
    /// Upper bound on per-job hash rounds; rounds are uniform in [1, max].
    pub max_rounds: u32,
    /// Per-queue capacity. `None` is unbounded, matching the original
    /// design; `Some` makes overflow a fatal `QueueFull`.
    pub queue_capacity: Option<usize>,
    /// How long an idle worker sleeps between dequeue attempts. Zero is a
    /// true busy-wait.
    pub poll_interval: Duration,
    /// How often the balancer wakes to inspect queue depths.
    pub balance_interval: Duration,
    /// Depth spread above which the balancer starts migrating.
    pub balance_threshold: usize,
    /// RNG seed; `None` seeds from the clock as the original did.
    pub seed: Option<u64>,
    /// Result log path, truncated at the start of each run.
    pub output_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_queues: 8,
            policy: DispatchPolicy::RoundRobin,
            num_jobs: 100_000,
            balance_load: false,
            mean_delay_us: 200,
            max_rounds: 5_000,
            queue_capacity: None,
            poll_interval: Duration::from_micros(50),
            balance_interval: Duration::from_millis(1),
            balance_threshold: 4,
            seed: None,
            output_path: PathBuf::from("results.csv"),
        }
    }
}

impl SimConfig {
    /// Reject configurations no run should start with. Called before any
    /// thread is spawned.
    pub fn validate(&self) -> Result<()> {
        if self.num_queues == 0 {
            return Err(SimError::InvalidConfig(
                "number of queues must be > 0".into(),
            ));
        }
        if self.num_jobs == 0 {
            return Err(SimError::InvalidConfig("number of jobs must be > 0".into()));
        }
        if self.mean_delay_us == 0 {
            return Err(SimError::InvalidConfig(
                "mean inter-arrival delay must be > 0".into(),
            ));
        }
        if self.max_rounds == 0 {
            return Err(SimError::InvalidConfig("max rounds must be > 0".into()));
        }
        if self.queue_capacity == Some(0) {
            return Err(SimError::InvalidConfig(
                "queue capacity must be > 0 when set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn default_matches_classic_settings() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.num_queues, 8);
        assert_eq!(cfg.policy, DispatchPolicy::RoundRobin);
        assert_eq!(cfg.num_jobs, 100_000);
        assert_eq!(cfg.mean_delay_us, 200);
        assert_eq!(cfg.max_rounds, 5_000);
        assert!(!cfg.balance_load);
        assert!(cfg.queue_capacity.is_none());
    }

    #[test]
    fn zero_queues_rejected() {
        let cfg = SimConfig {
            num_queues: 0,
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn zero_jobs_rejected() {
        let cfg = SimConfig {
            num_jobs: 0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_lambda_rejected() {
        let cfg = SimConfig {
            mean_delay_us: 0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_max_rounds_rejected() {
        let cfg = SimConfig {
            max_rounds: 0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_capacity_rejected() {
        let cfg = SimConfig {
            queue_capacity: Some(0),
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bounded_capacity_accepted() {
        let cfg = SimConfig {
            queue_capacity: Some(1024),
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
