use std::time::Instant;

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::scheduler::job::{CompletedJob, Job, PAYLOAD_LEN};

/// CPU-bound execution engine: iterated SHA-256 hash chaining.
///
/// Each round hashes the working buffer and feeds the digest into the next
/// round. The output is not meaningful; the rounds exist to burn a
/// controllable, randomized amount of CPU per job.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobExecutor;

impl JobExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Run a job to completion, recording wall-clock execution time and the
    /// departure timestamp. Always runs all rounds; there is no mid-flight
    /// cancellation.
    pub fn execute(&self, job: Job) -> CompletedJob {
        let started = Instant::now();
        let output = hash_chain(job.payload, job.rounds);
        let execution_time = started.elapsed();
        let departure_time = Utc::now();

        tracing::trace!(
            job_id = job.id,
            rounds = job.rounds,
            execution_us = execution_time.as_micros() as u64,
            "Job executed"
        );

        CompletedJob {
            job,
            execution_time,
            departure_time,
            output,
        }
    }
}

/// Apply `rounds` iterations of SHA-256, each digest becoming the next
/// iteration's input. Deterministic in (payload, rounds).
pub fn hash_chain(payload: [u8; PAYLOAD_LEN], rounds: u32) -> [u8; PAYLOAD_LEN] {
    let mut buf = payload;
    for _ in 0..rounds {
        buf = Sha256::digest(buf).into();
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_chain_is_deterministic() {
        let payload = [0x41u8; PAYLOAD_LEN];
        assert_eq!(hash_chain(payload, 100), hash_chain(payload, 100));
    }

    #[test]
    fn single_round_matches_plain_digest() {
        let payload = [0x42u8; PAYLOAD_LEN];
        let expected: [u8; PAYLOAD_LEN] = Sha256::digest(payload).into();
        assert_eq!(hash_chain(payload, 1), expected);
    }

    #[test]
    fn zero_rounds_is_identity() {
        let payload = [7u8; PAYLOAD_LEN];
        assert_eq!(hash_chain(payload, 0), payload);
    }

    #[test]
    fn execute_populates_timing() {
        let job = Job::new(0, [1u8; PAYLOAD_LEN], 10);
        let arrival = job.arrival_time;
        let done = JobExecutor::new().execute(job);
        assert!(done.departure_time >= arrival);
        assert!(done.response_time() >= chrono::Duration::zero());
        assert_eq!(done.output, hash_chain([1u8; PAYLOAD_LEN], 10));
    }
}
