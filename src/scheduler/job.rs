use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of the random payload hashed by the execution engine, and of each
/// SHA-256 digest fed back into the next round.
pub const PAYLOAD_LEN: usize = 32;

/// A unit of simulated work, as emitted by the generator.
///
/// Ids are assigned by the single generator thread and are strictly
/// increasing in emission order, regardless of which queue the job lands in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub arrival_time: DateTime<Utc>,
    pub payload: [u8; PAYLOAD_LEN],
    pub rounds: u32,
}

impl Job {
    pub fn new(id: u64, payload: [u8; PAYLOAD_LEN], rounds: u32) -> Self {
        Self {
            id,
            arrival_time: Utc::now(),
            payload,
            rounds,
        }
    }

    /// Construct with an explicit arrival time. Used by tests that need
    /// deterministic timestamps.
    pub fn with_arrival(
        id: u64,
        arrival_time: DateTime<Utc>,
        payload: [u8; PAYLOAD_LEN],
        rounds: u32,
    ) -> Self {
        Self {
            id,
            arrival_time,
            payload,
            rounds,
        }
    }
}

/// A job after exactly one worker has run it through the execution engine.
///
/// Execution results are written once, here, and never mutated afterwards;
/// the type split keeps the pre-execution `Job` free of half-filled fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedJob {
    pub job: Job,
    pub execution_time: Duration,
    pub departure_time: DateTime<Utc>,
    pub output: [u8; PAYLOAD_LEN],
}

impl CompletedJob {
    /// Time from generation to completion.
    pub fn response_time(&self) -> chrono::Duration {
        self.departure_time - self.job.arrival_time
    }
}
