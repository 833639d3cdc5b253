use std::io::Write;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::scheduler::job::CompletedJob;
use crate::shutdown::Shutdown;

/// Single serialization point for finished jobs.
///
/// One lock covers the result-log writer and the completion counter, so log
/// lines never interleave and the counter is incremented exactly once per
/// job. This is also the sole place the termination flag is set: when the
/// counter reaches the expected job count, the writer is flushed and
/// [`Shutdown`] is triggered.
pub struct CompletionSink {
    inner: Mutex<SinkInner>,
    expected: u64,
    shutdown: Shutdown,
}

struct SinkInner {
    writer: Box<dyn Write + Send>,
    completed: u64,
}

impl CompletionSink {
    pub fn new(writer: impl Write + Send + 'static, expected: u64, shutdown: Shutdown) -> Self {
        Self {
            inner: Mutex::new(SinkInner {
                writer: Box::new(writer),
                completed: 0,
            }),
            expected,
            shutdown,
        }
    }

    /// Record one completed job: serialize its timing line, bump the
    /// completion counter, and raise the termination flag when every expected
    /// job has been seen. Must be called exactly once per job.
    pub fn record(&self, done: &CompletedJob) -> Result<()> {
        let mut inner = self.lock();

        let response_us = done
            .response_time()
            .num_microseconds()
            .unwrap_or(i64::MAX)
            .max(0) as u64;
        writeln!(
            inner.writer,
            "{},{},{},{},{}",
            done.job.id,
            format_timestamp(done.job.arrival_time),
            format_duration_us(done.execution_time.as_micros() as u64),
            format_timestamp(done.departure_time),
            format_duration_us(response_us),
        )?;

        inner.completed += 1;
        if inner.completed == self.expected {
            inner.writer.flush()?;
            tracing::info!(completed = inner.completed, "All jobs completed");
            self.shutdown.trigger();
        }
        Ok(())
    }

    pub fn completed(&self) -> u64 {
        self.lock().completed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SinkInner> {
        // Poison here means a recording thread panicked; propagate.
        self.inner.lock().expect("completion sink mutex poisoned")
    }
}

impl std::fmt::Debug for CompletionSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSink")
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}

/// Epoch timestamp as `seconds.microseconds`.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    format!("{}.{:06}", ts.timestamp(), ts.timestamp_subsec_micros())
}

/// Microsecond count as `seconds.microseconds`.
fn format_duration_us(us: u64) -> String {
    format!("{}.{:06}", us / 1_000_000, us % 1_000_000)
}
