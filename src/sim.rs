use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::balancer::{Balancer, ThresholdBalancer};
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::generator::JobGenerator;
use crate::scheduler::WorkQueue;
use crate::shutdown::Shutdown;
use crate::sink::CompletionSink;
use crate::worker;

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy)]
pub struct SimReport {
    pub jobs_completed: u64,
    pub elapsed: Duration,
}

/// Shared state for one run: every queue, the completion sink, and the
/// termination flag, with a lifetime scoped to the run rather than the
/// process.
struct Shared {
    config: SimConfig,
    queues: Vec<WorkQueue>,
    sink: CompletionSink,
    shutdown: Shutdown,
}

/// Orchestrates one simulation: wires the shared state, spawns the worker,
/// generator, and (optionally) balancer threads, and joins them once the
/// completion sink raises the termination flag.
pub struct Simulation {
    config: SimConfig,
    balancer: Option<Box<dyn Balancer>>,
}

impl Simulation {
    /// Build a simulation with the stock balancing behavior: a
    /// [`ThresholdBalancer`] when `balance_load` is set, no balancer thread
    /// otherwise.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let balancer: Option<Box<dyn Balancer>> = if config.balance_load {
            Some(Box::new(ThresholdBalancer::new(config.balance_threshold)))
        } else {
            None
        };
        Ok(Self { config, balancer })
    }

    /// Build a simulation with a substitute balancing policy. The balancer
    /// thread is spawned whenever a balancer is supplied, regardless of
    /// `balance_load`.
    pub fn with_balancer(config: SimConfig, balancer: Box<dyn Balancer>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            balancer: Some(balancer),
        })
    }

    /// Run with the result log at the configured path, truncated fresh.
    pub fn run(self) -> Result<SimReport> {
        let file = File::create(&self.config.output_path)?;
        self.run_with_writer(BufWriter::new(file))
    }

    /// Run with a caller-supplied result-log writer.
    pub fn run_with_writer(self, writer: impl Write + Send + 'static) -> Result<SimReport> {
        let started = Instant::now();
        let shutdown = Shutdown::new();
        let queues: Vec<WorkQueue> = (0..self.config.num_queues)
            .map(|_| match self.config.queue_capacity {
                Some(cap) => WorkQueue::bounded(cap),
                None => WorkQueue::new(),
            })
            .collect();
        let sink = CompletionSink::new(writer, self.config.num_jobs, shutdown.clone());

        tracing::info!(
            queues = self.config.num_queues,
            policy = %self.config.policy,
            jobs = self.config.num_jobs,
            lambda_us = self.config.mean_delay_us,
            max_rounds = self.config.max_rounds,
            balance = self.balancer.is_some(),
            "Starting simulation"
        );

        let shared = Arc::new(Shared {
            config: self.config,
            queues,
            sink,
            shutdown,
        });

        let mut workers = Vec::with_capacity(shared.config.num_queues);
        for index in 0..shared.config.num_queues {
            let shared = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("worker-{index}"))
                .spawn(move || {
                    let result = worker::run_worker(
                        index,
                        &shared.queues[index],
                        &shared.sink,
                        &shared.shutdown,
                        shared.config.poll_interval,
                    );
                    if result.is_err() {
                        // A worker that cannot record results can never let
                        // the run finish; stop everyone.
                        shared.shutdown.trigger();
                    }
                    result
                })?;
            workers.push(handle);
        }

        let generator = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("generator".into())
                .spawn(move || {
                    let result = JobGenerator::new(&shared.config).run(&shared.queues);
                    if result.is_err() {
                        shared.shutdown.trigger();
                    }
                    result
                })?
        };

        let balancer = match self.balancer {
            Some(mut policy) => {
                let shared = Arc::clone(&shared);
                Some(
                    thread::Builder::new()
                        .name("balancer".into())
                        .spawn(move || run_balancer(policy.as_mut(), &shared))?,
                )
            }
            None => None,
        };

        // Join in the original order: generator, then every worker, then the
        // balancer. Every thread is joined even when one fails, so no handle
        // outlives the run; the first error wins.
        let mut first_err = join(generator, "generator").err();
        for (index, handle) in workers.into_iter().enumerate() {
            if let Err(e) = join(handle, &format!("worker-{index}")) {
                first_err.get_or_insert(e);
            }
        }
        if let Some(handle) = balancer {
            if let Err(e) = join(handle, "balancer") {
                first_err.get_or_insert(e);
            }
        }
        if let Some(e) = first_err {
            return Err(e);
        }

        let report = SimReport {
            jobs_completed: shared.sink.completed(),
            elapsed: started.elapsed(),
        };
        tracing::info!(
            jobs_completed = report.jobs_completed,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Simulation finished"
        );
        Ok(report)
    }
}

/// Periodically rebalance until the termination flag is raised.
fn run_balancer(balancer: &mut dyn Balancer, shared: &Shared) -> Result<()> {
    while !shared.shutdown.is_triggered() {
        thread::sleep(shared.config.balance_interval);
        balancer.rebalance(&shared.queues);
    }
    Ok(())
}

fn join(handle: thread::JoinHandle<Result<()>>, name: &str) -> Result<()> {
    handle
        .join()
        .map_err(|_| SimError::Thread(format!("{name} thread panicked")))?
}
