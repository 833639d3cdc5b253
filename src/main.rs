use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use loadsim::scheduler::DispatchPolicy;
use loadsim::{SimConfig, Simulation};

#[derive(Parser, Debug)]
#[command(name = "loadsim")]
#[command(version)]
#[command(about = "Multi-queue job scheduling and load-balancing simulator")]
struct Args {
    /// Number of work queues (one worker thread per queue)
    #[arg(long, short = 'n', default_value = "8")]
    queues: usize,

    /// Dispatch policy assigning jobs to queues
    #[arg(long, short = 'a', value_enum, default_value = "round-robin")]
    policy: DispatchPolicy,

    /// Number of jobs to generate
    #[arg(long, short = 'j', default_value = "100000")]
    jobs: u64,

    /// Enable the load-balancer thread
    #[arg(long, short = 'b')]
    balance: bool,

    /// Mean inter-arrival delay in microseconds
    #[arg(long, short = 'l', default_value = "200")]
    lambda: u64,

    /// Maximum hash rounds per job
    #[arg(long, short = 'm', default_value = "5000")]
    max_rounds: u32,

    /// Result log path (truncated each run)
    #[arg(long, short = 'o', default_value = "results.csv")]
    output: PathBuf,

    /// RNG seed for reproducible runs (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Bound each queue to this many jobs; overflow aborts the run
    #[arg(long)]
    queue_capacity: Option<usize>,

    /// Idle-worker poll sleep in microseconds (0 busy-waits)
    #[arg(long, default_value = "50")]
    poll_interval_us: u64,

    /// Balancer wake-up interval in microseconds
    #[arg(long, default_value = "1000")]
    balance_interval_us: u64,

    /// Queue-depth spread that triggers migration
    #[arg(long, default_value = "4")]
    balance_threshold: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = SimConfig {
        num_queues: args.queues,
        policy: args.policy,
        num_jobs: args.jobs,
        balance_load: args.balance,
        mean_delay_us: args.lambda,
        max_rounds: args.max_rounds,
        queue_capacity: args.queue_capacity,
        poll_interval: Duration::from_micros(args.poll_interval_us),
        balance_interval: Duration::from_micros(args.balance_interval_us),
        balance_threshold: args.balance_threshold,
        seed: args.seed,
        output_path: args.output,
    };

    let report = Simulation::new(config)?.run()?;
    tracing::info!(
        jobs_completed = report.jobs_completed,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Run complete"
    );
    Ok(())
}
