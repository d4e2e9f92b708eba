use std::process::exit;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossbeam::channel;
use log::{error, info, warn};

use jobpool::{PoolConfig, Result, SharedQueueThreadPool, ThreadPool};

const DEFAULT_JOBS: u32 = 64;
const DEFAULT_SLEEP_MS: u64 = 10;

#[derive(Parser)]
#[command(
    name = "jobpool",
    version,
    about = "Runs sleeping jobs on a fixed-size thread pool and reports the wall-clock time"
)]
struct Cli {
    /// Number of worker threads [default: number of CPUs]
    #[arg(long, value_name = "N")]
    threads: Option<u32>,

    /// Number of jobs to submit
    #[arg(long, default_value_t = DEFAULT_JOBS, value_name = "M")]
    jobs: u32,

    /// How long each job sleeps, in milliseconds
    #[arg(long, default_value_t = DEFAULT_SLEEP_MS, value_name = "MS")]
    sleep_ms: u64,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.threads {
        Some(threads) => PoolConfig::new(threads),
        None => PoolConfig::default(),
    };
    let threads = config.threads();
    let sleep = Duration::from_millis(cli.sleep_ms);

    info!("jobpool {}", env!("CARGO_PKG_VERSION"));
    info!("{} jobs of {:?} on {} threads", cli.jobs, sleep, threads);

    let pool = SharedQueueThreadPool::with_config(config)?;
    let (tx, rx) = channel::unbounded::<u32>();
    let start = Instant::now();

    for id in 0..cli.jobs {
        let tx = tx.clone();
        pool.spawn(move || {
            thread::sleep(sleep);
            tx.send(id).ok();
        })?;
    }
    drop(tx);

    pool.shutdown();
    let elapsed = start.elapsed();

    let completed = rx.iter().count();
    if completed < cli.jobs as usize {
        warn!("{} jobs never completed", cli.jobs as usize - completed);
    }

    println!(
        "completed {} jobs on {} threads in {} ms (serial estimate {} ms)",
        completed,
        threads,
        elapsed.as_millis(),
        sleep.as_millis() * u128::from(cli.jobs)
    );
    Ok(())
}
