use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courier_core::{CourierConfig, Dispatcher, DispatcherBuilder, Stats};

/// Used when `RUST_LOG` is unset. The binary's own target is `courier`.
const DEFAULT_LOG_FILTER: &str = "courier_core=info,courier=info";

/// Submit one task per stdin line and run them on a bounded worker pool.
///
/// Each non-empty line is parsed as JSON; anything else is submitted as a JSON
/// string. On EOF or Ctrl-C the queue is drained and final stats are printed
/// to stdout.
#[derive(Debug, Parser)]
#[command(name = "courier", version)]
struct Args {
    /// Number of workers [env: COURIER_WORKERS, default 3]
    #[arg(long)]
    workers: Option<usize>,

    /// Queue capacity [env: COURIER_QUEUE_CAPACITY, default 10]
    #[arg(long)]
    queue_capacity: Option<usize>,

    /// Simulated work per task in milliseconds [env: COURIER_WORK_MS, default 3000]
    #[arg(long)]
    work_ms: Option<u64>,

    /// Status log interval in seconds, 0 to disable [env: COURIER_MONITOR_SECS, default 5]
    #[arg(long)]
    monitor_secs: Option<u64>,
}

impl Args {
    /// Flags win over the environment.
    fn apply(&self, mut config: CourierConfig) -> CourierConfig {
        if let Some(workers) = self.workers {
            config.worker_count = workers;
        }
        if let Some(capacity) = self.queue_capacity {
            config.queue_capacity = capacity;
        }
        if let Some(ms) = self.work_ms {
            config.work_duration = Duration::from_millis(ms);
        }
        if let Some(secs) = self.monitor_secs {
            config.monitor_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }
        config
    }
}

fn parse_payload(line: &str) -> serde_json::Value {
    serde_json::from_str(line).unwrap_or_else(|_| serde_json::Value::String(line.to_string()))
}

/// Submit every line of `input` until EOF or until `shutdown` resolves.
///
/// `shutdown` is checked before each line, so buffered input cannot starve it.
/// A submit already waiting on a full queue is not interrupted: the task is
/// registered by then and must reach the queue to be drained.
async fn intake<R, F>(dispatcher: &Dispatcher, input: R, shutdown: F) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut lines = input.lines();
    tokio::pin!(shutdown);

    let mut submitted = 0;
    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                tracing::info!("interrupt received, no longer accepting tasks");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let id = dispatcher
                    .submit(parse_payload(line))
                    .await
                    .context("failed to submit task")?;
                submitted += 1;
                tracing::info!(task_id = %id, "task accepted");
            }
        }
    }
    Ok(submitted)
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves and
/// intake runs until EOF.
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = args.apply(CourierConfig::from_env());
    tracing::info!(
        workers = config.worker_count,
        queue_capacity = config.queue_capacity,
        work_ms = config.work_duration.as_millis() as u64,
        "starting courier"
    );

    let dispatcher = DispatcherBuilder::new()
        .config(config)
        .build()
        .context("failed to start dispatcher")?;

    // Shut down even if intake failed, so queued work is not abandoned.
    let stdin = BufReader::new(tokio::io::stdin());
    let intake_result = intake(&dispatcher, stdin, interrupted()).await;
    let counts = dispatcher.shutdown().await;

    let submitted = intake_result?;
    tracing::info!(submitted, "all tasks drained");
    println!(
        "{}",
        serde_json::to_string(&Stats::from(counts)).context("failed to encode stats")?
    );
    Ok(())
}
