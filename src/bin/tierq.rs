//! tierq CLI: run the bundled scenarios or drain a batch file.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};
use opentelemetry::KeyValue;
use tierq::batch::Batch;
use tierq::config::Config;
use tierq::consumer::{DrainConfig, DrainReport, Drainer};
use tierq::lanes::LaneQueues;
use tierq::model::Tier;
use tierq::queue::StablePriorityQueue;
use tierq::ranking::{Ascending, Ranking, StandardTiers, TierOrder};
use tierq::telemetry::drain::{record_drain_finished, record_lane_dequeue, start_drain_span};
use tierq::telemetry::metrics;
use tierq::telemetry::{TelemetryConfig, init_telemetry};

/// Customers in arrival order, with their tier.
const TIERED_ARRIVALS: [(&str, Tier); 7] = [
    ("Lacey", Tier::Normal),
    ("Horsie", Tier::Platinum),
    ("Stacy", Tier::Gold),
    ("Kasie", Tier::Gold),
    ("Heysie", Tier::Platinum),
    ("Tracy", Tier::Normal),
    ("Chantasey", Tier::Platinum),
];

/// Same arrivals with plain numeric priorities, 1 most urgent.
const NUMERIC_ARRIVALS: [(&str, i32); 7] = [
    ("Lacey", 3),
    ("Horsie", 1),
    ("Stacy", 2),
    ("Kasie", 2),
    ("Heysie", 1),
    ("Tracy", 3),
    ("Chantasey", 1),
];

#[derive(Parser)]
#[command(name = "tierq", about = "Stable tiered priority queue")]
struct Cli {
    /// Pause between dequeues in milliseconds (overrides TIERQ_INTERVAL_MS)
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a built-in scenario
    Demo {
        #[arg(value_enum)]
        scenario: Scenario,
    },
    /// Load a TOML batch file and drain it
    Drain {
        /// Batch file with [[item]] entries
        file: PathBuf,
        /// Print one JSON object per dequeued item
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Scenario {
    /// Platinum, then Gold, then Normal; arrival order within a tier
    Tiers,
    /// Numeric priorities, lower first; arrival order within a priority
    Numeric,
    /// One FIFO lane per tier
    Lanes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "tierq".to_string(),
        default_filter: config.log_level.clone(),
    })?;

    let interval = cli
        .interval_ms
        .map(Duration::from_millis)
        .unwrap_or(config.drain_interval);

    match cli.command {
        Command::Demo { scenario } => cmd_demo(scenario, interval).await,
        Command::Drain { file, json } => cmd_drain(&file, json, interval).await,
    }
}

async fn cmd_demo(scenario: Scenario, interval: Duration) -> anyhow::Result<()> {
    match scenario {
        Scenario::Tiers => {
            let mut drainer = new_drainer(StandardTiers, interval);
            for (name, tier) in TIERED_ARRIVALS {
                drainer.push(name, tier)?;
            }
            drain(&mut drainer, |item| println!("{}: {}", item.tier, item.payload)).await;
        }
        Scenario::Numeric => {
            let mut drainer = new_drainer(Ascending::<i32>::new(), interval);
            for (name, priority) in NUMERIC_ARRIVALS {
                drainer.push(name, priority)?;
            }
            drain(&mut drainer, |item| println!("Dequeue: {}", item.payload)).await;
        }
        Scenario::Lanes => {
            let mut lanes = LaneQueues::new(TierOrder::new(Tier::BY_URGENCY));
            for (name, tier) in TIERED_ARRIVALS {
                lanes.push(name, tier);
            }
            drain_lanes(&mut lanes, interval).await;
        }
    }
    Ok(())
}

async fn cmd_drain(file: &Path, json: bool, interval: Duration) -> anyhow::Result<()> {
    let batch = Batch::load(file)?;
    if batch.is_empty() {
        println!("No items in {}.", file.display());
        return Ok(());
    }

    let mut queue = StablePriorityQueue::with_capacity(StandardTiers, batch.len());
    batch.enqueue_into(&mut queue)?;
    let mut drainer = Drainer::new(queue, DrainConfig { interval });

    let mut write_error = None;
    let report = drain(&mut drainer, |item| {
        if json {
            match serde_json::to_string(&item) {
                Ok(line) => println!("{line}"),
                Err(e) => write_error = Some(e),
            }
        } else {
            println!("{}: {} ({})", item.tier, item.payload, item.sequence);
        }
    })
    .await;

    if let Some(e) = write_error {
        return Err(e.into());
    }
    if !json {
        println!("\n{} item(s) drained", report.drained);
    }
    Ok(())
}

fn new_drainer<T, R>(ranking: R, interval: Duration) -> Drainer<T, R>
where
    R: Ranking,
    R::Tier: std::fmt::Display,
{
    Drainer::new(StablePriorityQueue::new(ranking), DrainConfig { interval })
}

/// Run `drainer` to completion, stopping early on Ctrl-C.
async fn drain<T, R, F>(drainer: &mut Drainer<T, R>, on_item: F) -> DrainReport
where
    R: Ranking,
    R::Tier: std::fmt::Display,
    F: FnMut(tierq::model::Dequeued<T, R::Tier>),
{
    let shutdown = drainer.shutdown_handle();
    let ctrl_c = tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        shutdown.trigger();
    });

    let report = drainer.run(on_item).await;
    ctrl_c.abort();

    if report.interrupted {
        eprintln!("interrupted with {} item(s) still queued", report.remaining);
    }
    report
}

/// Pop `lanes` on the same cadence as [`drain`], stopping early on Ctrl-C.
async fn drain_lanes(lanes: &mut LaneQueues<&str, Tier>, interval: Duration) {
    let span = start_drain_span(lanes.len());
    let started = Instant::now();
    let popped = metrics::queue_popped();
    let mut drained = 0;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while !lanes.is_empty() {
        tokio::select! {
            biased;
            _ = &mut ctrl_c => {
                eprintln!("interrupted with {} item(s) still queued", lanes.len());
                break;
            }
            _ = tokio::time::sleep(interval) => {}
        }
        let Some((tier, name)) = lanes.pop() else {
            break;
        };
        let label = tier.to_string();
        record_lane_dequeue(&span, &label);
        popped.add(1, &[KeyValue::new("tier", label)]);
        drained += 1;
        println!("{tier}: {name}");
    }

    record_drain_finished(&span, drained);
    metrics::drain_duration_ms().record(started.elapsed().as_secs_f64() * 1000.0, &[]);
}
