//! Drain loop: the consumer side of a queue.
//!
//! Pops one item per tick until the queue is empty or shutdown is requested.
//! The queue itself never waits; all pacing lives here.

use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use opentelemetry::KeyValue;
use tokio::sync::Notify;
use tracing::{Instrument, info};

use crate::error::Result;
use crate::model::{Dequeued, Sequence};
use crate::queue::StablePriorityQueue;
use crate::ranking::Ranking;
use crate::telemetry::drain::{record_dequeue, record_drain_finished, start_drain_span};
use crate::telemetry::metrics;

/// Configuration for a [`Drainer`].
#[derive(Debug, Clone)]
pub struct DrainConfig {
    /// Pause before each pop. Zero drains back to back.
    pub interval: Duration,
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

#[derive(Default)]
struct ShutdownState {
    requested: AtomicBool,
    notify: Notify,
}

/// Handle that stops a running drain after its current tick.
///
/// A trigger only applies to the run in progress. Each [`Drainer::run`]
/// starts with the request cleared, so a trigger sent while no run is
/// active is dropped.
#[derive(Clone, Default)]
pub struct Shutdown(Arc<ShutdownState>);

impl Shutdown {
    pub fn trigger(&self) {
        self.0.requested.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    fn is_triggered(&self) -> bool {
        self.0.requested.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.requested.store(false, Ordering::SeqCst);
    }
}

/// Outcome of one [`Drainer::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainReport {
    pub drained: usize,
    pub remaining: usize,
    /// True when the run ended on a shutdown request rather than an empty queue.
    pub interrupted: bool,
}

/// Owns a queue and drains it on a fixed cadence.
pub struct Drainer<T, R: Ranking> {
    queue: StablePriorityQueue<T, R>,
    config: DrainConfig,
    shutdown: Shutdown,
}

impl<T, R> Drainer<T, R>
where
    R: Ranking,
    R::Tier: Display,
{
    pub fn new(queue: StablePriorityQueue<T, R>, config: DrainConfig) -> Self {
        Self {
            queue,
            config,
            shutdown: Shutdown::default(),
        }
    }

    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Admit an item, counting it in the `tierq.queue.pushed` metric.
    pub fn push(&mut self, payload: T, tier: R::Tier) -> Result<Sequence> {
        let label = tier.to_string();
        let sequence = self.queue.push(payload, tier)?;
        metrics::queue_pushed().add(1, &[KeyValue::new("tier", label)]);
        Ok(sequence)
    }

    pub fn queue(&self) -> &StablePriorityQueue<T, R> {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut StablePriorityQueue<T, R> {
        &mut self.queue
    }

    pub fn into_queue(self) -> StablePriorityQueue<T, R> {
        self.queue
    }

    /// Drain until empty or shut down, handing each item to `on_item`.
    pub async fn run<F>(&mut self, mut on_item: F) -> DrainReport
    where
        F: FnMut(Dequeued<T, R::Tier>),
    {
        let span = start_drain_span(self.queue.len());
        let started = Instant::now();
        let popped = metrics::queue_popped();
        self.shutdown.reset();

        let report = async {
            let mut drained = 0;
            let interrupted = loop {
                if self.queue.is_empty() {
                    break false;
                }

                // Register for wakeups before checking the flag so a trigger
                // landing in between is not lost.
                let notified = self.shutdown.0.notify.notified();
                tokio::pin!(notified);
                notified.as_mut().enable();

                let stop = self.shutdown.is_triggered()
                    || tokio::select! {
                        biased;
                        _ = &mut notified => true,
                        _ = tokio::time::sleep(self.config.interval) => false,
                    };
                if stop {
                    info!(remaining = self.queue.len(), "drain interrupted");
                    break true;
                }

                let Some(item) = self.queue.pop_entry() else {
                    break false;
                };
                let tier = item.tier.to_string();
                record_dequeue(&span, &tier, item.sequence.0);
                popped.add(1, &[KeyValue::new("tier", tier)]);
                drained += 1;
                on_item(item);
            };

            DrainReport {
                drained,
                remaining: self.queue.len(),
                interrupted,
            }
        }
        .instrument(span.clone())
        .await;

        record_drain_finished(&span, report.drained);
        metrics::drain_duration_ms().record(started.elapsed().as_secs_f64() * 1000.0, &[]);
        report
    }
}
