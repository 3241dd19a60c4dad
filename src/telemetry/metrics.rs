//! Metric instrument factories.
//!
//! Instruments come from the global `"tierq"` meter, which is a no-op until
//! [`init_telemetry`](super::init_telemetry) registers an OTLP provider.

use opentelemetry::metrics::{Counter, Histogram, Meter};

fn meter() -> Meter {
    opentelemetry::global::meter("tierq")
}

/// Counter: items admitted to a queue.
/// Labels: `tier`.
pub fn queue_pushed() -> Counter<u64> {
    meter()
        .u64_counter("tierq.queue.pushed")
        .with_description("Number of items admitted to a queue")
        .build()
}

/// Counter: items removed from a queue.
/// Labels: `tier`.
pub fn queue_popped() -> Counter<u64> {
    meter()
        .u64_counter("tierq.queue.popped")
        .with_description("Number of items removed from a queue")
        .build()
}

/// Histogram: wall time of a full drain run.
pub fn drain_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("tierq.drain.duration_ms")
        .with_description("Drain run duration in milliseconds")
        .with_unit("ms")
        .build()
}
