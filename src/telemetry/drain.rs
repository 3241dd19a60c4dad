//! Span helpers for a drain run.

use tracing::Span;

/// Start a span covering one drain of a queue holding `queued` items.
///
/// `drain.count` is filled in by [`record_drain_finished`].
pub fn start_drain_span(queued: usize) -> Span {
    tracing::info_span!(
        "queue.drain",
        "drain.queued" = queued,
        "drain.count" = tracing::field::Empty,
    )
}

/// Emit a `dequeue` event inside `span`.
pub fn record_dequeue(span: &Span, tier: &str, sequence: u64) {
    span.in_scope(|| {
        tracing::info!(tier = tier, sequence = sequence, "dequeue");
    });
}

/// Emit a `dequeue` event for a lane pop, which carries no sequence number.
pub fn record_lane_dequeue(span: &Span, tier: &str) {
    span.in_scope(|| {
        tracing::info!(tier = tier, "dequeue");
    });
}

pub fn record_drain_finished(span: &Span, drained: usize) {
    span.record("drain.count", drained);
}
