//! Stable priority queue.
//!
//! Entries are ordered by a single composite key `(rank, sequence)`, compared
//! ascending on both parts. The rank comes from the queue's [`Ranking`]; the
//! sequence is a per-queue admission counter, so equal-rank entries leave in
//! the order they arrived.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::trace;

use crate::error::{Error, Result};
use crate::model::{Dequeued, Sequence};
use crate::ranking::{Rank, Ranking};

/// Composite ordering key. Lexicographic on `(rank, sequence)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Key {
    rank: Rank,
    sequence: Sequence,
}

#[derive(Debug)]
struct Entry<T, K> {
    key: Key,
    tier: K,
    payload: T,
}

// Sequences are unique per queue, so the key alone is a total order.
impl<T, K> PartialEq for Entry<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T, K> Eq for Entry<T, K> {}

impl<T, K> PartialOrd for Entry<T, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, K> Ord for Entry<T, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// A priority queue that is FIFO among entries of equal tier.
///
/// `BinaryHeap` is a max-heap; entries are wrapped in [`Reverse`] so the
/// smallest key sits at the top.
pub struct StablePriorityQueue<T, R: Ranking> {
    heap: BinaryHeap<Reverse<Entry<T, R::Tier>>>,
    ranking: R,
    next_sequence: u64,
}

impl<T, R: Ranking> StablePriorityQueue<T, R> {
    /// Create an empty queue served in the order `ranking` defines.
    pub fn new(ranking: R) -> Self {
        Self::with_capacity(ranking, 0)
    }

    pub fn with_capacity(ranking: R, capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            ranking,
            next_sequence: 0,
        }
    }

    /// Admit `payload` under `tier` and return the sequence it was stamped with.
    ///
    /// Fails only once the sequence counter is exhausted; the queue is left
    /// untouched in that case.
    pub fn push(&mut self, payload: T, tier: R::Tier) -> Result<Sequence> {
        let issued = self.next_sequence;
        self.next_sequence = issued
            .checked_add(1)
            .ok_or(Error::SequenceExhausted { issued })?;

        let key = Key {
            rank: self.ranking.rank(&tier),
            sequence: Sequence(issued),
        };
        trace!(rank = key.rank, sequence = issued, "push");
        self.heap.push(Reverse(Entry { key, tier, payload }));
        Ok(key.sequence)
    }

    /// Remove the most urgent payload, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        self.pop_entry().map(|d| d.payload)
    }

    /// Like [`pop`](Self::pop), keeping the tier and sequence.
    pub fn pop_entry(&mut self) -> Option<Dequeued<T, R::Tier>> {
        let Reverse(entry) = self.heap.pop()?;
        trace!(
            rank = entry.key.rank,
            sequence = entry.key.sequence.0,
            "pop"
        );
        Some(Dequeued {
            payload: entry.payload,
            tier: entry.tier,
            sequence: entry.key.sequence,
        })
    }

    /// The payload `pop` would return next.
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|Reverse(e)| &e.payload)
    }

    /// The payload and tier `pop` would return next.
    pub fn peek_entry(&self) -> Option<(&T, &R::Tier)> {
        self.heap.peek().map(|Reverse(e)| (&e.payload, &e.tier))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry. Sequence numbers already issued stay consumed.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn ranking(&self) -> &R {
        &self.ranking
    }

    /// Pop entries in service order until the queue is empty.
    ///
    /// Entries not consumed when the iterator is dropped stay queued.
    pub fn drain_ordered(&mut self) -> DrainOrdered<'_, T, R> {
        DrainOrdered { queue: self }
    }
}

impl<T, R> std::fmt::Debug for StablePriorityQueue<T, R>
where
    R: Ranking + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StablePriorityQueue")
            .field("len", &self.heap.len())
            .field("ranking", &self.ranking)
            .field("next_sequence", &self.next_sequence)
            .finish()
    }
}

impl<T, R: Ranking + Default> Default for StablePriorityQueue<T, R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

/// Iterator returned by [`StablePriorityQueue::drain_ordered`].
pub struct DrainOrdered<'a, T, R: Ranking> {
    queue: &'a mut StablePriorityQueue<T, R>,
}

impl<T, R: Ranking> Iterator for DrainOrdered<'_, T, R> {
    type Item = Dequeued<T, R::Tier>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.queue.len();
        (n, Some(n))
    }
}

impl<T, R: Ranking> ExactSizeIterator for DrainOrdered<'_, T, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tier;
    use crate::ranking::StandardTiers;

    #[test]
    fn sequences_start_at_zero_and_increase() {
        let mut q = StablePriorityQueue::new(StandardTiers);
        assert_eq!(q.push("a", Tier::Normal).unwrap(), Sequence(0));
        assert_eq!(q.push("b", Tier::Platinum).unwrap(), Sequence(1));
        assert_eq!(q.push("c", Tier::Normal).unwrap(), Sequence(2));
    }

    #[test]
    fn exhausted_counter_rejects_push_and_leaves_queue_intact() {
        let mut q = StablePriorityQueue::new(StandardTiers);
        q.push("kept", Tier::Gold).unwrap();
        q.next_sequence = u64::MAX;

        let err = q.push("rejected", Tier::Platinum).unwrap_err();
        assert!(matches!(err, Error::SequenceExhausted { issued: u64::MAX }));
        assert_eq!(q.len(), 1);
        assert_eq!(q.peek(), Some(&"kept"));

        // Still rejected on retry; the counter never wraps.
        assert!(q.push("again", Tier::Normal).is_err());
        assert_eq!(q.next_sequence, u64::MAX);
    }

    #[test]
    fn last_sequence_before_exhaustion_is_issued() {
        let mut q = StablePriorityQueue::new(StandardTiers);
        q.next_sequence = u64::MAX - 1;
        assert_eq!(
            q.push("last", Tier::Normal).unwrap(),
            Sequence(u64::MAX - 1)
        );
        assert!(q.push("over", Tier::Normal).is_err());
    }

    #[test]
    fn clear_keeps_sequence_counter() {
        let mut q = StablePriorityQueue::new(StandardTiers);
        q.push(1, Tier::Gold).unwrap();
        q.push(2, Tier::Gold).unwrap();
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.push(3, Tier::Gold).unwrap(), Sequence(2));
    }

    #[test]
    fn key_orders_rank_before_sequence() {
        let early_low = Key {
            rank: 2,
            sequence: Sequence(0),
        };
        let late_high = Key {
            rank: 0,
            sequence: Sequence(9),
        };
        let later_same = Key {
            rank: 2,
            sequence: Sequence(1),
        };
        assert!(late_high < early_low);
        assert!(early_low < later_same);
    }
}
