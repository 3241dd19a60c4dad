//! One FIFO lane per tier, polled most urgent lane first.
//!
//! Equivalent in output to [`StablePriorityQueue`](crate::queue::StablePriorityQueue)
//! for a fixed tier list, without a heap or sequence numbers. Useful as a
//! reference implementation when checking the heap's ordering.

use std::collections::VecDeque;

use crate::ranking::{Ranking, TierOrder};

pub struct LaneQueues<T, K> {
    order: TierOrder<K>,
    /// `lanes[rank]`; the final lane holds tiers missing from `order`.
    lanes: Vec<VecDeque<(K, T)>>,
}

impl<T, K: PartialEq> LaneQueues<T, K> {
    pub fn new(order: TierOrder<K>) -> Self {
        let lanes = (0..=order.tiers().len()).map(|_| VecDeque::new()).collect();
        Self { order, lanes }
    }

    pub fn push(&mut self, payload: T, tier: K) {
        let lane = self.order.rank(&tier) as usize;
        self.lanes[lane].push_back((tier, payload));
    }

    /// Front of the most urgent non-empty lane.
    pub fn pop(&mut self) -> Option<(K, T)> {
        self.lanes.iter_mut().find_map(VecDeque::pop_front)
    }

    pub fn len(&self) -> usize {
        self.lanes.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(VecDeque::is_empty)
    }
}
