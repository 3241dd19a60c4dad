//! Tier orderings.
//!
//! A [`Ranking`] maps a tier to a rank where a lower rank is served first.
//! The queue only ever compares ranks, so every ordering below reduces to
//! the same ascending integer comparison.

use std::marker::PhantomData;

use crate::model::Tier;

/// Position in the service order. `0` is the most urgent.
pub type Rank = u64;

/// Maps tiers onto ranks. Must be a pure function of the tier for the
/// lifetime of a queue, or entries already in the heap will be misplaced.
pub trait Ranking {
    type Tier;

    fn rank(&self, tier: &Self::Tier) -> Rank;
}

// ---------------------------------------------------------------------------
// Standard tiers
// ---------------------------------------------------------------------------

/// Platinum before Gold before Normal.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTiers;

impl Ranking for StandardTiers {
    type Tier = Tier;

    fn rank(&self, tier: &Tier) -> Rank {
        let position = Tier::BY_URGENCY
            .iter()
            .position(|t| t == tier)
            .unwrap_or(Tier::BY_URGENCY.len());
        position as Rank
    }
}

// ---------------------------------------------------------------------------
// Ordered list
// ---------------------------------------------------------------------------

/// Ranking taken from an explicit list, most urgent first.
///
/// Tiers missing from the list share the rank just past the last listed
/// tier, so they are served after everything listed and FIFO among
/// themselves. If a tier is listed twice its first position wins.
#[derive(Debug, Clone)]
pub struct TierOrder<K> {
    order: Vec<K>,
}

impl<K: PartialEq> TierOrder<K> {
    pub fn new(order: impl IntoIterator<Item = K>) -> Self {
        Self {
            order: order.into_iter().collect(),
        }
    }

    pub fn tiers(&self) -> &[K] {
        &self.order
    }
}

impl<K: PartialEq> Ranking for TierOrder<K> {
    type Tier = K;

    fn rank(&self, tier: &K) -> Rank {
        let position = self
            .order
            .iter()
            .position(|t| t == tier)
            .unwrap_or(self.order.len());
        position as Rank
    }
}

// ---------------------------------------------------------------------------
// Closures
// ---------------------------------------------------------------------------

/// Ranking backed by a function. Build with [`rank_fn`].
pub struct RankFn<K, F> {
    f: F,
    _tier: PhantomData<fn(&K)>,
}

/// Wrap a closure as a [`Ranking`].
pub fn rank_fn<K, F>(f: F) -> RankFn<K, F>
where
    F: Fn(&K) -> Rank,
{
    RankFn {
        f,
        _tier: PhantomData,
    }
}

impl<K, F> Ranking for RankFn<K, F>
where
    F: Fn(&K) -> Rank,
{
    type Tier = K;

    fn rank(&self, tier: &K) -> Rank {
        (self.f)(tier)
    }
}

// ---------------------------------------------------------------------------
// Numeric priorities
// ---------------------------------------------------------------------------

/// Integer priority types usable with [`Ascending`].
pub trait NumericPriority: Copy {
    /// Map onto a rank, preserving numeric order.
    fn to_rank(self) -> Rank;
}

macro_rules! unsigned_priority {
    ($($t:ty),*) => {$(
        impl NumericPriority for $t {
            fn to_rank(self) -> Rank {
                self as Rank
            }
        }
    )*};
}

// Flipping the sign bit maps i64::MIN..=i64::MAX onto 0..=u64::MAX in order.
macro_rules! signed_priority {
    ($($t:ty),*) => {$(
        impl NumericPriority for $t {
            fn to_rank(self) -> Rank {
                (self as i64 as Rank) ^ (1 << 63)
            }
        }
    )*};
}

unsigned_priority!(u8, u16, u32, u64);
signed_priority!(i8, i16, i32, i64);

/// Plain numeric priority: numerically lower is served first.
pub struct Ascending<K> {
    _tier: PhantomData<fn(&K)>,
}

impl<K> std::fmt::Debug for Ascending<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Ascending")
    }
}

impl<K> Clone for Ascending<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Ascending<K> {}

impl<K> Ascending<K> {
    pub fn new() -> Self {
        Self { _tier: PhantomData }
    }
}

impl<K> Default for Ascending<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NumericPriority> Ranking for Ascending<K> {
    type Tier = K;

    fn rank(&self, tier: &K) -> Rank {
        tier.to_rank()
    }
}
