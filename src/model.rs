//! Core data model.
//!
//! A queued item is a caller payload plus the tier it was admitted under and
//! the sequence number the queue stamped on it at admission.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// Customer tier. Declared from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Normal,
    Gold,
    Platinum,
}

impl Tier {
    /// All tiers, most urgent first. [`StandardTiers`](crate::ranking::StandardTiers) ranks by position here.
    pub const BY_URGENCY: [Tier; 3] = [Tier::Platinum, Tier::Gold, Tier::Normal];
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tier::Normal => "Normal",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Sequence
// ---------------------------------------------------------------------------

/// Admission order within one queue. Meaningless across queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Sequence(pub u64);

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Dequeued
// ---------------------------------------------------------------------------

/// An item removed from the queue, with the bookkeeping it was stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dequeued<T, K> {
    pub payload: T,
    pub tier: K,
    pub sequence: Sequence,
}
