//! # tierq
//!
//! Stable priority queue: items are served by tier, and in admission order
//! within a tier.
//!
//! ```
//! use tierq::model::Tier;
//! use tierq::queue::StablePriorityQueue;
//! use tierq::ranking::StandardTiers;
//!
//! let mut q = StablePriorityQueue::new(StandardTiers);
//! q.push("Lacey", Tier::Normal)?;
//! q.push("Horsie", Tier::Platinum)?;
//! q.push("Heysie", Tier::Platinum)?;
//!
//! assert_eq!(q.pop(), Some("Horsie"));
//! assert_eq!(q.pop(), Some("Heysie"));
//! assert_eq!(q.pop(), Some("Lacey"));
//! assert_eq!(q.pop(), None);
//! # Ok::<(), tierq::error::Error>(())
//! ```

pub mod batch;
pub mod config;
pub mod consumer;
pub mod error;
pub mod lanes;
pub mod model;
pub mod queue;
pub mod ranking;
pub mod telemetry;
