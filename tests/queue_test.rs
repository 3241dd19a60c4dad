//! Integration tests for the stable priority queue.

use tierq::lanes::LaneQueues;
use tierq::model::{Sequence, Tier};
use tierq::queue::StablePriorityQueue;
use tierq::ranking::{Ascending, Rank, StandardTiers, TierOrder, rank_fn};

const ARRIVALS: [(&str, Tier); 7] = [
    ("Lacey", Tier::Normal),
    ("Horsie", Tier::Platinum),
    ("Stacy", Tier::Gold),
    ("Kasie", Tier::Gold),
    ("Heysie", Tier::Platinum),
    ("Tracy", Tier::Normal),
    ("Chantasey", Tier::Platinum),
];

const EXPECTED: [&str; 7] = [
    "Horsie",
    "Heysie",
    "Chantasey",
    "Stacy",
    "Kasie",
    "Lacey",
    "Tracy",
];

fn drain_payloads<T, R: tierq::ranking::Ranking>(q: &mut StablePriorityQueue<T, R>) -> Vec<T> {
    q.drain_ordered().map(|d| d.payload).collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn tiered_customers_are_served_platinum_gold_normal_in_arrival_order() {
    let mut q = StablePriorityQueue::new(StandardTiers);
    for (name, tier) in ARRIVALS {
        q.push(name, tier).unwrap();
    }

    assert_eq!(drain_payloads(&mut q), EXPECTED);
}

#[test]
fn numeric_priorities_are_stable_within_each_value() {
    let mut q = StablePriorityQueue::new(Ascending::<u32>::new());
    for (name, priority) in [
        ("Lacey", 3),
        ("Horsie", 1),
        ("Stacy", 2),
        ("Kasie", 2),
        ("Heysie", 1),
        ("Tracy", 3),
        ("Chantasey", 1),
    ] {
        q.push(name, priority).unwrap();
    }

    assert_eq!(drain_payloads(&mut q), EXPECTED);
}

#[test]
fn signed_priorities_serve_negatives_first_and_stay_stable() {
    let mut q = StablePriorityQueue::new(Ascending::<i32>::new());
    for (name, priority) in [
        ("Lacey", 3),
        ("Horsie", -1),
        ("Stacy", 0),
        ("Kasie", 0),
        ("Heysie", -1),
        ("Tracy", 3),
        ("Chantasey", -1),
    ] {
        q.push(name, priority).unwrap();
    }

    assert!(format!("{q:?}").contains("Ascending"));
    assert_eq!(drain_payloads(&mut q), EXPECTED);
}

#[test]
fn explicit_tier_order_matches_standard_tiers() {
    let mut q = StablePriorityQueue::new(TierOrder::new(Tier::BY_URGENCY));
    for (name, tier) in ARRIVALS {
        q.push(name, tier).unwrap();
    }

    assert_eq!(drain_payloads(&mut q), EXPECTED);
}

#[test]
fn reversed_tier_order_serves_normal_first() {
    let mut q = StablePriorityQueue::new(TierOrder::new([
        Tier::Normal,
        Tier::Gold,
        Tier::Platinum,
    ]));
    for (name, tier) in ARRIVALS {
        q.push(name, tier).unwrap();
    }

    assert_eq!(
        drain_payloads(&mut q),
        ["Lacey", "Tracy", "Stacy", "Kasie", "Horsie", "Heysie", "Chantasey"]
    );
}

#[test]
fn lane_queues_agree_with_the_heap() {
    let mut lanes = LaneQueues::new(TierOrder::new(Tier::BY_URGENCY));
    for (name, tier) in ARRIVALS {
        lanes.push(name, tier);
    }

    let out: Vec<_> = std::iter::from_fn(|| lanes.pop()).map(|(_, n)| n).collect();
    assert_eq!(out, EXPECTED);
}

// ---------------------------------------------------------------------------
// Observers and emptiness
// ---------------------------------------------------------------------------

#[test]
fn pop_on_empty_is_none_every_time() {
    let mut q: StablePriorityQueue<&str, _> = StablePriorityQueue::new(StandardTiers);
    for _ in 0..3 {
        assert_eq!(q.pop(), None);
        assert_eq!(q.peek(), None);
        assert!(q.pop_entry().is_none());
        assert_eq!(q.len(), 0);
        assert!(q.is_empty());
    }

    // Emptiness did not consume sequence numbers.
    assert_eq!(q.push("first", Tier::Gold).unwrap(), Sequence(0));
}

#[test]
fn peek_matches_next_pop_without_removing() {
    let mut q = StablePriorityQueue::new(StandardTiers);
    q.push("normal", Tier::Normal).unwrap();
    q.push("gold", Tier::Gold).unwrap();

    assert_eq!(q.peek(), Some(&"gold"));
    assert_eq!(q.peek_entry(), Some((&"gold", &Tier::Gold)));
    assert_eq!(q.len(), 2);
    assert_eq!(q.pop(), Some("gold"));
    assert_eq!(q.peek(), Some(&"normal"));
}

#[test]
fn len_tracks_pushes_minus_pops() {
    let mut q = StablePriorityQueue::new(StandardTiers);
    for i in 0..10 {
        q.push(i, Tier::BY_URGENCY[i % 3]).unwrap();
    }
    for _ in 0..4 {
        q.pop();
    }
    assert_eq!(q.len(), 6);
}

#[test]
fn pop_entry_reports_tier_and_admission_sequence() {
    let mut q = StablePriorityQueue::new(StandardTiers);
    q.push("late", Tier::Normal).unwrap();
    q.push("urgent", Tier::Platinum).unwrap();

    let first = q.pop_entry().unwrap();
    assert_eq!(first.payload, "urgent");
    assert_eq!(first.tier, Tier::Platinum);
    assert_eq!(first.sequence, Sequence(1));
}

// ---------------------------------------------------------------------------
// Interleaving
// ---------------------------------------------------------------------------

#[test]
fn fifo_within_tier_survives_interleaved_pops() {
    let mut q = StablePriorityQueue::new(StandardTiers);
    q.push("g1", Tier::Gold).unwrap();
    q.push("p1", Tier::Platinum).unwrap();
    assert_eq!(q.pop(), Some("p1"));

    q.push("g2", Tier::Gold).unwrap();
    q.push("p2", Tier::Platinum).unwrap();
    q.push("g3", Tier::Gold).unwrap();

    assert_eq!(drain_payloads(&mut q), ["p2", "g1", "g2", "g3"]);
}

#[test]
fn dropping_drain_early_keeps_the_rest_queued() {
    let mut q = StablePriorityQueue::new(StandardTiers);
    for (name, tier) in ARRIVALS {
        q.push(name, tier).unwrap();
    }

    let first_two: Vec<_> = q.drain_ordered().take(2).map(|d| d.payload).collect();
    assert_eq!(first_two, ["Horsie", "Heysie"]);
    assert_eq!(q.len(), 5);
    assert_eq!(q.peek(), Some(&"Chantasey"));
}

#[test]
fn closure_ranking_orders_by_returned_rank() {
    // Shorter labels are more urgent.
    let mut q = StablePriorityQueue::new(rank_fn(|label: &String| label.len() as Rank));
    q.push(1, "ccc".to_string()).unwrap();
    q.push(2, "a".to_string()).unwrap();
    q.push(3, "bb".to_string()).unwrap();
    q.push(4, "z".to_string()).unwrap();

    assert_eq!(drain_payloads(&mut q), [2, 4, 3, 1]);
}
