//! Correctness Tests for the LFU Cache
//!
//! This module validates the eviction policy using simple, predictable access
//! patterns and then cross-checks long random operation sequences against a
//! deliberately naive reference model.
//!
//! ## Test Strategy
//! - Small cache sizes (2-5 entries) for predictable behavior
//! - Explicit checks for which key was evicted after each put
//! - `check_invariants` after every mutating operation
//! - A linear-scan reference model that is obviously correct but slow,
//!   driven by `proptest` operation sequences

use lfu_ledger::config::LfuCacheConfig;
use lfu_ledger::LfuCache;
use proptest::prelude::*;
use std::collections::HashMap;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Helper to create an LfuCache with the given capacity
fn make_lfu<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LfuCache<K, V> {
    let config = LfuCacheConfig { capacity: cap };
    LfuCache::init(config, None)
}

fn assert_consistent<K: std::hash::Hash + Eq + Clone, V>(cache: &LfuCache<K, V>) {
    if let Err(err) = cache.check_invariants() {
        panic!("invariant violated: {err}");
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_lfu_evicts_least_frequent() {
    let mut cache = make_lfu(2);

    cache.put(1, 1);
    cache.put(2, 2);
    assert_eq!(cache.get(&1), Some(&1));

    assert_eq!(cache.push(3, 3), Some((2, 2)), "key 2 has the lowest frequency");
    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.get(&3), Some(&3));
    assert_consistent(&cache);
}

#[test]
fn test_lfu_update_replaces_value() {
    let mut cache = make_lfu(2);

    cache.put(1, 1);
    cache.put(1, 2);
    assert_eq!(cache.get(&1), Some(&2));
    assert_eq!(cache.len(), 1);
    assert_consistent(&cache);
}

#[test]
fn test_lfu_zero_capacity_never_stores() {
    let mut cache = make_lfu(0);

    cache.put(0, 0);
    assert_eq!(cache.get(&0), None);
    assert!(cache.is_empty());
    assert_consistent(&cache);
}

#[test]
fn test_lfu_tie_broken_by_insertion_order() {
    let mut cache = make_lfu(2);

    cache.put(1, 1);
    cache.put(2, 2);
    assert_eq!(cache.push(3, 3), Some((1, 1)), "oldest of the frequency-1 tier");

    assert_eq!(cache.get(&2), Some(&2));
    assert_eq!(cache.get(&1), None);
    assert_consistent(&cache);
}

#[test]
fn test_lfu_tie_broken_by_last_touch() {
    let mut cache = make_lfu(3);

    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);

    // All reach frequency 2; "b" is touched first.
    cache.get(&"b");
    cache.get(&"a");
    cache.get(&"c");

    assert_eq!(cache.push("d", 4), Some(("b", 2)));
    assert_eq!(cache.pop(), Some(("d", 4)));
    assert_eq!(cache.pop(), Some(("a", 1)));
    assert_consistent(&cache);
}

#[test]
fn test_lfu_tie_broken_by_update_touch() {
    let mut cache = make_lfu(2);

    cache.put("a", 1);
    cache.put("b", 2);
    cache.get(&"a");
    // "b" reaches frequency 2 through an update, after "a" did through a get.
    cache.put("b", 20);

    assert_eq!(cache.push("c", 3), Some(("a", 1)));
    assert_consistent(&cache);
}

#[test]
fn test_lfu_new_entry_is_evicted_before_established_ones() {
    let mut cache = make_lfu(3);

    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);
    for key in ["a", "b", "c"] {
        cache.get(&key);
    }

    cache.put("d", 4); // evicts "a": all at 2, "a" touched first
    assert!(!cache.contains_key(&"a"));

    // "d" sits alone at frequency 1 and goes next.
    assert_eq!(cache.push("e", 5), Some(("d", 4)));
    assert_eq!(cache.min_frequency(), Some(1));
    assert_consistent(&cache);
}

#[test]
fn test_lfu_eviction_sequence() {
    let mut cache = make_lfu(3);

    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);

    // Frequencies: a=4, b=3, c=2
    for _ in 0..3 {
        cache.get(&"a");
    }
    for _ in 0..2 {
        cache.get(&"b");
    }
    cache.get(&"c");

    assert_eq!(cache.push("d", 4), Some(("c", 3)));
    // "d" at 1 is now the minimum
    assert_eq!(cache.push("e", 5), Some(("d", 4)));
    cache.get(&"e");
    cache.get(&"e");
    // e=3 was touched after b=3
    assert_eq!(cache.push("f", 6), Some(("b", 2)));
    assert_consistent(&cache);
}

#[test]
fn test_lfu_update_on_full_cache_does_not_evict() {
    let mut cache = make_lfu(3);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(3, 3);

    for round in 0..10 {
        assert_eq!(cache.put(2, round), Some(if round == 0 { 2 } else { round - 1 }));
        assert_eq!(cache.len(), 3);
    }
    assert_eq!(cache.frequency(&2), Some(11));
    assert_consistent(&cache);
}

#[test]
fn test_lfu_get_miss_has_no_side_effect() {
    let mut cache = make_lfu(2);
    cache.put(1, 1);
    cache.put(2, 2);

    assert_eq!(cache.get(&99), None);
    assert_eq!(cache.frequency(&1), Some(1));
    assert_eq!(cache.frequency(&2), Some(1));
    assert_eq!(cache.push(3, 3), Some((1, 1)));
}

#[test]
fn test_lfu_remove_min_tier_advances_minimum() {
    let mut cache = make_lfu(4);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.get(&"b");
    cache.get(&"b");
    cache.put("c", 3);
    cache.get(&"c");

    // tiers: 1 -> [a], 2 -> [c], 3 -> [b]
    assert_eq!(cache.min_frequency(), Some(1));
    cache.remove(&"a");
    assert_eq!(cache.min_frequency(), Some(2));
    cache.remove(&"c");
    assert_eq!(cache.min_frequency(), Some(3));
    cache.remove(&"b");
    assert_eq!(cache.min_frequency(), None);
    assert_consistent(&cache);
}

#[test]
fn test_lfu_frequency_is_monotonic() {
    let mut cache = make_lfu(2);
    cache.put("k", 0);

    let mut last = cache.frequency(&"k").unwrap();
    for i in 0..50 {
        if i % 2 == 0 {
            cache.get(&"k");
        } else {
            cache.put("k", i);
        }
        let now = cache.frequency(&"k").unwrap();
        assert_eq!(now, last + 1);
        last = now;
    }
}

#[test]
fn test_lfu_repeated_gets_are_idempotent() {
    let mut cache = make_lfu(2);
    cache.put("k", String::from("v"));

    for _ in 0..5 {
        assert_eq!(cache.get(&"k").map(String::as_str), Some("v"));
    }
}

#[test]
fn test_lfu_try_new_rejects_negative() {
    let err = LfuCache::<u32, u32>::try_new(-7i32).unwrap_err();
    assert!(err.to_string().contains("-7"));

    let cache = LfuCache::<u32, u32>::try_new(7i32).unwrap();
    assert_eq!(cache.cap(), 7);
}

// ============================================================================
// REFERENCE MODEL CHECK
// ============================================================================

/// Obviously-correct LFU: every entry remembers its frequency and the tick
/// of its last touch; eviction scans for the smallest `(frequency, tick)`.
struct ReferenceLfu {
    capacity: usize,
    tick: u64,
    entries: HashMap<u32, (u32, u64, u64)>,
}

impl ReferenceLfu {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tick: 0,
            entries: HashMap::new(),
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn victim(&self) -> Option<u32> {
        self.entries
            .iter()
            .min_by_key(|&(_, &(_, frequency, tick))| (frequency, tick))
            .map(|(&key, _)| key)
    }

    fn get(&mut self, key: u32) -> Option<u32> {
        let tick = self.next_tick();
        let entry = self.entries.get_mut(&key)?;
        entry.1 += 1;
        entry.2 = tick;
        Some(entry.0)
    }

    fn put(&mut self, key: u32, value: u32) -> Option<(u32, u32)> {
        if self.capacity == 0 {
            return Some((key, value));
        }
        let tick = self.next_tick();
        if let Some(entry) = self.entries.get_mut(&key) {
            let old = entry.0;
            *entry = (value, entry.1 + 1, tick);
            return Some((key, old));
        }
        let evicted = if self.entries.len() >= self.capacity {
            self.victim().map(|victim| {
                let (value, _, _) = self.entries.remove(&victim).unwrap();
                (victim, value)
            })
        } else {
            None
        };
        self.entries.insert(key, (value, 1, tick));
        evicted
    }

    fn remove(&mut self, key: u32) -> Option<u32> {
        self.entries.remove(&key).map(|(value, _, _)| value)
    }

    fn pop(&mut self) -> Option<(u32, u32)> {
        let victim = self.victim()?;
        self.entries
            .remove(&victim)
            .map(|(value, _, _)| (victim, value))
    }

    fn frequency(&self, key: u32) -> Option<u64> {
        self.entries.get(&key).map(|&(_, frequency, _)| frequency)
    }

    fn min_frequency(&self) -> Option<u64> {
        self.entries.values().map(|&(_, frequency, _)| frequency).min()
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Get(u32),
    Put(u32, u32),
    Remove(u32),
    Pop,
    Peek(u32),
}

fn op_strategy(key_space: u32) -> impl Strategy<Value = Op> {
    prop_oneof![
        9 => (0..key_space).prop_map(Op::Get),
        9 => (0..key_space, any::<u32>()).prop_map(|(key, value)| Op::Put(key, value)),
        1 => (0..key_space).prop_map(Op::Remove),
        1 => Just(Op::Pop),
        1 => (0..key_space).prop_map(Op::Peek),
    ]
}

/// Capacity, then an operation sequence over a key space up to 3x capacity.
fn workload() -> impl Strategy<Value = (usize, Vec<Op>)> {
    (0usize..12, 1u32..4).prop_flat_map(|(capacity, spread)| {
        let key_space = (capacity as u32 + 1) * spread;
        (
            Just(capacity),
            prop::collection::vec(op_strategy(key_space), 0..400),
        )
    })
}

fn run_model_check(capacity: usize, ops: &[Op]) -> Result<(), TestCaseError> {
    let mut cache = make_lfu::<u32, u32>(capacity);
    let mut model = ReferenceLfu::new(capacity);

    for (step, &op) in ops.iter().enumerate() {
        let touched = match op {
            Op::Get(key) => {
                prop_assert_eq!(cache.get(&key).copied(), model.get(key), "get({}) at step {}", key, step);
                Some(key)
            }
            Op::Put(key, value) => {
                prop_assert_eq!(cache.push(key, value), model.put(key, value), "put({}) at step {}", key, step);
                Some(key)
            }
            Op::Remove(key) => {
                prop_assert_eq!(cache.remove(&key), model.remove(key), "remove({}) at step {}", key, step);
                Some(key)
            }
            Op::Pop => {
                prop_assert_eq!(cache.pop(), model.pop(), "pop at step {}", step);
                None
            }
            Op::Peek(key) => {
                prop_assert_eq!(cache.peek(&key).copied(), model.entries.get(&key).map(|e| e.0));
                Some(key)
            }
        };

        prop_assert_eq!(cache.len(), model.entries.len(), "len at step {}", step);
        prop_assert!(cache.len() <= capacity);
        prop_assert_eq!(cache.min_frequency(), model.min_frequency(), "min at step {}", step);
        if let Some(key) = touched {
            prop_assert_eq!(cache.frequency(&key), model.frequency(key));
        }
        if let Err(err) = cache.check_invariants() {
            return Err(TestCaseError::fail(format!("invariant violated at step {step}: {err}")));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_lfu_matches_reference((capacity, ops) in workload()) {
        run_model_check(capacity, &ops)?;
    }

    /// Few keys, long runs: frequencies climb and tiers churn.
    #[test]
    fn prop_lfu_matches_reference_hot_keys(
        capacity in 1usize..6,
        ops in prop::collection::vec(op_strategy(6), 0..1_000),
    ) {
        run_model_check(capacity, &ops)?;
    }

    #[test]
    fn prop_lfu_zero_capacity_never_stores(ops in prop::collection::vec(op_strategy(4), 0..100)) {
        run_model_check(0, &ops)?;
    }
}
