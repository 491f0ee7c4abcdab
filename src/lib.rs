#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How It Works
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                              LfuCache                                │
//! │                                                                      │
//! │  Entry Index (HashMap<K, SlotId>)                                    │
//! │     "a" ─┐   "b" ─┐   "c" ─┐   "d" ─┐                                │
//! │          │        │        │        │                                │
//! │  Frequency Ledger ▼        ▼        ▼                                │
//! │                                                                      │
//! │   min_frequency = 1                                                  │
//! │                                                                      │
//! │   tier 1:  [d] ◀──▶ [c]            MRU ──▶ LRU (evict from here)     │
//! │   tier 3:  [b]                                                       │
//! │   tier 7:  [a]                                                       │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entry sits in exactly one tier, the one matching its use count.
//! A hit moves the entry to the front of the next tier up. Eviction takes the
//! back of the lowest non-empty tier. Both are a constant number of handle
//! rewires, and the minimum frequency is maintained alongside them so it
//! never has to be searched for.
//!
//! ## Performance Characteristics
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `get` / `get_mut` | O(1) average |
//! | `put` / `push` | O(1) average |
//! | `remove` / `pop` | O(1) average |
//! | `peek` / `contains_key` / `frequency` | O(1) average, no promotion |
//! | `check_invariants` | O(n) |
//!
//! ## Code Examples
//!
//! ```rust
//! use lfu_ledger::LfuCache;
//! use lfu_ledger::config::LfuCacheConfig;
//!
//! let config = LfuCacheConfig { capacity: 2 };
//! let mut cache: LfuCache<&str, i32> = LfuCache::init(config, None);
//! cache.put("rare", 1);
//! cache.put("popular", 2);
//!
//! // Access "popular" multiple times
//! for _ in 0..10 { cache.get(&"popular"); }
//!
//! cache.put("new", 3);  // "rare" evicted (lowest frequency)
//! assert!(cache.get(&"popular").is_some());
//! assert!(cache.get(&"rare").is_none());
//! ```
//!
//! Ties are broken by recency:
//!
//! ```rust
//! use lfu_ledger::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put(1, 1);
//! cache.put(2, 2);
//! cache.get(&1);
//! cache.get(&2); // both at frequency 2, key 1 touched earlier
//!
//! cache.put(3, 3); // evicts key 1
//! assert_eq!(cache.get(&1), None);
//! ```
//!
//! ## Concurrent Cache
//!
//! Enable the `concurrent` feature for a thread-safe version:
//!
//! ```toml
//! [dependencies]
//! lfu-ledger = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! ```rust,ignore
//! use lfu_ledger::ConcurrentLfuCache;
//! use std::sync::Arc;
//!
//! let cache = Arc::new(ConcurrentLfuCache::new(10_000));
//!
//! // Safe to share across threads
//! let cache_clone = Arc::clone(&cache);
//! std::thread::spawn(move || {
//!     cache_clone.put("key".to_string(), 42);
//! });
//! ```
//!
//! ## Modules
//!
//! - [`lfu`]: Least Frequently Used cache implementation
//! - [`config`]: Configuration structures
//! - [`error`]: Configuration and invariant errors
//! - `concurrent`: Thread-safe cache (requires `concurrent` feature)

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Slot storage addressed by stable handles.
///
/// Entries link to each other through `SlotId`s into this arena rather than
/// through pointers.
pub(crate) mod arena;

/// Per-entry record: key, value, use count and tier links.
pub(crate) mod entry;

/// One recency-ordered group of entries sharing a frequency.
pub(crate) mod tier;

/// Frequency → tier map plus the tracked minimum frequency.
pub(crate) mod ledger;

/// Cache configuration structures.
pub mod config;

/// Error types for construction and self-checks.
pub mod error;

/// Least Frequently Used (LFU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least frequently used items
/// when capacity is reached, least recently used first among equals.
pub mod lfu;

/// Concurrent cache implementation.
///
/// Provides a thread-safe LFU cache that guards the whole cache with one lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use config::LfuCacheConfig;
pub use error::{ConfigError, InvariantError};
pub use lfu::LfuCache;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLfuCache;
