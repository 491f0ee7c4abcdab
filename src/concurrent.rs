//! Concurrent Cache Implementation
//!
//! This module provides a thread-safe wrapper around the LFU algorithm for
//! callers that share one cache between threads.
//!
//! # Architecture
//!
//! [`ConcurrentLfuCache`] guards a single LFU segment with one
//! `parking_lot::Mutex`. Every operation takes the lock, runs the same O(1)
//! algorithm as [`LfuCache`](crate::LfuCache), and releases it. Frequencies
//! and the eviction order are therefore global: the cache behaves exactly
//! like a single-threaded `LfuCache` whose operations happen one at a time.
//!
//! The key space is not sharded. Splitting it would make frequency tracking
//! per-shard and change which entry is evicted.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! Every `get()` raises the entry's frequency and moves it between tiers, so
//! reads are writes. An `RwLock` would hand out exclusive guards on every hit
//! anyway, with more bookkeeping than a `Mutex`. The exceptions (`peek`,
//! `contains_key`, `frequency`, `len`) are short enough that sharing them
//! would not pay for the extra lock state.
//!
//! # Example
//!
//! ```rust
//! use lfu_ledger::concurrent::ConcurrentLfuCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLfuCache::new(1000));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.put(key.clone(), i);
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 400);
//! ```
//!
//! # Zero-Copy Access
//!
//! `get()` clones the value so the lock is released before the caller uses
//! it. Use `get_with()` to work on the value in place while the lock is held:
//!
//! ```rust
//! use lfu_ledger::concurrent::ConcurrentLfuCache;
//!
//! let cache = ConcurrentLfuCache::new(10);
//! cache.put("greeting", String::from("hello world"));
//!
//! let len = cache.get_with(&"greeting", |value| value.len());
//! assert_eq!(len, Some(11));
//! ```

mod lfu;

pub use self::lfu::ConcurrentLfuCache;
