//! Concurrent LFU Cache Implementation
//!
//! A thread-safe LFU cache: one [`LfuSegment`] behind one lock. This is the
//! multi-threaded counterpart to [`LfuCache`](crate::LfuCache).
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │          ConcurrentLfuCache          │
//! │                                      │
//! │   ┌──────────────────────────────┐   │
//! │   │            Mutex             │   │
//! │   └──────────────┬───────────────┘   │
//! │                  │                   │
//! │   ┌──────────────▼───────────────┐   │
//! │   │  LfuSegment                  │   │
//! │   │  index ─▶ ledger (tiers)     │   │
//! │   └──────────────────────────────┘   │
//! └──────────────────────────────────────┘
//! ```
//!
//! # Performance Characteristics
//!
//! | Metric | Value |
//! |--------|-------|
//! | Get/Put/Remove | O(1) average, under the lock |
//! | Concurrency | Operations are serialized |
//! | Eviction order | Identical to `LfuCache` |
//!
//! # When to Use
//!
//! **Use ConcurrentLfuCache when:**
//! - Multiple threads need cache access
//! - Eviction must follow global frequencies, not per-shard ones
//!
//! **Consider alternatives when:**
//! - Single-threaded access only → use `LfuCache`

use crate::config::LfuCacheConfig;
use crate::error::{ConfigError, InvariantError};
use crate::lfu::LfuSegment;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LFU cache guarded by a single lock.
pub struct ConcurrentLfuCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<LfuSegment<K, V, S>>,
}

impl<K, V> ConcurrentLfuCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    /// Creates a new concurrent LFU cache with the specified capacity.
    ///
    /// A capacity of zero yields a cache that never stores anything.
    pub fn new(capacity: usize) -> Self {
        Self::init(LfuCacheConfig::new(capacity), None)
    }

    /// Creates a new concurrent LFU cache from any integer capacity,
    /// rejecting negative or unrepresentable values.
    pub fn try_new<C>(capacity: C) -> Result<Self, ConfigError>
    where
        C: TryInto<usize> + Copy + fmt::Display,
    {
        let config = LfuCacheConfig::try_new(capacity)?;
        Ok(Self::init(config, None))
    }
}

impl<K, V, S> ConcurrentLfuCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Send,
{
    /// Creates a concurrent LFU cache from a configuration and an optional
    /// hash builder.
    pub fn init(config: LfuCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::with_hasher(config.capacity, hasher.unwrap_or_default())
    }

    /// Creates a new concurrent LFU cache with a custom hasher.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            inner: Mutex::new(LfuSegment::init(
                LfuCacheConfig::new(capacity),
                hash_builder,
            )),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    pub fn capacity(&self) -> usize {
        self.inner.lock().cap()
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the lowest frequency among cached entries.
    pub fn min_frequency(&self) -> Option<u64> {
        self.inner.lock().min_frequency()
    }

    /// Gets a value from the cache, counting it as a use.
    ///
    /// This clones the value to avoid holding the lock. For zero-copy access,
    /// use `get_with()` instead.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Gets a value and applies a function to it while holding the lock.
    ///
    /// Counts as a use exactly like `get()`. Keep `f` short: every other
    /// caller waits until it returns. Calling back into this cache from `f`
    /// deadlocks, except for `Debug` formatting, which reports the contents
    /// as locked.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Gets a value without counting it as a use.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Returns the current use count of the entry, or `None` if absent.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().frequency(key)
    }

    /// Returns `true` if the cache contains the specified key. Does not count
    /// as a use.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains_key(key)
    }

    /// Inserts a key-value pair, returning the previous value if the key was
    /// present.
    ///
    /// If the key is new and the cache is at capacity, the least frequently
    /// used entry is evicted first.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    /// Inserts a key-value pair, returning whichever pair left the cache:
    /// the replaced one, the evicted one, or the rejected one when the
    /// capacity is zero.
    pub fn push(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().push(key, value)
    }

    /// Removes a key from the cache, returning the value if it existed.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Removes and returns the current eviction candidate.
    pub fn pop(&self) -> Option<(K, V)> {
        self.inner.lock().pop()
    }

    /// Clears all entries from the cache.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Audits the internal structure under the lock.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

impl<K, V, S> fmt::Debug for ConcurrentLfuCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(segment) => f
                .debug_struct("ConcurrentLfuCache")
                .field("segment", &*segment)
                .finish(),
            None => f
                .debug_struct("ConcurrentLfuCache")
                .field("segment", &format_args!("<locked>"))
                .finish(),
        }
    }
}
