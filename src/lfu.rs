//! Least Frequently Used Cache Implementation.
//!
//! The LFU (Least Frequently Used) cache evicts the least frequently accessed
//! entry when it is full. Among entries with the same frequency, the one
//! touched least recently goes first.
//!
//! Both reads and writes count as uses: a `get` hit and a `put` on an existing
//! key each raise the entry's frequency by exactly one. A brand-new entry
//! starts at frequency 1 as the most recent member of that frequency.
//!
//! # Structure
//!
//! - **Entry Index**: `HashMap<K, SlotId>` from key to the entry's arena handle
//! - **Frequency Ledger**: frequency → recency-ordered tier, plus the minimum
//!   frequency (see [`ledger`](crate::ledger))
//!
//! Every operation is a hash lookup plus a constant number of handle rewires.

use crate::arena::SlotId;
use crate::config::LfuCacheConfig;
use crate::error::{ConfigError, InvariantError};
use crate::ledger::FrequencyLedger;
use alloc::format;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on the slots reserved at construction. Larger caches grow
/// their index and arena on demand.
const PREALLOC_LIMIT: usize = 4096;

/// What happened to a key handed to [`LfuSegment::insert`].
enum Insertion<K, V> {
    /// Capacity is zero; the pair was not stored.
    Rejected(K, V),
    /// The key existed; carries the replaced value.
    Replaced(K, V),
    /// The key was new and another entry had to make room.
    Evicted(K, V),
    /// The key was new and fit without eviction.
    Inserted,
}

/// Internal LFU segment containing the actual cache algorithm.
///
/// Shared between `LfuCache` (single-threaded) and `ConcurrentLfuCache`
/// (one lock around the whole segment). All algorithm logic lives here.
pub(crate) struct LfuSegment<K, V, S = DefaultHashBuilder> {
    config: LfuCacheConfig,

    /// Entry Index: key to the entry's handle in the ledger.
    index: HashMap<K, SlotId, S>,

    ledger: FrequencyLedger<K, V>,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LfuSegment<K, V, S> {
    pub(crate) fn init(config: LfuCacheConfig, hash_builder: S) -> Self {
        log::debug!("creating LFU cache with capacity {}", config.capacity);
        let reserved = config.capacity.min(PREALLOC_LIMIT);
        LfuSegment {
            config,
            index: HashMap::with_capacity_and_hasher(reserved, hash_builder),
            ledger: FrequencyLedger::with_capacity(reserved),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.config.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub(crate) fn min_frequency(&self) -> Option<u64> {
        self.ledger.min_frequency()
    }

    /// Looks up `key` and, on a hit, promotes it to the next frequency.
    fn touch<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = *self.index.get(key)?;
        self.ledger.promote(id);
        Some(id)
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.touch(key)?;
        Some(&self.ledger.entry(id).value)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.touch(key)?;
        Some(&mut self.ledger.entry_mut(id).value)
    }

    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = *self.index.get(key)?;
        Some(&self.ledger.entry(id).value)
    }

    pub(crate) fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = *self.index.get(key)?;
        Some(self.ledger.entry(id).frequency)
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(key)
    }

    fn insert(&mut self, key: K, value: V) -> Insertion<K, V> {
        if self.config.capacity == 0 {
            return Insertion::Rejected(key, value);
        }

        if let Some(&id) = self.index.get(&key) {
            let old_value = mem::replace(&mut self.ledger.entry_mut(id).value, value);
            self.ledger.promote(id);
            return Insertion::Replaced(key, old_value);
        }

        // Room is made strictly before the new entry exists, so it can never
        // be its own eviction victim.
        let evicted = if self.len() >= self.config.capacity {
            self.evict()
        } else {
            None
        };

        let id = self.ledger.insert(key.clone(), value);
        self.index.insert(key, id);

        match evicted {
            Some((key, value)) => Insertion::Evicted(key, value),
            None => Insertion::Inserted,
        }
    }

    pub(crate) fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.insert(key, value) {
            Insertion::Replaced(_, old_value) => Some(old_value),
            Insertion::Rejected(..) | Insertion::Evicted(..) | Insertion::Inserted => None,
        }
    }

    pub(crate) fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.insert(key, value) {
            Insertion::Rejected(key, value)
            | Insertion::Replaced(key, value)
            | Insertion::Evicted(key, value) => Some((key, value)),
            Insertion::Inserted => None,
        }
    }

    /// Removes the eviction candidate from both the ledger and the index.
    fn evict(&mut self) -> Option<(K, V)> {
        let id = self.ledger.eviction_candidate()?;
        let entry = self.ledger.detach(id);
        self.index.remove(&entry.key);
        log::trace!(
            "evicted LFU entry at frequency {} ({} of {} slots left in use)",
            entry.frequency,
            self.len(),
            self.config.capacity
        );
        Some(entry.into_pair())
    }

    pub(crate) fn pop(&mut self) -> Option<(K, V)> {
        self.evict()
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.index.remove(key)?;
        Some(self.ledger.detach(id).value)
    }

    pub(crate) fn clear(&mut self) {
        log::debug!("clearing LFU cache holding {} entries", self.len());
        self.index.clear();
        self.ledger.clear();
    }

    /// Audits the index against the ledger on top of the ledger's own checks.
    pub(crate) fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.len() > self.config.capacity {
            return Err(InvariantError::new(format!(
                "cache holds {} entries but capacity is {}",
                self.len(),
                self.config.capacity
            )));
        }
        if self.index.len() != self.ledger.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but the ledger holds {} entries",
                self.index.len(),
                self.ledger.len()
            )));
        }
        for (id, entry) in self.ledger.entries() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(
                    "ledger entry is not indexed under its own key",
                ));
            }
        }
        self.ledger.check_invariants()
    }
}

impl<K, V, S> fmt::Debug for LfuSegment<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.index.len())
            .field("ledger", &self.ledger)
            .finish()
    }
}

/// An implementation of a Least Frequently Used (LFU) cache.
///
/// The cache tracks how often each entry is used and, when full, evicts the
/// entry with the lowest frequency. Ties are broken by recency: among the
/// least frequently used entries, the one touched least recently is evicted.
///
/// A capacity of zero is valid and produces a cache that never stores
/// anything: every `get` misses and every `put` is a no-op.
///
/// # Examples
///
/// ```
/// use lfu_ledger::LfuCache;
///
/// let mut cache = LfuCache::new(2);
///
/// cache.put(1, 1);
/// cache.put(2, 2);
/// assert_eq!(cache.get(&1), Some(&1)); // key 1 now has frequency 2
///
/// cache.put(3, 3); // evicts key 2, the least frequently used
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&3), Some(&3));
/// ```
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    segment: LfuSegment<K, V, S>,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Creates an LFU cache from a configuration and an optional hash builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ledger::config::LfuCacheConfig;
    /// use lfu_ledger::LfuCache;
    ///
    /// let config = LfuCacheConfig { capacity: 10 };
    /// let cache: LfuCache<&str, u32> = LfuCache::init(config, None);
    /// assert_eq!(cache.cap(), 10);
    /// ```
    pub fn init(config: LfuCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self {
            segment: LfuSegment::init(config, hasher.unwrap_or_default()),
        }
    }

    /// Creates a new LFU cache with the specified capacity and hash builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ledger::LfuCache;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let cache: LfuCache<&str, u32, _> = LfuCache::with_hasher(10, RandomState::new());
    /// assert!(cache.is_empty());
    /// ```
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            segment: LfuSegment::init(LfuCacheConfig::new(capacity), hash_builder),
        }
    }

    /// Returns the maximum number of key-value pairs the cache can hold.
    #[inline]
    pub fn cap(&self) -> usize {
        self.segment.cap()
    }

    /// Returns the current number of key-value pairs in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns `true` if the cache contains no key-value pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns the lowest frequency among cached entries, or `None` when the
    /// cache is empty.
    #[inline]
    pub fn min_frequency(&self) -> Option<u64> {
        self.segment.min_frequency()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the cache's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    ///
    /// A hit raises the entry's frequency by one and makes it the most
    /// recently used entry of its new frequency. A miss changes nothing.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// Counts as a use exactly like [`get`](Self::get).
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Returns a reference to the value without counting it as a use.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ledger::LfuCache;
    ///
    /// let mut cache = LfuCache::new(2);
    /// cache.put("a", 1);
    /// assert_eq!(cache.peek(&"a"), Some(&1));
    /// assert_eq!(cache.frequency(&"a"), Some(1));
    /// ```
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.peek(key)
    }

    /// Returns the current use count of the entry, or `None` if absent.
    #[inline]
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.frequency(key)
    }

    /// Returns `true` if the cache holds the key. Does not count as a use.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains_key(key)
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// If the key is already present, its value is replaced in place, its
    /// frequency rises by one, and the previous value is returned. Updating
    /// an existing key never evicts.
    ///
    /// Otherwise, if the cache is full, the least frequently used entry
    /// (least recently used among equals) is evicted first and the new entry
    /// is stored at frequency 1. Returns `None` in that case, and always when
    /// the capacity is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ledger::LfuCache;
    ///
    /// let mut cache = LfuCache::new(2);
    /// assert_eq!(cache.put(1, 1), None);
    /// assert_eq!(cache.put(1, 2), Some(1));
    /// assert_eq!(cache.get(&1), Some(&2));
    /// assert_eq!(cache.frequency(&1), Some(3));
    /// ```
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.segment.put(key, value)
    }

    /// Inserts a key-value pair and returns whatever pair left the cache.
    ///
    /// - key present: `Some((key, old_value))`
    /// - key new, cache full: `Some(evicted_pair)`
    /// - capacity zero: `Some((key, value))`, the rejected pair itself
    /// - otherwise: `None`
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ledger::LfuCache;
    ///
    /// let mut cache = LfuCache::new(1);
    /// assert_eq!(cache.push("a", 1), None);
    /// assert_eq!(cache.push("b", 2), Some(("a", 1)));
    /// assert_eq!(cache.push("b", 3), Some(("b", 2)));
    /// ```
    #[inline]
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.segment.push(key, value)
    }

    /// Removes a key from the cache, returning its value if it was present.
    ///
    /// The key may be any borrowed form of the cache's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Removes and returns the eviction candidate: the entry with the lowest
    /// frequency, least recently used among equals.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ledger::LfuCache;
    ///
    /// let mut cache = LfuCache::new(2);
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// cache.get(&"b");
    ///
    /// assert_eq!(cache.pop(), Some(("a", 1)));
    /// assert_eq!(cache.pop(), Some(("b", 2)));
    /// assert_eq!(cache.pop(), None);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<(K, V)> {
        self.segment.pop()
    }

    /// Clears the cache, removing all key-value pairs.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Audits the internal structure.
    ///
    /// Verifies that the key index, the frequency tiers and the tracked
    /// minimum frequency all agree, and that the capacity bound holds.
    /// Returns the first inconsistency found. Any error is a bug in this
    /// crate.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.segment.check_invariants()
    }
}

impl<K: Hash + Eq + Clone, V> LfuCache<K, V> {
    /// Creates a new LFU cache with the specified capacity.
    ///
    /// A capacity of zero yields a cache that never stores anything.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ledger::LfuCache;
    ///
    /// let cache: LfuCache<&str, u32> = LfuCache::new(10);
    /// assert_eq!(cache.cap(), 10);
    /// ```
    pub fn new(capacity: usize) -> LfuCache<K, V, DefaultHashBuilder> {
        LfuCache::init(LfuCacheConfig::new(capacity), None)
    }

    /// Creates a new LFU cache from any integer capacity, rejecting negative
    /// or unrepresentable values.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ledger::LfuCache;
    ///
    /// assert!(LfuCache::<u32, u32>::try_new(4i32).is_ok());
    /// assert!(LfuCache::<u32, u32>::try_new(-4i32).is_err());
    /// ```
    pub fn try_new<C>(capacity: C) -> Result<Self, ConfigError>
    where
        C: TryInto<usize> + Copy + fmt::Display,
    {
        let config = LfuCacheConfig::try_new(capacity)?;
        Ok(LfuCache::init(config, None))
    }
}

impl<K, V, S> fmt::Debug for LfuCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("segment", &self.segment)
            .finish()
    }
}
