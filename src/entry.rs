//! Cache Entry Type
//!
//! A `CacheEntry<K, V>` is one cached key-value pair together with its access
//! frequency and the handles linking it into the recency list of its
//! frequency tier.
//!
//! # Memory Layout
//!
//! - `prev` / `next`: 16 bytes each (`Option<SlotId>`), touched on every promotion
//! - `frequency: u64`: 8 bytes
//! - `key: K`, `value: V`: user types
//!
//! The entry lives in the ledger's slot arena. The tier it belongs to is named
//! by `frequency`; the handles are the entry's position inside that tier.

use crate::arena::SlotId;
use core::fmt;

/// Frequency assigned to a freshly inserted entry.
pub(crate) const INITIAL_FREQUENCY: u64 = 1;

pub(crate) struct CacheEntry<K, V> {
    // Hot fields - read on every list rewire
    pub(crate) prev: Option<SlotId>,
    pub(crate) next: Option<SlotId>,
    pub(crate) frequency: u64,

    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> CacheEntry<K, V> {
    /// Creates an unlinked entry at the initial frequency.
    #[inline]
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            prev: None,
            next: None,
            frequency: INITIAL_FREQUENCY,
            key,
            value,
        }
    }

    /// Bumps the frequency by one and returns the new value.
    ///
    /// Saturates at `u64::MAX`; callers compare the result against the old
    /// frequency to learn whether the entry changes tier.
    #[inline]
    pub(crate) fn increment(&mut self) -> u64 {
        self.frequency = self.frequency.saturating_add(1);
        self.frequency
    }

    /// Consumes the entry, dropping its links.
    #[inline]
    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CacheEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("frequency", &self.frequency)
            .finish()
    }
}
