//! Configuration for the Least Frequently Used (LFU) cache.
//!
//! # Examples
//!
//! ```
//! use lfu_ledger::config::LfuCacheConfig;
//! use lfu_ledger::LfuCache;
//!
//! let config = LfuCacheConfig { capacity: 100 };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//!
//! // Signed or externally supplied capacities go through the fallible path
//! assert!(LfuCacheConfig::try_new(-5i32).is_err());
//! ```

use crate::error::ConfigError;
use alloc::format;
use core::fmt;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. Zero is valid
///   and yields a cache that never stores anything.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold
    pub capacity: usize,
}

impl LfuCacheConfig {
    /// Creates a configuration with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Creates a configuration from any integer capacity.
    ///
    /// Negative values, and values that do not fit in `usize`, are rejected
    /// rather than clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ledger::config::LfuCacheConfig;
    ///
    /// assert_eq!(LfuCacheConfig::try_new(0i64).unwrap().capacity, 0);
    /// assert_eq!(LfuCacheConfig::try_new(8u8).unwrap().capacity, 8);
    /// assert!(LfuCacheConfig::try_new(-1i64).is_err());
    /// ```
    pub fn try_new<C>(capacity: C) -> Result<Self, ConfigError>
    where
        C: TryInto<usize> + Copy + fmt::Display,
    {
        let capacity = capacity.try_into().map_err(|_| {
            ConfigError::new(format!(
                "capacity must be a non-negative integer that fits in usize, got {capacity}"
            ))
        })?;
        Ok(Self { capacity })
    }
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
