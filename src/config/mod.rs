//! Cache Configuration Module
//!
//! Configuration structs have public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **Fallible path**: `try_new` validates values that come from untrusted
//!   or signed sources before they reach the cache
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LfuCacheConfig` | [`LfuCache`](crate::LfuCache) | Least Frequently Used |
//!
//! The concurrent cache (requires the `concurrent` feature) is built from the
//! same `LfuCacheConfig`: it guards one whole cache with a single lock, so it
//! has no extra parameters.
//!
//! # Examples
//!
//! ```
//! use lfu_ledger::config::LfuCacheConfig;
//! use lfu_ledger::LfuCache;
//!
//! let config = LfuCacheConfig { capacity: 1000 };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//! assert_eq!(cache.cap(), 1000);
//! ```

pub mod lfu;

pub use lfu::LfuCacheConfig;
