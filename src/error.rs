//! Error types.
//!
//! - [`ConfigError`]: returned by fallible constructors when a configuration
//!   parameter cannot describe a valid cache (e.g. a negative capacity).
//! - [`InvariantError`]: returned by `check_invariants` when the internal
//!   bookkeeping no longer agrees with itself. Seeing one is always a bug.
//!
//! Cache misses are not errors: lookups return `Option`.
//!
//! # Example
//!
//! ```
//! use lfu_ledger::error::ConfigError;
//! use lfu_ledger::LfuCache;
//!
//! let err = LfuCache::<u32, u32>::try_new(-1i64).unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//! ```

use alloc::string::String;
use core::fmt;

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Error returned when internal cache invariants are violated.
///
/// Carries a description of the first invariant found broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvariantError {}
