//! Error types for the cachelite library.
//!
//! Lookups never fail: a missing key is reported through `Option`/`bool`.
//! The errors here cover the two places where something can actually be
//! wrong.
//!
//! - [`InvariantError`]: returned by `check_invariants` when a cache's
//!   internal structure (list links, index, counters) is inconsistent.
//! - [`ConfigError`]: returned when a policy name or a [`CacheConfig`]
//!   loaded from outside the program is invalid.
//!
//! [`CacheConfig`]: crate::builder::CacheConfig
//!
//! ## Example Usage
//!
//! ```
//! use cachelite::builder::CachePolicy;
//! use cachelite::error::ConfigError;
//!
//! let policy: Result<CachePolicy, ConfigError> = "lfu".parse();
//! assert_eq!(policy, Ok(CachePolicy::Lfu));
//!
//! let bad = "arc".parse::<CachePolicy>();
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
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

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by the strict [`FromStr`](std::str::FromStr) impl of
/// [`CachePolicy`](crate::builder::CachePolicy) and by
/// [`CacheConfig::validate`](crate::builder::CacheConfig::validate).
///
/// # Example
///
/// ```
/// use cachelite::builder::CachePolicy;
///
/// let err = "mru".parse::<CachePolicy>().unwrap_err();
/// assert!(err.to_string().contains("mru"));
/// ```
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

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("forward walk visited 3 nodes, len is 4");
        assert_eq!(err.to_string(), "forward walk visited 3 nodes, len is 4");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("cycle");
        assert_eq!(err.message(), "cycle");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("unknown cache policy `mru`");
        assert_eq!(err.to_string(), "unknown cache policy `mru`");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.message(), "x");
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
    }
}
