//! Configuration errors.
//!
//! The engine raises errors only while a selector is being configured, never
//! during invocation. Failures inside a caller-supplied computation propagate
//! to the invoker untouched (see [`MemoizedSelector::select_ok`] for the
//! `Result`-returning path).
//!
//! [`MemoizedSelector::select_ok`]: crate::MemoizedSelector::select_ok

use thiserror::Error;

/// Error returned when selector configuration parameters are invalid.
///
/// Produced by [`SelectorFactory::new`](crate::SelectorFactory::new).
///
/// # Examples
///
/// ```
/// use selectito::{ConfigError, SelectorFactory};
///
/// let err = SelectorFactory::<i32>::new(0, selectito::equality::strict).unwrap_err();
/// assert_eq!(err, ConfigError::ZeroCacheSize);
/// assert!(err.to_string().contains("cache size"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The cache depth must admit at least one history entry.
    #[error("cache size must be a positive integer (got 0)")]
    ZeroCacheSize,
}
