//! # Selectito
//!
//! Bounded-history memoization for selector functions.
//!
//! A *selector* derives a value from a fixed, ordered list of inputs pulled
//! out of some context value (an application state, a request, a snapshot).
//! Classic selector memoization remembers exactly one previous input
//! combination; `selectito` remembers up to `cache_size` of them, which pays
//! off when callers alternate between a small rotating set of input patterns.
//!
//! ## Features
//!
//! - **Multi-entry history**: each memoized selector keeps its last
//!   `cache_size` distinct input combinations and their results
//! - **Custom equality**: cache hits are decided by a caller-supplied
//!   comparator applied per input position
//! - **Move-to-front retention**: a reused input pattern is promoted to the
//!   newest history slot, making it the last candidate for eviction
//! - **Result-aware**: [`MemoizedSelector::select_ok`] caches only `Ok`
//!   values, so a failed computation never poisons the history
//! - **Thread-safe**: histories are private per selector and serialized with
//!   a `parking_lot` mutex
//! - **Statistics tracking**: per-selector hit/miss/eviction counters and a
//!   global named registry (requires the `stats` feature, enabled by default)
//!
//! ## Quick Start
//!
//! ```rust
//! use selectito::{extractors, SelectorFactory};
//!
//! struct Shop {
//!     subtotal: u32,
//!     tax_percent: u32,
//! }
//!
//! // A factory fixes the cache depth and the equality comparator once.
//! let factory = SelectorFactory::new(2, selectito::equality::strict).unwrap();
//!
//! let total = factory.make(
//!     |inputs: &[u32]| inputs[0] + inputs[0] * inputs[1] / 100,
//!     extractors![|shop: &Shop| shop.subtotal, |shop: &Shop| shop.tax_percent],
//! );
//!
//! let shop = Shop { subtotal: 100, tax_percent: 8 };
//! assert_eq!(total.select(&shop), 108);
//! // Same inputs: served from history, the computation does not run again.
//! assert_eq!(total.select(&shop), 108);
//! ```
//!
//! ## Single-entry memoization
//!
//! [`create_selector`] is the pre-configured common case: cache depth 1 and
//! `PartialEq` equality, reproducing classic last-value memoization.
//!
//! ```rust
//! use selectito::{create_selector, extractors};
//!
//! let double = create_selector(
//!     |inputs: &[i64]| inputs[0] * 2,
//!     extractors![|n: &i64| *n],
//! );
//! assert_eq!(double.select(&21), 42);
//! ```
//!
//! ## Module Organization
//!
//! - [`factory`] - selector construction: [`SelectorFactory`] and
//!   [`create_selector`]
//! - [`selector`] - [`MemoizedSelector`] and the [`Selector`] wrapper that
//!   distinguishes memoized selectors from plain pass-through computations
//! - [`equality`] - ready-made equality comparators
//! - [`selection_map`] - keyed selective recomputation above any number of
//!   selectors
//! - [`error`] - configuration errors
//! - `stats_registry` - global statistics registry (feature `stats`)

mod history;

pub mod equality;
pub mod error;
pub mod factory;
pub mod selection_map;
pub mod selector;

#[cfg(feature = "stats")]
mod stats;

#[cfg(feature = "stats")]
pub mod stats_registry;

pub use error::ConfigError;
pub use factory::{create_selector, SelectorFactory};
pub use selection_map::{KeyedSelection, SelectionMap};
pub use selector::{Computation, Extractor, MemoizedSelector, Selector};

#[cfg(feature = "stats")]
pub use stats::SelectorStats;

/// Builds the boxed extractor list a [`SelectorFactory`] expects.
///
/// Each argument must be a closure or function taking a context reference and
/// returning one input value. Order matters: it defines the shape of the input
/// tuple handed to the computation.
///
/// # Examples
///
/// ```
/// use selectito::{extractors, SelectorFactory};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let factory = SelectorFactory::new(1, selectito::equality::strict).unwrap();
/// let manhattan = factory.make(
///     |inputs: &[i32]| inputs[0].abs() + inputs[1].abs(),
///     extractors![|p: &Point| p.x, |p: &Point| p.y],
/// );
/// assert_eq!(manhattan.select(&Point { x: -3, y: 4 }), 7);
/// ```
#[macro_export]
macro_rules! extractors {
    () => {
        ::std::vec::Vec::new()
    };
    ($($extract:expr),+ $(,)?) => {{
        let list: ::std::vec::Vec<$crate::Extractor<_, _>> =
            ::std::vec![$(::std::boxed::Box::new($extract)),+];
        list
    }};
}
