//! Ready-made equality comparators.
//!
//! A comparator decides whether two input values are interchangeable for
//! cache-hit purposes. It is supplied once to
//! [`SelectorFactory::new`](crate::SelectorFactory::new) and applied to every
//! input position of every history entry, so all inputs of one selector share
//! a single input type.
//!
//! Any `Fn(&I, &I) -> bool + Send + Sync + 'static` works; the functions here
//! cover the common cases.

use std::sync::Arc;

/// Value equality via `PartialEq`.
///
/// This is the default comparator used by
/// [`create_selector`](crate::create_selector).
///
/// # Examples
///
/// ```
/// use selectito::equality::strict;
///
/// assert!(strict(&3, &3));
/// assert!(!strict(&3, &5));
/// ```
pub fn strict<I: PartialEq>(a: &I, b: &I) -> bool {
    a == b
}

/// Pointer identity for `Arc`-valued inputs.
///
/// Two inputs are equal only when they are the *same* allocation, regardless
/// of their contents. Use this when extractors hand out shared references to
/// large structures and a changed pointer is the signal to recompute.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use selectito::equality::same_arc;
///
/// let a = Arc::new(vec![1, 2, 3]);
/// let b = Arc::clone(&a);
/// let c = Arc::new(vec![1, 2, 3]);
///
/// assert!(same_arc(&a, &b));
/// assert!(!same_arc(&a, &c)); // equal contents, different allocation
/// ```
pub fn same_arc<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    Arc::ptr_eq(a, b)
}
