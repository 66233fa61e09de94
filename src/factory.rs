//! Selector construction.
//!
//! A [`SelectorFactory`] is configured once with a cache depth and an
//! equality comparator, then applied per call-site to a computation function
//! and an extractor list. The factory holds no other state; every selector it
//! makes owns an independent history.

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::selector::{EqualityFn, Extractor, MemoizedSelector, Selector};

#[cfg(feature = "stats")]
use crate::stats_registry;

/// Configuration constructor for memoized selectors.
///
/// `I` is the input type shared by all extractor positions of the selectors
/// this factory makes; the comparator is applied identically to every
/// position.
///
/// # Examples
///
/// ```
/// use selectito::{extractors, SelectorFactory};
///
/// // Case-insensitive equality: "Rust" and "rust" hit the same entry.
/// let factory = SelectorFactory::new(4, |a: &String, b: &String| {
///     a.eq_ignore_ascii_case(b)
/// })
/// .unwrap();
///
/// let selector = factory.make(
///     |inputs: &[String]| inputs[0].len(),
///     extractors![|word: &String| word.clone()],
/// );
///
/// assert_eq!(selector.select(&"Rust".to_string()), 4);
/// // Hit under the comparator: the cached length is returned as-is.
/// assert_eq!(selector.select(&"rust".to_string()), 4);
/// ```
pub struct SelectorFactory<I> {
    cache_size: usize,
    equality: EqualityFn<I>,
}

impl<I: 'static> SelectorFactory<I> {
    /// Creates a factory with the given cache depth and equality comparator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCacheSize`] when `cache_size` is zero; the
    /// history must admit at least one entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use selectito::SelectorFactory;
    ///
    /// assert!(SelectorFactory::<u64>::new(8, selectito::equality::strict).is_ok());
    /// assert!(SelectorFactory::<u64>::new(0, selectito::equality::strict).is_err());
    /// ```
    pub fn new<E>(cache_size: usize, equality: E) -> Result<Self, ConfigError>
    where
        E: Fn(&I, &I) -> bool + Send + Sync + 'static,
    {
        if cache_size == 0 {
            return Err(ConfigError::ZeroCacheSize);
        }
        Ok(Self {
            cache_size,
            equality: Arc::new(equality),
        })
    }

    /// The history cap every selector made by this factory will carry.
    pub fn cache_size(&self) -> usize {
        self.cache_size
    }

    /// Builds a selector from a computation and an ordered extractor list.
    ///
    /// With one or more extractors the result is
    /// [`Selector::Memoized`] with an empty history. With none, memoization
    /// has nothing to vary over and the computation is returned as
    /// [`Selector::Plain`], unwrapped and uncached.
    ///
    /// The computation receives the input tuple as a slice in extractor
    /// order. It is trusted to be pure: its result is retained verbatim and
    /// replayed for equal input tuples.
    pub fn make<C, R, F>(&self, compute: F, extractors: Vec<Extractor<C, I>>) -> Selector<C, I, R>
    where
        F: Fn(&[I]) -> R + Send + Sync + 'static,
    {
        if extractors.is_empty() {
            return Selector::Plain(Box::new(compute));
        }
        Selector::Memoized(MemoizedSelector::new(
            Box::new(compute),
            extractors.into_boxed_slice(),
            Arc::clone(&self.equality),
            self.cache_size,
        ))
    }

    /// Like [`make`](Self::make), additionally registering the selector's
    /// statistics in the global [`stats_registry`] under `name`.
    ///
    /// The degenerate zero-extractor case carries no statistics and is not
    /// registered.
    ///
    /// Only available when the `stats` feature is enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use selectito::{extractors, stats_registry, SelectorFactory};
    ///
    /// let factory = SelectorFactory::new(2, selectito::equality::strict).unwrap();
    /// let selector = factory.make_named(
    ///     "doc_visible_rows",
    ///     |inputs: &[usize]| inputs[0].min(inputs[1]),
    ///     extractors![|win: &(usize, usize)| win.0, |win: &(usize, usize)| win.1],
    /// );
    ///
    /// selector.select(&(10, 25));
    /// selector.select(&(10, 25));
    ///
    /// let stats = stats_registry::get("doc_visible_rows").unwrap();
    /// assert_eq!(stats.hits(), 1);
    /// assert_eq!(stats.misses(), 1);
    /// # stats_registry::unregister("doc_visible_rows");
    /// ```
    #[cfg(feature = "stats")]
    pub fn make_named<C, R, F>(
        &self,
        name: &str,
        compute: F,
        extractors: Vec<Extractor<C, I>>,
    ) -> Selector<C, I, R>
    where
        F: Fn(&[I]) -> R + Send + Sync + 'static,
    {
        let selector = self.make(compute, extractors);
        if let Selector::Memoized(memoized) = &selector {
            stats_registry::register(name, memoized.stats_handle());
        }
        selector
    }
}

impl<I> fmt::Debug for SelectorFactory<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorFactory")
            .field("cache_size", &self.cache_size)
            .finish_non_exhaustive()
    }
}

/// The pre-configured common case: cache depth 1 and `PartialEq` equality.
///
/// Equivalent to a [`SelectorFactory`] built with `cache_size == 1` and
/// [`equality::strict`](crate::equality::strict) — classic last-value
/// memoization, where any input change evicts the sole prior entry.
///
/// # Examples
///
/// ```
/// use selectito::{create_selector, extractors};
///
/// struct Cart {
///     prices: Vec<u32>,
/// }
///
/// let total = create_selector(
///     |inputs: &[u32]| inputs[0] + inputs[1],
///     extractors![
///         |cart: &Cart| cart.prices.iter().sum::<u32>(),
///         |cart: &Cart| cart.prices.len() as u32,
///     ],
/// );
///
/// let cart = Cart { prices: vec![3, 4] };
/// assert_eq!(total.select(&cart), 9);
/// ```
pub fn create_selector<C, I, R, F>(compute: F, extractors: Vec<Extractor<C, I>>) -> Selector<C, I, R>
where
    I: PartialEq + 'static,
    F: Fn(&[I]) -> R + Send + Sync + 'static,
{
    let factory = SelectorFactory {
        cache_size: 1,
        equality: Arc::new(crate::equality::strict),
    };
    factory.make(compute, extractors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_zero_cache_size_is_rejected() {
        let result = SelectorFactory::<i32>::new(0, crate::equality::strict);
        assert_eq!(result.unwrap_err(), ConfigError::ZeroCacheSize);
    }

    #[test]
    fn test_factory_reports_cache_size() {
        let factory = SelectorFactory::<i32>::new(5, crate::equality::strict).unwrap();
        assert_eq!(factory.cache_size(), 5);
    }

    #[test]
    fn test_zero_extractors_yield_plain_pass_through() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in = Arc::clone(&calls);
        let factory = SelectorFactory::<i32>::new(3, crate::equality::strict).unwrap();

        let plain: Selector<(), i32, i32> = factory.make(
            move |_inputs: &[i32]| {
                calls_in.fetch_add(1, Ordering::SeqCst);
                7
            },
            vec![],
        );

        assert!(!plain.is_memoized());
        assert_eq!(plain.select(&()), 7);
        assert_eq!(plain.select(&()), 7);
        // No caching behavior: the computation ran every time.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_selectors_from_one_factory_have_independent_histories() {
        let factory = SelectorFactory::new(1, crate::equality::strict).unwrap();
        let first = factory.make(
            |inputs: &[i32]| inputs[0],
            crate::extractors![|n: &i32| *n],
        );
        let second = factory.make(
            |inputs: &[i32]| inputs[0] * 100,
            crate::extractors![|n: &i32| *n],
        );

        first.select(&1);
        assert_eq!(first.history_len(), 1);
        assert_eq!(second.history_len(), 0);
    }

    #[test]
    fn test_default_entry_point_is_single_entry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in = Arc::clone(&calls);
        let selector = create_selector(
            move |inputs: &[i32]| {
                calls_in.fetch_add(1, Ordering::SeqCst);
                inputs[0]
            },
            crate::extractors![|n: &i32| *n],
        );

        // A, A, B, A: miss, hit, miss (evicts A), miss.
        selector.select(&1);
        selector.select(&1);
        selector.select(&2);
        selector.select(&1);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
