//! Memoized selectors and the typed wrapper around them.
//!
//! A [`MemoizedSelector`] owns one computation function, an ordered list of
//! input extractors, and a private bounded history of
//! `(input tuple, result)` pairs. Every invocation extracts the current
//! inputs from the context, scans the history newest to oldest with the
//! configured comparator, and either returns the cached result (promoting it
//! to the newest slot) or computes, records, and evicts the oldest entry when
//! the cap is exceeded.
//!
//! [`Selector`] wraps the two things a
//! [`SelectorFactory`](crate::SelectorFactory) can hand out: a memoized
//! selector, or — when no extractors were supplied — the plain computation
//! itself. The wrapper is the engine's marker: integration layers can ask
//! [`Selector::is_memoized`] without invoking anything.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::history::History;

#[cfg(feature = "stats")]
use crate::stats::SelectorStats;

/// Maps a context value to one input value.
///
/// A memoized selector owns an ordered sequence of these; the order defines
/// the input tuple handed to the computation. The [`extractors!`] macro
/// builds the boxed list.
///
/// [`extractors!`]: crate::extractors
pub type Extractor<C, I> = Box<dyn Fn(&C) -> I + Send + Sync>;

/// Derives a result from the full input tuple, in extractor order.
pub type Computation<I, R> = Box<dyn Fn(&[I]) -> R + Send + Sync>;

pub(crate) type EqualityFn<I> = Arc<dyn Fn(&I, &I) -> bool + Send + Sync>;

/// A selector with a private bounded history of input/result pairs.
///
/// Built by [`SelectorFactory::make`](crate::SelectorFactory::make). The
/// history starts empty and grows and shrinks only through invocation; it is
/// never shared between selectors.
///
/// # Thread Safety
///
/// The read-scan-then-mutate sequence of one invocation is not atomic on its
/// own, so the history sits behind a `parking_lot::Mutex` held for the whole
/// invocation, computation included. Invocation is therefore non-reentrant: a
/// computation must not call back into its own selector.
///
/// # Examples
///
/// ```
/// use selectito::{extractors, SelectorFactory};
///
/// struct State {
///     items: Vec<u32>,
/// }
///
/// let factory = SelectorFactory::new(3, selectito::equality::strict).unwrap();
/// let count = factory.make(
///     |inputs: &[usize]| inputs[0] * 10,
///     extractors![|state: &State| state.items.len()],
/// );
///
/// assert!(count.is_memoized());
/// assert_eq!(count.select(&State { items: vec![1, 2] }), 20);
/// ```
pub struct MemoizedSelector<C, I, R> {
    compute: Computation<I, R>,
    extractors: Box<[Extractor<C, I>]>,
    equality: EqualityFn<I>,
    cache_size: usize,
    history: Mutex<History<I, R>>,
    #[cfg(feature = "stats")]
    stats: Arc<SelectorStats>,
}

impl<C, I, R> MemoizedSelector<C, I, R> {
    pub(crate) fn new(
        compute: Computation<I, R>,
        extractors: Box<[Extractor<C, I>]>,
        equality: EqualityFn<I>,
        cache_size: usize,
    ) -> Self {
        Self {
            compute,
            extractors,
            equality,
            history: Mutex::new(History::new(cache_size)),
            cache_size,
            #[cfg(feature = "stats")]
            stats: Arc::new(SelectorStats::new()),
        }
    }

    /// The configured history cap.
    pub fn cache_size(&self) -> usize {
        self.cache_size
    }

    /// Number of input combinations currently retained.
    ///
    /// Never exceeds [`cache_size`](Self::cache_size).
    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }

    /// Hit/miss/eviction counters for this selector.
    ///
    /// Only available when the `stats` feature is enabled.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &SelectorStats {
        &self.stats
    }

    #[cfg(feature = "stats")]
    pub(crate) fn stats_handle(&self) -> Arc<SelectorStats> {
        Arc::clone(&self.stats)
    }

    fn extract(&self, context: &C) -> Box<[I]> {
        self.extractors
            .iter()
            .map(|extract| extract(context))
            .collect()
    }
}

impl<C, I, R: Clone> MemoizedSelector<C, I, R> {
    /// Invokes the selector for `context`.
    ///
    /// Applies each extractor to the context in order, then consults the
    /// history:
    ///
    /// * **hit** — an entry whose tuple is equal at every position (under the
    ///   configured comparator) exists; its stored result is returned and the
    ///   entry moves to the newest slot. The computation does not run.
    /// * **miss** — the computation runs on the current tuple, the pair is
    ///   recorded at the newest slot, and the oldest entry is evicted if the
    ///   history would exceed its cap.
    ///
    /// A panicking computation unwinds to the caller with the history
    /// unchanged; nothing is recorded for a computation that did not finish.
    ///
    /// # Examples
    ///
    /// ```
    /// use selectito::{extractors, SelectorFactory};
    ///
    /// let factory = SelectorFactory::new(2, selectito::equality::strict).unwrap();
    /// let selector = factory.make(
    ///     |inputs: &[i32]| inputs[0] + inputs[1],
    ///     extractors![|pair: &(i32, i32)| pair.0, |pair: &(i32, i32)| pair.1],
    /// );
    ///
    /// assert_eq!(selector.select(&(1, 2)), 3);
    /// assert_eq!(selector.select(&(5, 5)), 10);
    /// // Both tuples are still retained.
    /// assert_eq!(selector.history_len(), 2);
    /// ```
    pub fn select(&self, context: &C) -> R {
        let inputs = self.extract(context);
        let mut history = self.history.lock();
        match history.lookup(inputs, self.equality.as_ref()) {
            Ok(result) => {
                #[cfg(feature = "stats")]
                self.stats.record_hit();
                result
            }
            Err(inputs) => {
                let result = (self.compute)(&inputs);
                #[cfg(feature = "stats")]
                self.stats.record_miss();
                if history.record(inputs, result.clone()) {
                    #[cfg(feature = "stats")]
                    self.stats.record_eviction();
                }
                result
            }
        }
    }
}

/// Specialization for selectors whose computation returns `Result<T, E>`.
///
/// [`select`](MemoizedSelector::select) would happily cache an `Err` like any
/// other value. For fallible computations that is rarely wanted — retrying
/// the call might succeed — so this block provides a variant that refuses to
/// record failures.
impl<C, I, T: Clone, E: Clone> MemoizedSelector<C, I, Result<T, E>> {
    /// Invokes the selector, caching only `Ok` results.
    ///
    /// On a miss the computation runs as usual. An `Ok` value is recorded in
    /// the history; an `Err` is returned to the caller unchanged and the
    /// history keeps its previous length and contents, so a later call with
    /// the same inputs runs the computation again.
    ///
    /// # Examples
    ///
    /// ```
    /// use selectito::{extractors, SelectorFactory};
    ///
    /// let factory = SelectorFactory::new(2, selectito::equality::strict).unwrap();
    /// let parse = factory.make(
    ///     |inputs: &[String]| inputs[0].parse::<i32>().map_err(|e| e.to_string()),
    ///     extractors![|raw: &String| raw.clone()],
    /// );
    ///
    /// assert!(parse.select_ok(&"not a number".to_string()).is_err());
    /// assert_eq!(parse.select_ok(&"42".to_string()), Ok(42));
    /// // Only the successful parse was retained.
    /// assert_eq!(parse.history_len(), 1);
    /// ```
    pub fn select_ok(&self, context: &C) -> Result<T, E> {
        let inputs = self.extract(context);
        let mut history = self.history.lock();
        match history.lookup(inputs, self.equality.as_ref()) {
            Ok(result) => {
                #[cfg(feature = "stats")]
                self.stats.record_hit();
                result
            }
            Err(inputs) => {
                let result = (self.compute)(&inputs);
                #[cfg(feature = "stats")]
                self.stats.record_miss();
                if result.is_ok() && history.record(inputs, result.clone()) {
                    #[cfg(feature = "stats")]
                    self.stats.record_eviction();
                }
                result
            }
        }
    }
}

/// What a [`SelectorFactory`](crate::SelectorFactory) hands out.
///
/// With one or more extractors the factory produces
/// [`Memoized`](Selector::Memoized). With none, memoization has nothing to
/// vary over and the computation is passed through as
/// [`Plain`](Selector::Plain): no history, invoked afresh on every call.
///
/// The enum doubles as the engine's marker. Collaborators that need to
/// special-case cache-backed selectors inspect [`is_memoized`]
/// (or match on the variants) instead of probing an attribute at runtime.
///
/// [`is_memoized`]: Selector::is_memoized
pub enum Selector<C, I, R> {
    /// The computation itself, unwrapped and uncached.
    Plain(Computation<I, R>),
    /// A cache-backed selector with its own history.
    Memoized(MemoizedSelector<C, I, R>),
}

impl<C, I, R> Selector<C, I, R> {
    /// Whether this selector is a cache-backed product of the engine.
    ///
    /// `false` for the degenerate zero-extractor pass-through.
    pub fn is_memoized(&self) -> bool {
        matches!(self, Selector::Memoized(_))
    }

    /// Access to the memoized selector, when there is one.
    pub fn as_memoized(&self) -> Option<&MemoizedSelector<C, I, R>> {
        match self {
            Selector::Plain(_) => None,
            Selector::Memoized(selector) => Some(selector),
        }
    }

    /// Number of input combinations currently retained; zero for
    /// [`Plain`](Selector::Plain).
    pub fn history_len(&self) -> usize {
        match self {
            Selector::Plain(_) => 0,
            Selector::Memoized(selector) => selector.history_len(),
        }
    }
}

impl<C, I, R: Clone> Selector<C, I, R> {
    /// Invokes the selector for `context`.
    ///
    /// Dispatches to [`MemoizedSelector::select`] for the memoized variant;
    /// the plain variant runs the computation on an empty input tuple every
    /// time.
    pub fn select(&self, context: &C) -> R {
        match self {
            Selector::Plain(compute) => compute(&[]),
            Selector::Memoized(selector) => selector.select(context),
        }
    }
}

impl<C, I, T: Clone, E: Clone> Selector<C, I, Result<T, E>> {
    /// Invokes the selector, caching only `Ok` results.
    ///
    /// See [`MemoizedSelector::select_ok`]. The plain variant never caches
    /// anything, so it simply runs the computation.
    pub fn select_ok(&self, context: &C) -> Result<T, E> {
        match self {
            Selector::Plain(compute) => compute(&[]),
            Selector::Memoized(selector) => selector.select_ok(context),
        }
    }
}
