//! Keyed selective recomputation above any number of selectors.
//!
//! A consumer often holds several named derivations together, each with its
//! own positional parameter list recomputed from an external context, and
//! wants to re-invoke a derivation only when its parameters actually changed.
//! [`SelectionMap`] layers that per-key shallow diff on top of plain closures
//! or engine-built selectors; it never reaches into a selector's internal
//! history.
//!
//! Diff policy:
//!
//! - parameters are compared element-wise with `PartialEq`; lists of
//!   different lengths always count as changed;
//! - a key seen for the first time is computed fresh;
//! - a key absent from the current refresh is dropped along with its cached
//!   parameters and value.

use std::collections::HashMap;
use std::sync::Arc;

/// One named derivation: a key, its current positional parameters, and the
/// function deriving a value from them.
///
/// # Examples
///
/// ```
/// use selectito::KeyedSelection;
///
/// let selection = KeyedSelection::new("sum", vec![2, 3], |params: &[i32]| {
///     params.iter().sum::<i32>()
/// });
/// assert_eq!(selection.key, "sum");
/// ```
pub struct KeyedSelection<I, R> {
    /// Name the derived value is published under.
    pub key: String,
    /// Positional parameter list for this refresh.
    pub params: Vec<I>,
    /// Derivation over the parameter slice.
    pub select: Arc<dyn Fn(&[I]) -> R + Send + Sync>,
}

impl<I, R> KeyedSelection<I, R> {
    /// Creates a keyed selection from a key, parameters, and a derivation.
    pub fn new<F>(key: impl Into<String>, params: Vec<I>, select: F) -> Self
    where
        F: Fn(&[I]) -> R + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            params,
            select: Arc::new(select),
        }
    }
}

struct Retained<I, R> {
    params: Vec<I>,
    value: R,
}

/// Per-key shallow diff over successive refreshes.
///
/// Each [`refresh`](SelectionMap::refresh) takes the full current set of
/// keyed selections, reuses every derived value whose parameters are
/// unchanged, and re-invokes the rest.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use selectito::{KeyedSelection, SelectionMap};
///
/// let runs = Arc::new(AtomicUsize::new(0));
/// let mut map = SelectionMap::new();
///
/// let selections = |a: i32, runs: Arc<AtomicUsize>| {
///     vec![KeyedSelection::new("double", vec![a], move |params: &[i32]| {
///         runs.fetch_add(1, Ordering::SeqCst);
///         params[0] * 2
///     })]
/// };
///
/// let out = map.refresh(selections(4, Arc::clone(&runs)));
/// assert_eq!(out["double"], 8);
///
/// // Unchanged parameters: the previous value is reused.
/// map.refresh(selections(4, Arc::clone(&runs)));
/// assert_eq!(runs.load(Ordering::SeqCst), 1);
///
/// // Changed parameters: the derivation runs again.
/// let out = map.refresh(selections(5, Arc::clone(&runs)));
/// assert_eq!(out["double"], 10);
/// assert_eq!(runs.load(Ordering::SeqCst), 2);
/// ```
pub struct SelectionMap<I, R> {
    retained: HashMap<String, Retained<I, R>>,
}

impl<I, R> SelectionMap<I, R> {
    /// Creates an empty map; the first refresh computes every key.
    pub fn new() -> Self {
        Self {
            retained: HashMap::new(),
        }
    }

    /// Number of keys currently retained.
    pub fn len(&self) -> usize {
        self.retained.len()
    }

    /// Whether no keys are retained.
    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }

    /// Drops all retained parameters and values.
    pub fn clear(&mut self) {
        self.retained.clear();
    }

    /// The currently retained value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&R> {
        self.retained.get(key).map(|entry| &entry.value)
    }
}

impl<I: PartialEq, R: Clone> SelectionMap<I, R> {
    /// Applies one refresh and returns the derived value per key.
    ///
    /// For every selection whose key was present in the previous refresh with
    /// element-wise equal parameters, the previous value is reused without
    /// re-invoking the derivation. Everything else is (re)computed. Keys not
    /// present in `selections` are forgotten.
    pub fn refresh(&mut self, selections: Vec<KeyedSelection<I, R>>) -> HashMap<String, R> {
        let mut next = HashMap::with_capacity(selections.len());
        let mut output = HashMap::with_capacity(selections.len());

        for selection in selections {
            let value = match self.retained.get(&selection.key) {
                Some(previous) if params_unchanged(&previous.params, &selection.params) => {
                    previous.value.clone()
                }
                _ => (selection.select)(&selection.params),
            };
            output.insert(selection.key.clone(), value.clone());
            next.insert(
                selection.key,
                Retained {
                    params: selection.params,
                    value,
                },
            );
        }

        self.retained = next;
        output
    }
}

impl<I, R> Default for SelectionMap<I, R> {
    fn default() -> Self {
        Self::new()
    }
}

fn params_unchanged<I: PartialEq>(previous: &[I], current: &[I]) -> bool {
    previous.len() == current.len()
        && previous
            .iter()
            .zip(current.iter())
            .all(|(old, new)| old == new)
}
