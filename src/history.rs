//! Bounded invocation history for a memoized selector.
//!
//! The history is an oldest-first sequence of `(input tuple, result)` pairs
//! capped at the configured cache size. Lookup scans newest to oldest so the
//! most recently used input pattern is matched first; a hit anywhere else is
//! promoted to the newest slot; overflow always drops the oldest entry.
//!
//! The scan is deliberately linear. The comparator is caller-supplied and is
//! not required to be hashable or even reflexive, so no index can be built on
//! top of it. Cache sizes are expected to be small.

use std::collections::VecDeque;

/// One retained `(input tuple, result)` pair.
pub(crate) struct HistoryEntry<I, R> {
    pub(crate) inputs: Box<[I]>,
    pub(crate) result: R,
}

/// Oldest-first entry sequence with a hard length cap.
pub(crate) struct History<I, R> {
    entries: VecDeque<HistoryEntry<I, R>>,
    cache_size: usize,
}

impl<I, R> History<I, R> {
    pub(crate) fn new(cache_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cache_size),
            cache_size,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Looks up `inputs`, promoting the matched entry to the newest slot.
    ///
    /// On a hit returns `Ok` with a clone of the cached result. On a miss the
    /// input tuple is handed back unchanged in `Err` so the caller can compute
    /// and [`record`](Self::record) it; history is not touched on a miss.
    pub(crate) fn lookup<F>(&mut self, inputs: Box<[I]>, equal: F) -> Result<R, Box<[I]>>
    where
        R: Clone,
        F: Fn(&I, &I) -> bool,
    {
        let index = match self.find(&inputs, &equal) {
            Some(index) => index,
            None => return Err(inputs),
        };

        if index + 1 == self.entries.len() {
            // Already the newest entry: leave history untouched.
            if let Some(entry) = self.entries.back() {
                return Ok(entry.result.clone());
            }
            return Err(inputs);
        }

        match self.entries.remove(index) {
            Some(mut entry) => {
                // Re-append under the freshly extracted inputs: the matched
                // tuple may differ from them under a weak comparator.
                entry.inputs = inputs;
                let result = entry.result.clone();
                self.entries.push_back(entry);
                Ok(result)
            }
            None => Err(inputs),
        }
    }

    /// Appends a freshly computed pair at the newest slot, evicting the
    /// oldest entry when the cap is exceeded. Returns whether an eviction
    /// happened.
    pub(crate) fn record(&mut self, inputs: Box<[I]>, result: R) -> bool {
        self.entries.push_back(HistoryEntry { inputs, result });
        if self.entries.len() > self.cache_size {
            self.entries.pop_front();
            return true;
        }
        false
    }

    /// Newest-to-oldest scan for the first fully equal input tuple.
    ///
    /// Equality is per position and short-circuiting: the first unequal
    /// position disqualifies an entry and the scan moves to the next-older
    /// one. When several entries are equal under a weak comparator, the most
    /// recent one wins.
    fn find<F>(&self, inputs: &[I], equal: &F) -> Option<usize>
    where
        F: Fn(&I, &I) -> bool,
    {
        for (index, entry) in self.entries.iter().enumerate().rev() {
            let matches = inputs
                .iter()
                .zip(entry.inputs.iter())
                .all(|(current, cached)| equal(current, cached));
            if matches {
                return Some(index);
            }
        }
        None
    }

    #[cfg(test)]
    fn newest_inputs(&self) -> Option<&[I]> {
        self.entries.back().map(|entry| &*entry.inputs)
    }

    #[cfg(test)]
    fn oldest_inputs(&self) -> Option<&[I]> {
        self.entries.front().map(|entry| &*entry.inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(values: &[i32]) -> Box<[i32]> {
        values.to_vec().into_boxed_slice()
    }

    fn eq(a: &i32, b: &i32) -> bool {
        a == b
    }

    #[test]
    fn test_empty_history_misses() {
        let mut history: History<i32, &str> = History::new(3);
        let back = history.lookup(boxed(&[1, 2]), eq).unwrap_err();
        assert_eq!(&*back, &[1, 2]);
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_record_then_hit() {
        let mut history = History::new(3);
        assert!(!history.record(boxed(&[1, 2]), "r12"));
        assert_eq!(history.lookup(boxed(&[1, 2]), eq), Ok("r12"));
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = History::new(2);
        assert!(!history.record(boxed(&[1]), "a"));
        assert!(!history.record(boxed(&[2]), "b"));
        assert!(history.record(boxed(&[3]), "c"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.oldest_inputs(), Some(&[2][..]));
        assert!(history.lookup(boxed(&[1]), eq).is_err());
    }

    #[test]
    fn test_hit_promotes_to_newest() {
        let mut history = History::new(3);
        history.record(boxed(&[1]), "a");
        history.record(boxed(&[2]), "b");
        history.record(boxed(&[3]), "c");

        assert_eq!(history.lookup(boxed(&[1]), eq), Ok("a"));
        assert_eq!(history.newest_inputs(), Some(&[1][..]));
        assert_eq!(history.oldest_inputs(), Some(&[2][..]));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_newest_hit_leaves_order_alone() {
        let mut history = History::new(3);
        history.record(boxed(&[1]), "a");
        history.record(boxed(&[2]), "b");

        assert_eq!(history.lookup(boxed(&[2]), eq), Ok("b"));
        assert_eq!(history.oldest_inputs(), Some(&[1][..]));
        assert_eq!(history.newest_inputs(), Some(&[2][..]));
    }

    #[test]
    fn test_weak_comparator_prefers_most_recent_match() {
        // Sign-only equality: every non-negative number matches every other.
        let same_sign = |a: &i32, b: &i32| (*a >= 0) == (*b >= 0);

        let mut history = History::new(3);
        history.record(boxed(&[1]), "old");
        history.record(boxed(&[-5]), "negative");
        history.record(boxed(&[7]), "recent");

        assert_eq!(history.lookup(boxed(&[100]), same_sign), Ok("recent"));
    }

    #[test]
    fn test_per_position_short_circuit() {
        let mut history = History::new(3);
        history.record(boxed(&[1, 2]), "a");

        // First position differs, entry disqualified.
        assert!(history.lookup(boxed(&[9, 2]), eq).is_err());
        // Second position differs, entry disqualified.
        assert!(history.lookup(boxed(&[1, 9]), eq).is_err());
    }

    #[test]
    fn test_promotion_stores_current_inputs() {
        // A weak comparator can match a tuple that differs from the cached
        // one; promotion must re-store the tuple the caller just supplied.
        let same_sign = |a: &i32, b: &i32| (*a >= 0) == (*b >= 0);

        let mut history = History::new(2);
        history.record(boxed(&[3]), "positive");
        history.record(boxed(&[-1]), "negative");

        assert_eq!(history.lookup(boxed(&[8]), same_sign), Ok("positive"));
        assert_eq!(history.newest_inputs(), Some(&[8][..]));
    }
}
