use std::sync::atomic::{AtomicU64, Ordering};

/// Hit/miss/eviction counters for one memoized selector.
///
/// Counters use atomic operations with `Relaxed` ordering: cheap to record,
/// consistent enough for monitoring. Cloning takes a snapshot; the clone does
/// not keep counting with the original.
///
/// # Examples
///
/// ```
/// use selectito::{extractors, SelectorFactory};
///
/// let factory = SelectorFactory::new(1, selectito::equality::strict).unwrap();
/// let selector = factory.make(
///     |inputs: &[u8]| inputs[0] as u16 + 1,
///     extractors![|b: &u8| *b],
/// );
/// let selector = selector.as_memoized().unwrap();
///
/// selector.select(&1); // miss
/// selector.select(&1); // hit
/// selector.select(&2); // miss, evicts the depth-1 history
///
/// let stats = selector.stats();
/// assert_eq!(stats.hits(), 1);
/// assert_eq!(stats.misses(), 2);
/// assert_eq!(stats.evictions(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SelectorStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl SelectorStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an invocation served from history.
    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an invocation that ran the computation.
    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records the drop of an oldest history entry.
    #[inline]
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Invocations served from history.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Invocations that ran the computation.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// History entries dropped to stay within the cache size.
    #[inline]
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Total invocations observed.
    #[inline]
    pub fn total_invocations(&self) -> u64 {
        self.hits() + self.misses()
    }

    /// Fraction of invocations served from history, 0.0 when none happened.
    #[inline]
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_invocations();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }
}

impl Clone for SelectorStats {
    fn clone(&self) -> Self {
        Self {
            hits: AtomicU64::new(self.hits()),
            misses: AtomicU64::new(self.misses()),
            evictions: AtomicU64::new(self.evictions()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = SelectorStats::new();
        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses(), 0);
        assert_eq!(stats.evictions(), 0);
        assert_eq!(stats.total_invocations(), 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_counters_accumulate() {
        let stats = SelectorStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.evictions(), 1);
        assert_eq!(stats.total_invocations(), 3);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let stats = SelectorStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();

        stats.reset();
        assert_eq!(stats.total_invocations(), 0);
        assert_eq!(stats.evictions(), 0);
    }

    #[test]
    fn test_clone_is_a_snapshot() {
        let stats = SelectorStats::new();
        stats.record_hit();

        let snapshot = stats.clone();
        stats.record_hit();

        assert_eq!(stats.hits(), 2);
        assert_eq!(snapshot.hits(), 1);
    }

    #[test]
    fn test_concurrent_recording() {
        use std::sync::Arc;
        use std::thread;

        let stats = Arc::new(SelectorStats::new());
        let mut handles = vec![];

        for _ in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    stats.record_hit();
                }
                for _ in 0..25 {
                    stats.record_miss();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.hits(), 800);
        assert_eq!(stats.misses(), 200);
        assert_eq!(stats.total_invocations(), 1000);
    }
}
