//! Global registry for selector statistics.
//!
//! Selectors built with
//! [`SelectorFactory::make_named`](crate::SelectorFactory::make_named)
//! publish their counters here, indexed by name, so monitoring code can read
//! hit rates without holding the selector instances themselves.
//!
//! Registering a second selector under an existing name replaces the previous
//! handle; callers that build selectors in a loop should pick distinct names.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::stats::SelectorStats;

static REGISTRY: Lazy<RwLock<HashMap<String, Arc<SelectorStats>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a selector's statistics handle under `name`.
///
/// Called by [`SelectorFactory::make_named`](crate::SelectorFactory::make_named);
/// it can also be used directly when a selector's stats handle is obtained
/// another way.
pub fn register(name: &str, stats: Arc<SelectorStats>) {
    let mut registry = REGISTRY.write();
    registry.insert(name.to_string(), stats);
}

/// Returns the live statistics handle for `name`, if registered.
///
/// The handle keeps counting: readings taken later reflect invocations that
/// happened in between.
///
/// # Examples
///
/// ```
/// use selectito::{extractors, stats_registry, SelectorFactory};
///
/// let factory = SelectorFactory::new(1, selectito::equality::strict).unwrap();
/// let selector = factory.make_named(
///     "session_count",
///     |inputs: &[u32]| inputs[0] + 1,
///     extractors![|n: &u32| *n],
/// );
///
/// selector.select(&7);
/// let stats = stats_registry::get("session_count").unwrap();
/// assert_eq!(stats.misses(), 1);
/// assert!(stats_registry::get("unknown").is_none());
/// # stats_registry::unregister("session_count");
/// ```
pub fn get(name: &str) -> Option<Arc<SelectorStats>> {
    let registry = REGISTRY.read();
    registry.get(name).map(Arc::clone)
}

/// Returns a point-in-time copy of the statistics for `name`.
pub fn snapshot(name: &str) -> Option<SelectorStats> {
    let registry = REGISTRY.read();
    registry.get(name).map(|stats| (**stats).clone())
}

/// Lists all registered selector names, in no particular order.
pub fn list() -> Vec<String> {
    let registry = REGISTRY.read();
    registry.keys().cloned().collect()
}

/// Removes `name` from the registry. Returns whether it was present.
///
/// The selector itself is unaffected; only the registry entry goes away.
pub fn unregister(name: &str) -> bool {
    let mut registry = REGISTRY.write();
    registry.remove(name).is_some()
}

/// Empties the registry.
pub fn clear() {
    let mut registry = REGISTRY.write();
    registry.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_register_and_get() {
        clear();
        let stats = Arc::new(SelectorStats::new());
        stats.record_hit();
        register("reg_test_a", Arc::clone(&stats));

        let fetched = get("reg_test_a").unwrap();
        assert_eq!(fetched.hits(), 1);

        // Live handle: later recordings are visible through the registry.
        stats.record_hit();
        assert_eq!(fetched.hits(), 2);
        clear();
    }

    #[test]
    #[serial]
    fn test_snapshot_is_detached() {
        clear();
        let stats = Arc::new(SelectorStats::new());
        register("reg_test_b", Arc::clone(&stats));

        let frozen = snapshot("reg_test_b").unwrap();
        stats.record_miss();
        assert_eq!(frozen.misses(), 0);
        clear();
    }

    #[test]
    #[serial]
    fn test_list_and_unregister() {
        clear();
        register("reg_test_c", Arc::new(SelectorStats::new()));
        register("reg_test_d", Arc::new(SelectorStats::new()));

        let mut names = list();
        names.sort();
        assert_eq!(names, vec!["reg_test_c", "reg_test_d"]);

        assert!(unregister("reg_test_c"));
        assert!(!unregister("reg_test_c"));
        assert_eq!(list(), vec!["reg_test_d"]);
        clear();
    }

    #[test]
    #[serial]
    fn test_reregistering_replaces_handle() {
        clear();
        let first = Arc::new(SelectorStats::new());
        first.record_hit();
        register("reg_test_e", first);

        register("reg_test_e", Arc::new(SelectorStats::new()));
        assert_eq!(get("reg_test_e").unwrap().hits(), 0);
        clear();
    }
}
