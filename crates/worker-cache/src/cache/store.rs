//! The set of named caches belonging to one execution context.

use super::named::NamedCache;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A named cache as held by a store. Guards keep their own reference, so a
/// cache removed from its store stays valid until the last guard drops.
pub(crate) type SharedCache = Arc<Mutex<NamedCache>>;

/// Mapping from cache name to named cache.
#[derive(Debug, Default)]
pub(crate) struct Store {
    caches: HashMap<String, SharedCache>,
}

impl Store {
    /// Look up `name`, creating an empty cache on first access.
    pub(crate) fn get_or_create(&mut self, name: &str) -> SharedCache {
        if let Some(cache) = self.caches.get(name) {
            return Arc::clone(cache);
        }
        debug!("Creating named cache '{}'", name);
        let cache = SharedCache::default();
        self.caches.insert(name.to_string(), Arc::clone(&cache));
        cache
    }

    /// Detach `name` from the store, handing the cache back to the caller.
    pub(crate) fn remove(&mut self, name: &str) -> Option<SharedCache> {
        self.caches.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.caches.contains_key(name)
    }

    /// Cache names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.caches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Entry count of `name`, or `None` while a guard on it is live.
    pub(crate) fn entry_count(&self, name: &str) -> Option<usize> {
        self.caches
            .get(name)?
            .try_lock()
            .map(|cache| cache.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_returns_same_cache() {
        let mut store = Store::default();
        let first = store.get_or_create("stats");
        let second = store.get_or_create("stats");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_distinct_names_are_distinct_caches() {
        let mut store = Store::default();
        let a = store.get_or_create("a");
        let b = store.get_or_create("b");
        assert!(!Arc::ptr_eq(&a, &b));
        a.lock().insert("k", 1_i32);
        assert!(b.lock().get::<i32>("k").is_none());
    }

    #[test]
    fn test_remove() {
        let mut store = Store::default();
        store.get_or_create("a");
        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_removed_cache_outlives_store_entry() {
        let mut store = Store::default();
        let cache = store.get_or_create("a");
        cache.lock().insert("k", 5_u8);
        store.remove("a");
        assert_eq!(cache.lock().get::<u8>("k"), Some(&5));
        assert!(store.get_or_create("a").lock().is_empty());
    }

    #[test]
    fn test_names_sorted() {
        let mut store = Store::default();
        store.get_or_create("zeta");
        store.get_or_create("alpha");
        assert_eq!(store.names(), vec!["alpha".to_string(), "zeta".to_string()]);
        assert!(store.contains("zeta"));
        assert!(!store.contains("beta"));
    }

    #[test]
    fn test_entry_count_skips_locked_cache() {
        let mut store = Store::default();
        let cache = store.get_or_create("a");
        cache.lock().insert("k", 1_u8);
        assert_eq!(store.entry_count("a"), Some(1));

        let _held = cache.lock();
        assert_eq!(store.entry_count("a"), None);
        assert_eq!(store.entry_count("missing"), None);
    }
}
