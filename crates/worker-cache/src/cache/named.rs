//! Type-erased key/value mapping handed to callers.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Boxed value as stored in a [`NamedCache`].
pub type CacheValue = Box<dyn Any + Send>;

/// A mutable mapping from string keys to values of any `Send` type.
///
/// Callers decide what goes in; typed accessors return `None` when the key
/// is missing or holds a value of a different type.
#[derive(Default)]
pub struct NamedCache {
    entries: HashMap<String, CacheValue>,
}

impl NamedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`, returning the previous value if any.
    pub fn insert<T: Any + Send>(&mut self, key: impl Into<String>, value: T) -> Option<CacheValue> {
        self.entries.insert(key.into(), Box::new(value))
    }

    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries.get(key)?.downcast_ref::<T>()
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)?.downcast_mut::<T>()
    }

    /// Return the value under `key`, computing and storing it first if absent.
    ///
    /// Returns `None` if `key` already holds a value of another type; that
    /// value is left in place and `init` is not called.
    pub fn get_or_insert_with<T, F>(&mut self, key: &str, init: F) -> Option<&mut T>
    where
        T: Any + Send,
        F: FnOnce() -> T,
    {
        self.entries
            .entry(key.to_string())
            .or_insert_with(|| Box::new(init()))
            .downcast_mut::<T>()
    }

    /// Remove `key`, returning the boxed value.
    pub fn remove(&mut self, key: &str) -> Option<CacheValue> {
        self.entries.remove(key)
    }

    /// Remove `key` and return its value if it has type `T`.
    ///
    /// A value of another type is left in place.
    pub fn take<T: Any>(&mut self, key: &str) -> Option<T> {
        if !self.entries.get(key)?.is::<T>() {
            return None;
        }
        let boxed = self.entries.remove(key)?;
        boxed.downcast::<T>().ok().map(|value| *value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for NamedCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("NamedCache").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut cache = NamedCache::new();
        assert!(cache.insert("mean", 4.5_f64).is_none());
        assert_eq!(cache.get::<f64>("mean"), Some(&4.5));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_wrong_type_is_none() {
        let mut cache = NamedCache::new();
        cache.insert("count", 10_u64);
        assert!(cache.get::<String>("count").is_none());
        assert!(cache.contains_key("count"));
    }

    #[test]
    fn test_insert_returns_previous() {
        let mut cache = NamedCache::new();
        cache.insert("k", 1_i32);
        let previous = cache.insert("k", 2_i32).unwrap();
        assert_eq!(previous.downcast_ref::<i32>(), Some(&1));
        assert_eq!(cache.get::<i32>("k"), Some(&2));
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut cache = NamedCache::new();
        cache.insert("categories", vec!["a".to_string()]);
        cache
            .get_mut::<Vec<String>>("categories")
            .unwrap()
            .push("b".to_string());
        assert_eq!(cache.get::<Vec<String>>("categories").unwrap().len(), 2);
    }

    #[test]
    fn test_get_or_insert_with_runs_init_once() {
        let mut cache = NamedCache::new();
        let mut calls = 0;
        for _ in 0..2 {
            let hits = cache
                .get_or_insert_with("hits", || {
                    calls += 1;
                    0_u32
                })
                .unwrap();
            *hits += 1;
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.get::<u32>("hits"), Some(&2));
    }

    #[test]
    fn test_get_or_insert_with_keeps_other_type() {
        let mut cache = NamedCache::new();
        cache.insert("v", "text");
        let mut called = false;
        let value = cache.get_or_insert_with("v", || {
            called = true;
            7_i64
        });
        assert!(value.is_none());
        assert!(!called);
        assert_eq!(cache.get::<&str>("v"), Some(&"text"));
    }

    #[test]
    fn test_take_checks_type() {
        let mut cache = NamedCache::new();
        cache.insert("stats", (1.0_f64, 2.0_f64));
        assert!(cache.take::<String>("stats").is_none());
        assert!(cache.contains_key("stats"));
        assert_eq!(cache.take::<(f64, f64)>("stats"), Some((1.0, 2.0)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cache = NamedCache::new();
        cache.insert("a", 1_u8);
        cache.insert("b", 2_u8);
        assert!(cache.remove("a").is_some());
        assert!(cache.remove("a").is_none());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_debug_lists_sorted_keys() {
        let mut cache = NamedCache::new();
        cache.insert("b", 1_u8);
        cache.insert("a", 1_u8);
        assert_eq!(format!("{:?}", cache), r#"NamedCache { keys: ["a", "b"] }"#);
    }
}
