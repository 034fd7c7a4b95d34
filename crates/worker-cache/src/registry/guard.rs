//! Scoped access to a named cache.

use super::{StoreKey, Stores};
use crate::cache::NamedCache;
use parking_lot::{ArcMutexGuard, RawMutex, ReentrantMutexGuard};
use std::cell::RefCell;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Exclusive access to one named cache.
///
/// Holds the registry lock for its whole lifetime; dropping the guard
/// releases it on every exit path.
pub struct CacheGuard<'a> {
    // Field order is drop order: the cache is unlocked before the registry.
    cache: ArcMutexGuard<RawMutex, NamedCache>,
    name: String,
    store: StoreKey,
    _registry: ReentrantMutexGuard<'a, RefCell<Stores>>,
}

impl<'a> CacheGuard<'a> {
    pub(super) fn new(
        name: &str,
        store: StoreKey,
        cache: ArcMutexGuard<RawMutex, NamedCache>,
        registry: ReentrantMutexGuard<'a, RefCell<Stores>>,
    ) -> Self {
        Self {
            cache,
            name: name.to_string(),
            store,
            _registry: registry,
        }
    }

    /// Name the cache was acquired under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store the cache belongs to.
    pub fn store(&self) -> &StoreKey {
        &self.store
    }
}

impl Deref for CacheGuard<'_> {
    type Target = NamedCache;

    fn deref(&self) -> &NamedCache {
        &self.cache
    }
}

impl DerefMut for CacheGuard<'_> {
    fn deref_mut(&mut self) -> &mut NamedCache {
        &mut self.cache
    }
}

impl fmt::Debug for CacheGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheGuard")
            .field("name", &self.name)
            .field("store", &self.store)
            .field("cache", &*self.cache)
            .finish()
    }
}
