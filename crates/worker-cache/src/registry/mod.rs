//! Context-scoped cache registry.
//!
//! The registry owns one store per execution context: one
//! per distributed worker, plus a single fallback store used whenever the
//! calling thread is not inside a worker. All structural changes (creating a
//! store, creating or deleting a named cache) happen under one reentrant
//! lock, and a [`CacheGuard`] keeps that lock held for as long as the caller
//! works with the cache it returned.
//!
//! # Example
//!
//! ```
//! use worker_cache::CacheRegistry;
//!
//! # fn main() -> worker_cache::Result<()> {
//! let registry = CacheRegistry::new();
//!
//! {
//!     let mut stats = registry.acquire("stats")?;
//!     stats.insert("mean", 3.5_f64);
//! }
//!
//! let mean = registry.with_cache("stats", |stats| stats.get::<f64>("mean").copied())?;
//! assert_eq!(mean, Some(3.5));
//!
//! registry.release_all()?;
//! assert!(!registry.contains("stats"));
//! # Ok(())
//! # }
//! ```

mod builder;
mod guard;

pub use builder::CacheRegistryBuilder;
pub use guard::CacheGuard;

use crate::cache::{CacheMeta, NamedCache, RegistryStats, Store, StoreStats};
use crate::context::{ExecutionContext, LocalContext, WorkerId};
use crate::error::{Result, WorkerCacheError};
use parking_lot::ReentrantMutex;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Identifies which store applies to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKey {
    /// Process-wide store used outside any worker.
    Fallback,
    /// Store owned by one distributed worker.
    Worker(WorkerId),
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::Fallback => f.write_str("fallback"),
            StoreKey::Worker(id) => write!(f, "worker {}", id),
        }
    }
}

pub(crate) type Stores = HashMap<StoreKey, Store>;

/// Registry of per-context named caches.
///
/// Construct one per process and share it (for example behind an `Arc`)
/// with every code path that needs worker-local state.
pub struct CacheRegistry {
    context: Box<dyn ExecutionContext>,
    stores: ReentrantMutex<RefCell<Stores>>,
}

impl CacheRegistry {
    /// Registry for a plain single-process setting: every caller shares the
    /// fallback store.
    pub fn new() -> Self {
        Self::with_context(LocalContext)
    }

    /// Registry resolving worker identity through `context`.
    pub fn with_context(context: impl ExecutionContext + 'static) -> Self {
        Self::from_boxed(Box::new(context))
    }

    pub(crate) fn from_boxed(context: Box<dyn ExecutionContext>) -> Self {
        Self {
            context,
            stores: ReentrantMutex::new(RefCell::new(Stores::new())),
        }
    }

    pub fn builder() -> CacheRegistryBuilder {
        CacheRegistryBuilder::new()
    }

    /// The store the calling thread resolves to right now.
    ///
    /// A failed worker lookup is not an error; it selects the fallback store.
    pub fn current_store_key(&self) -> StoreKey {
        match self.context.current_worker() {
            Ok(worker) => StoreKey::Worker(worker),
            Err(e) => {
                trace!("No worker context ({}), using fallback store", e);
                StoreKey::Fallback
            }
        }
    }

    /// Get the named cache `name` for the current context, creating the
    /// store and the cache on first use.
    ///
    /// The registry lock stays held until the returned guard is dropped, so
    /// other threads block on any registry operation in the meantime. The
    /// lock is reentrant: the same thread may acquire other names while
    /// holding a guard, but not the same name twice.
    pub fn acquire(&self, name: &str) -> Result<CacheGuard<'_>> {
        if name.is_empty() {
            return Err(WorkerCacheError::InvalidName);
        }

        let lock = self.stores.lock();
        let key = self.current_store_key();
        let shared = {
            let mut stores = lock.borrow_mut();
            let store = stores.entry(key.clone()).or_insert_with(|| {
                debug!("Creating store for {}", key);
                Store::default()
            });
            store.get_or_create(name)
        };

        // Every guard holds the registry lock, so a cache that is already
        // locked is held further up this thread's stack.
        let cache = shared
            .try_lock_arc()
            .ok_or_else(|| WorkerCacheError::CacheInUse {
                name: name.to_string(),
            })?;

        trace!("Acquired named cache '{}' in {} store", name, key);
        Ok(CacheGuard::new(name, key, cache, lock))
    }

    /// Run `f` with the named cache `name`, releasing the lock afterwards.
    pub fn with_cache<R>(&self, name: &str, f: impl FnOnce(&mut NamedCache) -> R) -> Result<R> {
        let mut guard = self.acquire(name)?;
        Ok(f(&mut guard))
    }

    /// Delete cached state for the current context.
    ///
    /// With a name, removes that named cache from the current store; this
    /// fails with [`WorkerCacheError::KeyNotFound`] if the store exists but
    /// does not hold `name`. The fallback store is exempt while it is empty.
    /// Without a name, discards the whole store; the next
    /// [`acquire`](Self::acquire) starts from an empty one. Neither form
    /// creates a store, and both are no-ops when the store is absent.
    ///
    /// Removed caches are dropped after the registry state is unborrowed, so
    /// cached values may call back into the registry from their `Drop`.
    pub fn release(&self, name: Option<&str>) -> Result<()> {
        if name.is_some_and(str::is_empty) {
            return Err(WorkerCacheError::InvalidName);
        }

        let lock = self.stores.lock();
        let key = self.current_store_key();

        match name {
            Some(name) => {
                let removed = {
                    let mut stores = lock.borrow_mut();
                    let Some(store) = stores.get_mut(&key) else {
                        return Ok(());
                    };
                    if key == StoreKey::Fallback && store.is_empty() {
                        return Ok(());
                    }
                    store.remove(name).ok_or_else(|| WorkerCacheError::KeyNotFound {
                        name: name.to_string(),
                    })?
                };
                debug!("Released named cache '{}' from {} store", name, key);
                drop(removed);
            }
            None => {
                let removed = lock.borrow_mut().remove(&key);
                if let Some(store) = removed {
                    debug!("Released {} store ({} caches)", key, store.len());
                    drop(store);
                }
            }
        }

        Ok(())
    }

    /// Shorthand for `release(Some(name))`.
    pub fn release_cache(&self, name: &str) -> Result<()> {
        self.release(Some(name))
    }

    /// Shorthand for `release(None)`.
    pub fn release_all(&self) -> Result<()> {
        self.release(None)
    }

    /// Drop the store of a worker that has shut down.
    ///
    /// Returns `true` if the worker had a store.
    pub fn retire_worker(&self, worker: &WorkerId) -> bool {
        let lock = self.stores.lock();
        let removed = lock.borrow_mut().remove(&StoreKey::Worker(worker.clone()));
        match removed {
            Some(store) => {
                debug!("Retired store for worker {}", worker);
                drop(store);
                true
            }
            None => false,
        }
    }

    /// Drop every store, worker and fallback alike.
    pub fn reset(&self) {
        let lock = self.stores.lock();
        let stores = std::mem::take(&mut *lock.borrow_mut());
        debug!("Resetting cache registry ({} stores)", stores.len());
        drop(stores);
    }

    /// Whether the current context's store holds a cache named `name`.
    pub fn contains(&self, name: &str) -> bool {
        let lock = self.stores.lock();
        let key = self.current_store_key();
        let stores = lock.borrow();
        stores.get(&key).is_some_and(|store| store.contains(name))
    }

    /// Cache names in the current context's store, sorted.
    pub fn cache_names(&self) -> Vec<String> {
        let lock = self.stores.lock();
        let key = self.current_store_key();
        let stores = lock.borrow();
        stores.get(&key).map(Store::names).unwrap_or_default()
    }

    /// Snapshot of every store and the caches inside it.
    pub fn stats(&self) -> RegistryStats {
        let lock = self.stores.lock();
        let stores = lock.borrow();

        let mut keys: Vec<&StoreKey> = stores.keys().collect();
        keys.sort();

        let snapshots: Vec<StoreStats> = keys
            .into_iter()
            .filter_map(|key| {
                let store = stores.get(key)?;
                let caches = store
                    .names()
                    .into_iter()
                    .map(|name| CacheMeta {
                        entry_count: store.entry_count(&name),
                        name,
                    })
                    .collect();
                Some(StoreStats {
                    worker: match key {
                        StoreKey::Fallback => None,
                        StoreKey::Worker(id) => Some(id.to_string()),
                    },
                    caches,
                })
            })
            .collect();

        RegistryStats {
            store_count: snapshots.len(),
            cache_count: snapshots.iter().map(|s| s.caches.len()).sum(),
            stores: snapshots,
        }
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheRegistry").finish_non_exhaustive()
    }
}
