//! Snapshot types describing registry contents.

use serde::{Deserialize, Serialize};

/// Metadata about one named cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMeta {
    /// Cache name.
    pub name: String,
    /// Number of entries, or `None` if the cache was held by a guard when
    /// the snapshot was taken.
    pub entry_count: Option<usize>,
}

/// Metadata about one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Worker identity, or `None` for the process-wide fallback store.
    pub worker: Option<String>,
    /// Per-cache metadata, sorted by name.
    pub caches: Vec<CacheMeta>,
}

/// Statistics across all stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Number of stores currently allocated.
    pub store_count: usize,
    /// Total number of named caches across all stores.
    pub cache_count: usize,
    /// Per-store statistics; the fallback store comes first, then workers
    /// sorted by identity.
    pub stores: Vec<StoreStats>,
}
