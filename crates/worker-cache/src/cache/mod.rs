//! Store and named-cache building blocks.
//!
//! A store maps cache names to [`NamedCache`]s. The registry keeps one
//! store per execution context and hands out named caches through guards.

mod named;
mod stats;
mod store;

pub use named::{CacheValue, NamedCache};
pub use stats::{CacheMeta, RegistryStats, StoreStats};
pub(crate) use store::Store;
