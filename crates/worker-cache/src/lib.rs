//! Worker Cache - per-worker named caches for distributed data processing.
//!
//! Tasks that run on the same worker often need the same transient state
//! (fitted statistics, category mappings, lookup tables). This crate gives
//! each worker its own set of named caches so that state is computed once
//! per worker, without leaking between workers. Code running outside any
//! worker shares a single process-wide fallback store.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use worker_cache::{CacheRegistry, ThreadWorkerContext, WorkerId};
//!
//! let registry = Arc::new(CacheRegistry::with_context(ThreadWorkerContext));
//!
//! let worker = {
//!     let registry = Arc::clone(&registry);
//!     std::thread::spawn(move || {
//!         let _scope = ThreadWorkerContext::enter(WorkerId::new("worker-0"));
//!         registry
//!             .with_cache("stats", |stats| {
//!                 if let Some(rows) = stats.get_or_insert_with("rows", || 0_u64) {
//!                     *rows += 128;
//!                 }
//!             })
//!             .unwrap();
//!     })
//! };
//! worker.join().unwrap();
//!
//! // The client thread resolves to the fallback store and sees nothing.
//! assert!(!registry.contains("stats"));
//! assert!(registry.retire_worker(&WorkerId::new("worker-0")));
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod registry;

// Re-export commonly used types
pub use cache::{CacheMeta, CacheValue, NamedCache, RegistryStats, StoreStats};
pub use config::RegistryConfig;
pub use context::{
    ContextError, EnvWorkerContext, ExecutionContext, LocalContext, ThreadWorkerContext, WorkerId,
    WorkerScope,
};
pub use error::{Result, WorkerCacheError};
pub use registry::{CacheGuard, CacheRegistry, CacheRegistryBuilder, StoreKey};
