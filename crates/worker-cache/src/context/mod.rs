//! Execution-context lookup.
//!
//! The registry asks an [`ExecutionContext`] which distributed worker the
//! calling thread belongs to. Any error answer means "not inside a worker"
//! and selects the process-wide fallback store.
//!
//! Built-in sources:
//! - [`LocalContext`]: never a worker (single-process client)
//! - [`ThreadWorkerContext`]: identity bound to the current thread
//! - [`EnvWorkerContext`]: one identity per process, read from the environment
//!
//! Closures of the form `Fn() -> Result<WorkerId, ContextError>` also work.

mod env;
mod thread;

pub use env::EnvWorkerContext;
pub use thread::{ThreadWorkerContext, WorkerScope};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identity of a distributed worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WorkerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Why no worker identity is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("not running inside a distributed worker")]
    NotInWorker,

    #[error("worker lookup unavailable: {0}")]
    Unavailable(String),
}

/// Source of the calling thread's worker identity.
pub trait ExecutionContext: Send + Sync {
    /// The worker the calling thread runs in, or why there is none.
    fn current_worker(&self) -> Result<WorkerId, ContextError>;
}

impl<F> ExecutionContext for F
where
    F: Fn() -> Result<WorkerId, ContextError> + Send + Sync,
{
    fn current_worker(&self) -> Result<WorkerId, ContextError> {
        self()
    }
}

/// Context for a plain single-process setting: never a worker.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalContext;

impl ExecutionContext for LocalContext {
    fn current_worker(&self) -> Result<WorkerId, ContextError> {
        Err(ContextError::NotInWorker)
    }
}
