//! Worker identity bound to the current thread.

use super::{ContextError, ExecutionContext, WorkerId};
use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    /// Worker the current thread is executing for, if any.
    static CURRENT_WORKER: RefCell<Option<WorkerId>> = const { RefCell::new(None) };
}

/// Reads the worker identity installed on the calling thread.
///
/// A worker's task threads call [`ThreadWorkerContext::enter`] before running
/// tasks; threads that never entered a scope resolve to the fallback store.
///
/// # Example
///
/// ```
/// use worker_cache::{ExecutionContext, ThreadWorkerContext, WorkerId};
///
/// let ctx = ThreadWorkerContext;
/// assert!(ctx.current_worker().is_err());
///
/// let _scope = ThreadWorkerContext::enter(WorkerId::new("worker-1"));
/// assert_eq!(ctx.current_worker().unwrap().as_str(), "worker-1");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadWorkerContext;

impl ThreadWorkerContext {
    /// Bind `worker` to the calling thread until the returned scope drops.
    ///
    /// Scopes nest; dropping one restores the identity that was active when
    /// it was entered.
    pub fn enter(worker: impl Into<WorkerId>) -> WorkerScope {
        let previous = CURRENT_WORKER.with(|slot| slot.borrow_mut().replace(worker.into()));
        WorkerScope {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl ExecutionContext for ThreadWorkerContext {
    fn current_worker(&self) -> Result<WorkerId, ContextError> {
        CURRENT_WORKER.with(|slot| slot.borrow().clone().ok_or(ContextError::NotInWorker))
    }
}

/// Guard restoring the previous thread identity on drop.
#[must_use = "the worker identity is cleared as soon as the scope is dropped"]
pub struct WorkerScope {
    previous: Option<WorkerId>,
    // The guard restores thread-local state, so it must stay on its thread.
    _not_send: PhantomData<*const ()>,
}

impl Drop for WorkerScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_WORKER.with(|slot| *slot.borrow_mut() = previous);
    }
}
