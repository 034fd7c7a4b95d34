//! Per-process worker identity taken from the environment.

use super::{ContextError, ExecutionContext, WorkerId};
use crate::config::RegistryConfig;
use tracing::debug;

/// Worker identity for processes launched one-per-worker.
///
/// The variable is read once at construction; an unset or blank value means
/// the process is not a worker.
#[derive(Debug, Clone)]
pub struct EnvWorkerContext {
    var: String,
    worker: Option<WorkerId>,
}

impl EnvWorkerContext {
    /// Read the variable named by `config.worker_id_env`.
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::from_var(&config.worker_id_env)
    }

    /// Read the worker identity from `var`.
    pub fn from_var(var: &str) -> Self {
        let worker = std::env::var(var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(WorkerId::from);

        match &worker {
            Some(id) => debug!("Worker identity {} read from {}", id, var),
            None => debug!("{} not set, running without a worker identity", var),
        }

        Self {
            var: var.to_string(),
            worker,
        }
    }

    /// Name of the variable this context was read from.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl ExecutionContext for EnvWorkerContext {
    fn current_worker(&self) -> Result<WorkerId, ContextError> {
        self.worker.clone().ok_or(ContextError::NotInWorker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable so parallel tests don't interfere.

    #[test]
    fn test_unset_var_is_not_a_worker() {
        let ctx = EnvWorkerContext::from_var("WORKER_CACHE_TEST_UNSET_VAR");
        assert_eq!(ctx.current_worker(), Err(ContextError::NotInWorker));
        assert_eq!(ctx.var(), "WORKER_CACHE_TEST_UNSET_VAR");
    }

    #[test]
    fn test_set_var_is_worker() {
        std::env::set_var("WORKER_CACHE_TEST_SET_VAR", " worker-7 ");
        let ctx = EnvWorkerContext::from_var("WORKER_CACHE_TEST_SET_VAR");
        assert_eq!(ctx.current_worker().unwrap().as_str(), "worker-7");
    }

    #[test]
    fn test_blank_var_is_not_a_worker() {
        std::env::set_var("WORKER_CACHE_TEST_BLANK_VAR", "   ");
        let ctx = EnvWorkerContext::from_var("WORKER_CACHE_TEST_BLANK_VAR");
        assert!(ctx.current_worker().is_err());
    }

    #[test]
    fn test_from_config_uses_configured_var() {
        std::env::set_var("WORKER_CACHE_TEST_CONFIG_VAR", "w-3");
        let config = RegistryConfig {
            worker_id_env: "WORKER_CACHE_TEST_CONFIG_VAR".to_string(),
        };
        let ctx = EnvWorkerContext::from_config(&config);
        assert_eq!(ctx.current_worker().unwrap(), WorkerId::new("w-3"));
    }
}
