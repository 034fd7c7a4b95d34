//! Builder for configuring a `CacheRegistry`.

use super::CacheRegistry;
use crate::config::RegistryConfig;
use crate::context::{EnvWorkerContext, ExecutionContext, LocalContext};

/// Builder for configuring a [`CacheRegistry`].
///
/// # Example
///
/// ```
/// use worker_cache::{CacheRegistry, RegistryConfig};
///
/// let config = RegistryConfig::from_json(r#"{"worker_id_env": "MY_WORKER_ID"}"#).unwrap();
/// let registry = CacheRegistry::builder().config(config).env_context().build();
/// # let _ = registry;
/// ```
pub struct CacheRegistryBuilder {
    context: Option<Box<dyn ExecutionContext>>,
    config: RegistryConfig,
    use_env: bool,
}

impl CacheRegistryBuilder {
    pub fn new() -> Self {
        Self {
            context: None,
            config: RegistryConfig::default(),
            use_env: false,
        }
    }

    /// Resolve worker identity through `context`.
    ///
    /// Takes precedence over [`env_context`](Self::env_context).
    pub fn context(mut self, context: impl ExecutionContext + 'static) -> Self {
        self.context = Some(Box::new(context));
        self
    }

    /// Use `config` for environment-derived settings.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Read this process's worker identity from the environment variable
    /// named by the configuration.
    ///
    /// Default: off (every caller uses the fallback store)
    pub fn env_context(mut self) -> Self {
        self.use_env = true;
        self
    }

    /// Build the registry. No stores exist until the first acquisition.
    pub fn build(self) -> CacheRegistry {
        let context: Box<dyn ExecutionContext> = match self.context {
            Some(context) => context,
            None if self.use_env => Box::new(EnvWorkerContext::from_config(&self.config)),
            None => Box::new(LocalContext),
        };
        CacheRegistry::from_boxed(context)
    }
}

impl Default for CacheRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ThreadWorkerContext, WorkerId};
    use crate::registry::StoreKey;

    #[test]
    fn test_default_build_uses_fallback() {
        let registry = CacheRegistryBuilder::new().build();
        assert_eq!(registry.current_store_key(), StoreKey::Fallback);
    }

    #[test]
    fn test_env_context_reads_configured_var() {
        std::env::set_var("WORKER_CACHE_TEST_BUILDER_VAR", "env-worker");
        let registry = CacheRegistry::builder()
            .config(RegistryConfig {
                worker_id_env: "WORKER_CACHE_TEST_BUILDER_VAR".to_string(),
            })
            .env_context()
            .build();
        assert_eq!(
            registry.current_store_key(),
            StoreKey::Worker(WorkerId::new("env-worker"))
        );
    }

    #[test]
    fn test_explicit_context_wins_over_env() {
        std::env::set_var("WORKER_CACHE_TEST_BUILDER_OVERRIDE", "env-worker");
        let registry = CacheRegistry::builder()
            .config(RegistryConfig {
                worker_id_env: "WORKER_CACHE_TEST_BUILDER_OVERRIDE".to_string(),
            })
            .env_context()
            .context(ThreadWorkerContext)
            .build();
        assert_eq!(registry.current_store_key(), StoreKey::Fallback);
    }
}
