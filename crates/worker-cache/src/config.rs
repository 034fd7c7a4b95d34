//! Configuration for the cache registry.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Registry-level configuration.
///
/// Only consulted when the registry is built with an environment-derived
/// execution context; all other settings are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RegistryConfig {
    /// Environment variable holding this process's worker identity.
    pub worker_id_env: String,
}

impl RegistryConfig {
    /// Default environment variable for the worker identity.
    pub const DEFAULT_WORKER_ID_ENV: &'static str = "WORKER_CACHE_WORKER_ID";

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            worker_id_env: Self::DEFAULT_WORKER_ID_ENV.to_string(),
        }
    }
}
