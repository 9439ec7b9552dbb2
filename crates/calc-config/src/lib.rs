//! Environment-variable configuration for the calculation service.
//!
//! Loaded with [`ServiceConfig::load`], sourced from the process
//! environment rather than a file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading [`ServiceConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration from the environment: {0}")]
    Load(#[from] figment::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Runtime configuration for `calc-server`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Listening port. Defaults to `8080`.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of an external scheme registry exposing
    /// `GET /schemes/{scheme_id}`. When unset, the engine uses the default
    /// accrual rate for every scheme.
    #[serde(default)]
    pub scheme_registry_url: Option<String>,
}

fn default_port() -> u16 {
    8080
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            scheme_registry_url: None,
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from `PORT` and `SCHEME_REGISTRY_URL`, falling
    /// back to [`ServiceConfig::default`] for anything unset.
    pub fn load() -> Result<Self> {
        use figment::providers::{Env, Serialized};
        use figment::Figment;

        Figment::from(Serialized::defaults(ServiceConfig::default()))
            .merge(Env::raw())
            .extract()
            .map_err(ConfigError::Load)
    }
}
