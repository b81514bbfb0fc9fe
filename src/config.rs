//! Static application configuration with a development and a production profile.
//!
//! [`AppConfig::load`] picks the profile named by `USER_DIRECTORY_PROFILE`
//! (`production`, anything else means development) and lets
//! `USER_DIRECTORY_*` variables override single keys, nested keys separated by
//! `__`, e.g. `USER_DIRECTORY_PAGINATION__DEFAULT_PAGE_SIZE=25`.

use std::time::Duration;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_PREFIX: &str = "USER_DIRECTORY_";
pub const PROFILE_ENV: &str = "USER_DIRECTORY_PROFILE";

const API_URL: &str = "https://jsonplaceholder.typicode.com";
const USERS_ENDPOINT: &str = "/users";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![5, 10, 25, 50],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub production: bool,
    pub api_url: String,
    pub users_endpoint: String,
    /// Artificial latency applied to simulated writes.
    pub mock_delay_ms: u64,
    pub enable_logging: bool,
    pub pagination: PaginationConfig,
    pub search: SearchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    pub fn development() -> Self {
        Self {
            production: false,
            api_url: API_URL.to_string(),
            users_endpoint: USERS_ENDPOINT.to_string(),
            mock_delay_ms: 500,
            enable_logging: true,
            pagination: PaginationConfig::default(),
            search: SearchConfig::default(),
        }
    }

    pub fn production() -> Self {
        Self {
            production: true,
            mock_delay_ms: 0,
            enable_logging: false,
            ..Self::development()
        }
    }

    /// Profile from the environment, overlaid with `USER_DIRECTORY_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(PROFILE_ENV).as_deref() {
            Ok("production") => Self::production(),
            _ => Self::development(),
        };
        Self::figment(base).extract().map_err(|e| ConfigError::from(Box::new(e)))
    }

    pub fn figment(base: AppConfig) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["profile"]).split("__"))
    }

    pub fn full_api_url(&self) -> String {
        format!("{}{}", self.api_url, self.users_endpoint)
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}
