//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Remote gateway configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Static key sent as `X-Api-Key` on every request.
    #[serde(skip_serializing, default)]
    pub api_key: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

// Hand-written so the API key never reaches logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

/// Local draft database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "presensi.db".to_string(), pool_size: 4 }
    }
}

/// Background field-duty sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub interval_seconds: u64,
    pub enabled: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { interval_seconds: 300, enabled: false }
    }
}
