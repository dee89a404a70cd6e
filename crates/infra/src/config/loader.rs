//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required ones are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PRESENSI_API_BASE_URL` (required): gateway base URL
//! - `PRESENSI_API_KEY` (required): static API key
//! - `PRESENSI_API_TIMEOUT`: connect timeout in seconds (default 30)
//! - `PRESENSI_DB_PATH`: draft database path (default `presensi.db`)
//! - `PRESENSI_DB_POOL_SIZE`: connection pool size (default 4)
//! - `PRESENSI_SYNC_INTERVAL`: background sync interval in seconds
//! - `PRESENSI_SYNC_ENABLED`: whether background sync runs (true/false)
//!
//! ## File Locations
//! 1. `./config.{json,toml}` or `./presensi.{json,toml}`
//! 2. `../config.{json,toml}`
//! 3. The same names next to the executable
//!
//! The API key is never written back out, but a file may supply it; the
//! `PRESENSI_API_KEY` variable overrides the file value when set.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use presensi_domain::{ApiConfig, Config, DatabaseConfig, PresensiError, Result, SyncConfig};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `PresensiError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            let mut config = load_from_file(None)?;
            if let Ok(key) = std::env::var("PRESENSI_API_KEY") {
                config.api.api_key = key;
            }
            Ok(config)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `PresensiError::Config` if a required variable is missing or any
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let api = ApiConfig {
        base_url: env_var("PRESENSI_API_BASE_URL")?,
        api_key: env_var("PRESENSI_API_KEY")?,
        connect_timeout_seconds: env_parse(
            "PRESENSI_API_TIMEOUT",
            defaults.api.connect_timeout_seconds,
        )?,
    };

    let database = DatabaseConfig {
        path: std::env::var("PRESENSI_DB_PATH").unwrap_or(defaults.database.path),
        pool_size: env_parse("PRESENSI_DB_POOL_SIZE", defaults.database.pool_size)?,
    };

    let sync = SyncConfig {
        interval_seconds: env_parse("PRESENSI_SYNC_INTERVAL", defaults.sync.interval_seconds)?,
        enabled: env_bool("PRESENSI_SYNC_ENABLED", defaults.sync.enabled),
    };

    Ok(Config { api, database, sync })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `PresensiError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PresensiError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PresensiError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PresensiError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PresensiError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PresensiError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PresensiError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 6] = [
        "config.json",
        "config.toml",
        "presensi.json",
        "presensi.toml",
        "../config.json",
        "../config.toml",
    ];

    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| PresensiError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional variable, falling back to `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| PresensiError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
