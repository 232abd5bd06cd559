//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, and builds the
//! [`ServerConfig`] / [`StoreConfig`] used at startup.

use crate::common::config::{ServerConfig, StoreBackend, StoreConfig};
use crate::common::error::{CommonError, EquipResult};

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Server bind settings from `EQUIPLOG_HOST` / `EQUIPLOG_PORT` (legacy: `HOST` / `PORT`)
pub fn server_config_from_env() -> ServerConfig {
    let defaults = ServerConfig::default();
    ServerConfig {
        host: get_env_with_fallback_or("EQUIPLOG_HOST", "HOST", &defaults.host),
        port: get_env_with_fallback_parse("EQUIPLOG_PORT", "PORT", defaults.port),
    }
}

/// Store settings from the environment
///
/// An unknown `EQUIPLOG_STORE_BACKEND` is a configuration error rather than a
/// silent fallback.
pub fn store_config_from_env() -> EquipResult<StoreConfig> {
    let mut config = StoreConfig::default();
    if let Some(dir) = get_env_with_fallback("EQUIPLOG_DATA_DIR", "DATA_DIR") {
        config.data_dir = dir.into();
    }
    if let Some(backend) = get_env_with_fallback("EQUIPLOG_STORE_BACKEND", "STORE_BACKEND") {
        config.backend = backend.parse::<StoreBackend>()?;
    }
    config.export_password = export_password_from_env();
    config.validate()?;
    Ok(config)
}

/// `EQUIPLOG_EXPORT_PASSWORD`（空文字は未設定扱い）
pub fn export_password_from_env() -> Option<String> {
    std::env::var("EQUIPLOG_EXPORT_PASSWORD")
        .ok()
        .filter(|value| !value.is_empty())
}

/// `StoreBackend` を clap の値パーサーとして使うためのヘルパー
pub fn parse_backend(value: &str) -> Result<StoreBackend, String> {
    value
        .parse::<StoreBackend>()
        .map_err(|e: CommonError| e.to_string())
}
