use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;

    let log_level = or_default("BRANDLENS_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("BRANDLENS_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("BRANDLENS_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("BRANDLENS_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let document_root = PathBuf::from(or_default("BRANDLENS_DOCUMENT_ROOT", "./documents"));
    let document_base_url = optional("BRANDLENS_DOCUMENT_BASE_URL");

    let gemini_api_key = optional("GEMINI_API_KEY");
    let gemini_model = or_default("GEMINI_MODEL", "gemini-2.5-flash");
    let http_timeout_secs = parse_u64("BRANDLENS_HTTP_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        database_url,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        document_root,
        document_base_url,
        gemini_api_key,
        gemini_model,
        http_timeout_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
