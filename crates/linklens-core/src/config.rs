use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid. Every variable
/// has a default, so a bare environment succeeds.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function — the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("LINKLENS_LOG_LEVEL", "info");
    let platforms_path = PathBuf::from(or_default(
        "LINKLENS_PLATFORMS_PATH",
        "./config/platforms.yaml",
    ));

    let request_timeout_secs = parse_u64("LINKLENS_REQUEST_TIMEOUT_SECS", "30")?;
    let platform_timeout_secs = parse_u64("LINKLENS_PLATFORM_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("LINKLENS_USER_AGENT", "linklens/0.1 (creator-discovery)");
    let max_concurrent_platforms = parse_usize("LINKLENS_MAX_CONCURRENT_PLATFORMS", "8")?;
    let max_retries = parse_u32("LINKLENS_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("LINKLENS_RETRY_BACKOFF_BASE_SECS", "1")?;

    if max_concurrent_platforms == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LINKLENS_MAX_CONCURRENT_PLATFORMS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        platforms_path,
        request_timeout_secs,
        platform_timeout_secs,
        user_agent,
        max_concurrent_platforms,
        max_retries,
        retry_backoff_base_secs,
    })
}
