use std::path::PathBuf;

/// Application configuration, loaded from `LINKLENS_*` environment
/// variables by [`crate::config::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub platforms_path: PathBuf,
    /// Per-request HTTP timeout inside an adapter.
    pub request_timeout_secs: u64,
    /// Hard per-platform ceiling the orchestrator races each extraction
    /// task against. Should exceed nothing — a stalled adapter is cut off
    /// here regardless of its own timeouts.
    pub platform_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_platforms: usize,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}
