//! Platform extraction adapters for LinkLens.
//!
//! Each supported platform implements the [`PlatformExtractor`] capability;
//! the orchestrator dispatches through an [`ExtractorRegistry`] so adding a
//! platform means registering an implementation, not editing the
//! orchestration code.

pub mod client;
pub mod error;
mod extractor;
mod parse;
pub mod platforms;
mod retry;

pub use client::ProfileClient;
pub use error::ExtractError;
pub use extractor::{Extraction, ExtractorRegistry, PlatformExtractor};

use std::sync::Arc;

use linklens_core::{AppConfig, Platform, PlatformsFile};

use platforms::{
    BeaconsExtractor, InstagramExtractor, LinktreeExtractor, PinterestExtractor, TiktokExtractor,
    TwitchExtractor, TwitterExtractor, YoutubeExtractor,
};

/// Build the full extractor registry from configuration: one shared HTTP
/// client, one adapter per enabled platform entry.
///
/// Platforms absent from the file (or disabled) are simply not registered —
/// a discovery requesting them records a failed result for each.
///
/// # Errors
///
/// Returns [`ExtractError::Http`] if the shared HTTP client cannot be
/// constructed.
pub fn build_registry(
    config: &AppConfig,
    platforms: &PlatformsFile,
) -> Result<ExtractorRegistry, ExtractError> {
    let client = ProfileClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )?;

    let mut registry = ExtractorRegistry::new();
    for entry in platforms.platforms.iter().filter(|e| e.enabled) {
        let url = entry.profile_url.clone();
        let extractor: Arc<dyn PlatformExtractor> = match entry.platform {
            Platform::Beacons => Arc::new(BeaconsExtractor::new(client.clone(), url)),
            Platform::Instagram => Arc::new(InstagramExtractor::new(client.clone(), url)),
            Platform::Linktree => Arc::new(LinktreeExtractor::new(client.clone(), url)),
            Platform::Pinterest => Arc::new(PinterestExtractor::new(client.clone(), url)),
            Platform::Tiktok => Arc::new(TiktokExtractor::new(client.clone(), url)),
            Platform::Twitch => Arc::new(TwitchExtractor::new(client.clone(), url)),
            Platform::Twitter => Arc::new(TwitterExtractor::new(client.clone(), url)),
            Platform::Youtube => Arc::new(YoutubeExtractor::new(client.clone(), url)),
        };
        registry.register(extractor);
    }

    Ok(registry)
}
