//! The discovery orchestrator: concurrent fan-out across platform
//! extractors under per-platform deadlines, then the
//! normalize → deduplicate → analyze pipeline over the settled snapshot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::stream::{self, StreamExt};
use uuid::Uuid;

use linklens_core::{AppConfig, Platform, PlatformResult, RawLink, RunMetadata};
use linklens_dedup::deduplicate;
use linklens_extract::{ExtractorRegistry, PlatformExtractor};
use linklens_intel::analyze;
use linklens_normalize::Normalizer;

use crate::error::DiscoveryError;
use crate::handles::resolve_handles;
use crate::profile::{build_summary, CreatorProfile};

/// Per-run options layered over [`AppConfig`] defaults.
#[derive(Debug, Default, Clone)]
pub struct DiscoveryOptions {
    /// Restrict the fan-out to these platforms. `None` means all supported
    /// platforms.
    pub platforms: Option<Vec<Platform>>,
    /// Per-platform handle overrides; the seed query covers the rest.
    pub handle_overrides: HashMap<Platform, String>,
    /// Override the configured per-platform extraction deadline.
    pub per_platform_timeout: Option<Duration>,
}

/// One discovery runner, holding the extractor registry, the normalizer,
/// and configuration. Cheap to share behind an `Arc`.
pub struct Discovery {
    registry: ExtractorRegistry,
    normalizer: Normalizer,
    config: AppConfig,
}

impl Discovery {
    #[must_use]
    pub fn new(registry: ExtractorRegistry, normalizer: Normalizer, config: AppConfig) -> Self {
        Self {
            registry,
            normalizer,
            config,
        }
    }

    /// Run one full discovery for `query`.
    ///
    /// Platform tasks run concurrently, each racing its own deadline; a
    /// task's failure or timeout is recorded in its [`PlatformResult`] and
    /// never aborts siblings or the run. The downstream pipeline starts
    /// only after every task has settled.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::HandleResolution`] when no usable handle
    /// exists for a requested platform (e.g., an empty query). That is the
    /// only input-level failure; a run where every platform fails still
    /// returns a (degraded) profile.
    pub async fn discover(
        &self,
        query: &str,
        options: DiscoveryOptions,
    ) -> Result<CreatorProfile, DiscoveryError> {
        let started_at = Utc::now();
        let run_start = Instant::now();
        let run_id = Uuid::new_v4();

        let platforms = options
            .platforms
            .unwrap_or_else(|| Platform::ALL.to_vec());
        let handles = resolve_handles(query, &platforms, &options.handle_overrides)?;
        let timeout = options
            .per_platform_timeout
            .unwrap_or(Duration::from_secs(self.config.platform_timeout_secs));

        tracing::info!(
            %run_id,
            query,
            platforms = platforms.len(),
            timeout_ms = timeout.as_millis() as u64,
            "starting discovery run"
        );

        let mut platform_results: Vec<PlatformResult> = stream::iter(platforms)
            .map(|platform| {
                let handle = handles.get(platform).unwrap_or_default().to_string();
                let extractor = self.registry.get(platform);
                async move { run_platform_task(platform, handle, extractor, timeout).await }
            })
            .buffer_unordered(self.config.max_concurrent_platforms)
            .collect()
            .await;
        // Settled order is completion order; fix it for stable output.
        platform_results.sort_by_key(|r| r.platform);

        let raw_links: Vec<RawLink> = platform_results
            .iter()
            .filter(|r| r.success)
            .flat_map(|r| r.links.iter().cloned())
            .collect();

        let processed_links = self.normalizer.process(raw_links).await;
        let canonical_links = deduplicate(&processed_links);
        let report = analyze(&platform_results, &canonical_links, Utc::now());

        let warnings: Vec<String> = platform_results
            .iter()
            .filter(|r| !r.success)
            .map(|r| {
                format!(
                    "{}: {}",
                    r.platform,
                    r.error.as_deref().unwrap_or("unknown error")
                )
            })
            .collect();

        let summary = build_summary(&platform_results, &canonical_links, &report);
        let finished_at = Utc::now();
        let elapsed_ms = u64::try_from(run_start.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::info!(
            %run_id,
            canonical_links = canonical_links.len(),
            failed_platforms = warnings.len(),
            elapsed_ms,
            "discovery run complete"
        );

        Ok(CreatorProfile {
            handles,
            platform_results,
            processed_links,
            canonical_links,
            report,
            summary,
            metadata: RunMetadata {
                run_id,
                started_at,
                finished_at,
                elapsed_ms,
                warnings,
            },
        })
    }
}

/// Run one platform's extraction, racing the per-platform deadline. Every
/// outcome — success, adapter error, missing extractor, timeout — becomes a
/// `PlatformResult`; nothing escapes.
async fn run_platform_task(
    platform: Platform,
    handle: String,
    extractor: Option<Arc<dyn PlatformExtractor>>,
    deadline: Duration,
) -> PlatformResult {
    let start = Instant::now();
    let elapsed = |start: Instant| u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    let Some(extractor) = extractor else {
        return PlatformResult::failed(platform, handle, "no extractor registered", 0);
    };

    match tokio::time::timeout(deadline, extractor.extract(&handle)).await {
        Ok(Ok(extraction)) => {
            tracing::debug!(
                %platform,
                handle,
                links = extraction.links.len(),
                "platform extraction succeeded"
            );
            PlatformResult {
                platform,
                handle,
                success: true,
                links: extraction.links,
                metrics: extraction.metrics,
                error: None,
                elapsed_ms: elapsed(start),
            }
        }
        Ok(Err(e)) => {
            tracing::warn!(%platform, handle, error = %e, "platform extraction failed");
            PlatformResult::failed(platform, handle, e.to_string(), elapsed(start))
        }
        Err(_) => {
            tracing::warn!(
                %platform,
                handle,
                timeout_ms = deadline.as_millis() as u64,
                "platform extraction timed out"
            );
            PlatformResult::failed(
                platform,
                handle,
                format!("timed out after {}ms", deadline.as_millis()),
                elapsed(start),
            )
        }
    }
}
