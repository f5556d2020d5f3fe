//! Orchestrator scenario tests with stub extractors — no network, no
//! wiremock; the stubs exercise exactly the fan-out/settle/pipeline
//! behavior the orchestrator owns.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use linklens_core::{
    AppConfig, Platform, PlatformMetrics, RawLink, SourceContext,
};
use linklens_discovery::{Discovery, DiscoveryError, DiscoveryOptions};
use linklens_extract::{ExtractError, Extraction, ExtractorRegistry, PlatformExtractor};
use linklens_normalize::Normalizer;

fn test_config() -> AppConfig {
    AppConfig {
        log_level: "info".to_string(),
        platforms_path: "./config/platforms.yaml".into(),
        request_timeout_secs: 5,
        platform_timeout_secs: 5,
        user_agent: "linklens-test/0.1".to_string(),
        max_concurrent_platforms: 8,
        max_retries: 0,
        retry_backoff_base_secs: 0,
    }
}

fn discovery(registry: ExtractorRegistry) -> Discovery {
    let normalizer = Normalizer::new(5, "linklens-test/0.1").expect("normalizer builds");
    Discovery::new(registry, normalizer, test_config())
}

/// Stub extractor returning a fixed set of links (and optional followers).
struct StubExtractor {
    platform: Platform,
    urls: Vec<&'static str>,
    followers: Option<u64>,
}

#[async_trait]
impl PlatformExtractor for StubExtractor {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn extract(&self, _handle: &str) -> Result<Extraction, ExtractError> {
        Ok(Extraction {
            links: self
                .urls
                .iter()
                .map(|url| RawLink::new(None, *url, self.platform, SourceContext::Bio))
                .collect(),
            metrics: self.followers.map(|followers| PlatformMetrics {
                followers,
                engagement_rate: None,
            }),
        })
    }
}

/// Stub extractor that always fails.
struct FailingExtractor {
    platform: Platform,
}

#[async_trait]
impl PlatformExtractor for FailingExtractor {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn extract(&self, handle: &str) -> Result<Extraction, ExtractError> {
        Err(ExtractError::NotFound {
            url: format!("https://example.com/{handle}"),
        })
    }
}

/// Stub extractor that hangs far past any reasonable deadline.
struct HangingExtractor {
    platform: Platform,
}

#[async_trait]
impl PlatformExtractor for HangingExtractor {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn extract(&self, _handle: &str) -> Result<Extraction, ExtractError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Extraction::default())
    }
}

fn options(platforms: &[Platform]) -> DiscoveryOptions {
    DiscoveryOptions {
        platforms: Some(platforms.to_vec()),
        handle_overrides: HashMap::new(),
        per_platform_timeout: None,
    }
}

// ---------------------------------------------------------------------------
// Partial failure tolerance
// ---------------------------------------------------------------------------

#[tokio::test]
async fn partial_failures_never_fail_the_run() {
    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(StubExtractor {
        platform: Platform::Instagram,
        urls: vec!["https://shop.example.com", "https://linktr.ee/somecreator"],
        followers: Some(50_000),
    }));
    registry.register(Arc::new(StubExtractor {
        platform: Platform::Youtube,
        urls: vec!["https://shop.example.com?utm_source=yt"],
        followers: Some(200_000),
    }));
    registry.register(Arc::new(StubExtractor {
        platform: Platform::Twitch,
        urls: vec![],
        followers: Some(5_000),
    }));
    registry.register(Arc::new(FailingExtractor {
        platform: Platform::Tiktok,
    }));
    registry.register(Arc::new(FailingExtractor {
        platform: Platform::Twitter,
    }));

    let profile = discovery(registry)
        .discover(
            "@SomeCreator",
            options(&[
                Platform::Instagram,
                Platform::Youtube,
                Platform::Twitch,
                Platform::Tiktok,
                Platform::Twitter,
            ]),
        )
        .await
        .expect("partial failure must not abort the run");

    assert_eq!(profile.platform_results.len(), 5);
    let succeeded = profile
        .platform_results
        .iter()
        .filter(|r| r.success)
        .count();
    assert_eq!(succeeded, 3);

    let failed: Vec<_> = profile
        .platform_results
        .iter()
        .filter(|r| !r.success)
        .collect();
    assert_eq!(failed.len(), 2);
    assert!(failed.iter().all(|r| r.error.is_some()));
    assert_eq!(profile.metadata.warnings.len(), 2);

    // The shared shop link was seen on two platforms and merged.
    let shop = profile
        .canonical_links
        .iter()
        .find(|l| l.canonical_url == "https://shop.example.com")
        .expect("merged shop link present");
    assert_eq!(shop.occurrences, 2);
    assert_eq!(shop.platforms, vec![Platform::Instagram, Platform::Youtube]);

    // The report only reflects the three successes.
    assert_eq!(profile.report.presence.len(), 3);
    assert_eq!(profile.report.value.total_followers, 255_000);
}

#[tokio::test]
async fn zero_successful_platforms_still_returns_a_profile() {
    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(FailingExtractor {
        platform: Platform::Instagram,
    }));
    registry.register(Arc::new(FailingExtractor {
        platform: Platform::Tiktok,
    }));

    let profile = discovery(registry)
        .discover("somecreator", options(&[Platform::Instagram, Platform::Tiktok]))
        .await
        .expect("all-failed run still returns a profile");

    assert!(profile.canonical_links.is_empty());
    assert_eq!(profile.report.value.total_followers, 0);
    assert!(profile.report.scores.overall < 10.0);
    assert_eq!(profile.metadata.warnings.len(), 2);
}

// ---------------------------------------------------------------------------
// Timeout enforcement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hanging_extractor_times_out_without_blocking_siblings() {
    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(HangingExtractor {
        platform: Platform::Pinterest,
    }));
    registry.register(Arc::new(StubExtractor {
        platform: Platform::Instagram,
        urls: vec!["https://shop.example.com"],
        followers: Some(1_000),
    }));

    let profile = discovery(registry)
        .discover(
            "somecreator",
            DiscoveryOptions {
                platforms: Some(vec![Platform::Pinterest, Platform::Instagram]),
                handle_overrides: HashMap::new(),
                per_platform_timeout: Some(Duration::from_millis(100)),
            },
        )
        .await
        .unwrap();

    let pinterest = profile
        .platform_results
        .iter()
        .find(|r| r.platform == Platform::Pinterest)
        .unwrap();
    assert!(!pinterest.success);
    assert!(
        pinterest.error.as_deref().unwrap().contains("timed out"),
        "timeout must be reported as the failure reason"
    );

    let instagram = profile
        .platform_results
        .iter()
        .find(|r| r.platform == Platform::Instagram)
        .unwrap();
    assert!(instagram.success, "sibling task must be unaffected");
}

// ---------------------------------------------------------------------------
// Handle resolution & platform subset
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_query_is_the_only_fatal_error() {
    let registry = ExtractorRegistry::new();
    let result = discovery(registry)
        .discover("   ", options(&[Platform::Instagram]))
        .await;

    assert!(matches!(
        result,
        Err(DiscoveryError::HandleResolution { .. })
    ));
}

#[tokio::test]
async fn unregistered_platform_is_a_failed_result_not_an_error() {
    let registry = ExtractorRegistry::new();
    let profile = discovery(registry)
        .discover("somecreator", options(&[Platform::Beacons]))
        .await
        .unwrap();

    assert_eq!(profile.platform_results.len(), 1);
    assert!(!profile.platform_results[0].success);
    assert!(profile.platform_results[0]
        .error
        .as_deref()
        .unwrap()
        .contains("no extractor registered"));
}

#[tokio::test]
async fn platform_subset_limits_the_fan_out() {
    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(StubExtractor {
        platform: Platform::Instagram,
        urls: vec!["https://shop.example.com"],
        followers: None,
    }));
    registry.register(Arc::new(StubExtractor {
        platform: Platform::Youtube,
        urls: vec!["https://other.example.com"],
        followers: None,
    }));

    let profile = discovery(registry)
        .discover("somecreator", options(&[Platform::Instagram]))
        .await
        .unwrap();

    assert_eq!(profile.platform_results.len(), 1);
    assert_eq!(profile.platform_results[0].platform, Platform::Instagram);
}

#[tokio::test]
async fn handle_overrides_reach_the_extractors() {
    struct HandleEcho {
        platform: Platform,
    }

    #[async_trait]
    impl PlatformExtractor for HandleEcho {
        fn platform(&self) -> Platform {
            self.platform
        }

        async fn extract(&self, handle: &str) -> Result<Extraction, ExtractError> {
            Ok(Extraction {
                links: vec![RawLink::new(
                    None,
                    format!("https://example.com/{handle}"),
                    self.platform,
                    SourceContext::Bio,
                )],
                metrics: None,
            })
        }
    }

    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(HandleEcho {
        platform: Platform::Twitch,
    }));

    let mut overrides = HashMap::new();
    overrides.insert(Platform::Twitch, "@StreamerName".to_string());

    let profile = discovery(registry)
        .discover(
            "somecreator",
            DiscoveryOptions {
                platforms: Some(vec![Platform::Twitch]),
                handle_overrides: overrides,
                per_platform_timeout: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(
        profile.platform_results[0].links[0].original_url,
        "https://example.com/streamername"
    );
}

#[tokio::test]
async fn profile_serializes_to_json() {
    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(StubExtractor {
        platform: Platform::Instagram,
        urls: vec!["https://shop.example.com"],
        followers: Some(10),
    }));

    let profile = discovery(registry)
        .discover("somecreator", options(&[Platform::Instagram]))
        .await
        .unwrap();

    let json = serde_json::to_value(&profile).unwrap();
    assert!(json.get("canonical_links").is_some());
    assert!(json.get("metadata").is_some());
    assert!(json["summary"].as_str().unwrap().contains("canonical link"));
}
