//! Core link and platform-result types shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A platform LinkLens can extract links from.
///
/// Variants are declared in alphabetical order so the derived `Ord` matches
/// the documented alphabetical tie-break for primary-platform selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Beacons,
    Instagram,
    Linktree,
    Pinterest,
    Tiktok,
    Twitch,
    Twitter,
    Youtube,
}

impl Platform {
    pub const ALL: [Platform; 8] = [
        Platform::Beacons,
        Platform::Instagram,
        Platform::Linktree,
        Platform::Pinterest,
        Platform::Tiktok,
        Platform::Twitch,
        Platform::Twitter,
        Platform::Youtube,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Beacons => "beacons",
            Platform::Instagram => "instagram",
            Platform::Linktree => "linktree",
            Platform::Pinterest => "pinterest",
            Platform::Tiktok => "tiktok",
            Platform::Twitch => "twitch",
            Platform::Twitter => "twitter",
            Platform::Youtube => "youtube",
        }
    }

    /// Whether this platform is itself a link-in-bio aggregator service
    /// (rather than a social network with a bio field).
    #[must_use]
    pub fn is_aggregator(self) -> bool {
        matches!(self, Platform::Linktree | Platform::Beacons)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beacons" => Ok(Platform::Beacons),
            "instagram" => Ok(Platform::Instagram),
            "linktree" => Ok(Platform::Linktree),
            "pinterest" => Ok(Platform::Pinterest),
            "tiktok" => Ok(Platform::Tiktok),
            "twitch" => Ok(Platform::Twitch),
            "twitter" | "x" => Ok(Platform::Twitter),
            "youtube" => Ok(Platform::Youtube),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

/// Where on a page a link was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceContext {
    AggregatorPage,
    Bio,
    ChannelDescription,
    Pinned,
    Post,
    Story,
    VideoDescription,
}

impl SourceContext {
    /// A priori confidence that a link found in this context is a deliberate,
    /// current link the creator maintains. Curated surfaces (aggregator
    /// pages, channel descriptions, pinned posts) rank above bios, which rank
    /// above feed posts and ephemeral stories.
    #[must_use]
    pub fn base_confidence(self) -> u8 {
        match self {
            SourceContext::AggregatorPage => 90,
            SourceContext::ChannelDescription | SourceContext::Pinned => 85,
            SourceContext::Bio => 80,
            SourceContext::VideoDescription => 75,
            SourceContext::Post => 70,
            SourceContext::Story => 60,
        }
    }
}

impl std::fmt::Display for SourceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SourceContext::AggregatorPage => "aggregator_page",
            SourceContext::Bio => "bio",
            SourceContext::ChannelDescription => "channel_description",
            SourceContext::Pinned => "pinned",
            SourceContext::Post => "post",
            SourceContext::Story => "story",
            SourceContext::VideoDescription => "video_description",
        };
        f.write_str(s)
    }
}

/// Coarse classification of a link's destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Marketplace,
    Aggregator,
    Social,
    Commerce,
    Content,
    Unknown,
}

/// One handle per requested platform, resolved from the seed query and any
/// per-platform overrides. Immutable for the lifetime of a discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandleSet {
    pub query: String,
    pub handles: BTreeMap<Platform, String>,
}

impl HandleSet {
    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<&str> {
        self.handles.get(&platform).map(String::as_str)
    }
}

/// A link exactly as an extraction adapter observed it. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLink {
    pub title: Option<String>,
    pub original_url: String,
    pub platform: Platform,
    pub context: SourceContext,
    /// A priori confidence stamped by the adapter, normally
    /// [`SourceContext::base_confidence`] for the link's context.
    pub base_confidence: u8,
}

impl RawLink {
    /// Convenience constructor stamping the context's base confidence.
    #[must_use]
    pub fn new(
        title: Option<String>,
        original_url: impl Into<String>,
        platform: Platform,
        context: SourceContext,
    ) -> Self {
        Self {
            title,
            original_url: original_url.into(),
            platform,
            context,
            base_confidence: context.base_confidence(),
        }
    }
}

/// A [`RawLink`] after one pass through the normalizer. Created once,
/// immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedLink {
    pub raw: RawLink,
    pub expanded_url: String,
    pub link_type: LinkType,
    pub brand: Option<String>,
    pub is_affiliate: bool,
    pub affiliate_id: Option<String>,
    pub observed_at: DateTime<Utc>,
}

/// Follower and engagement metrics an adapter recovered from a profile page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformMetrics {
    pub followers: u64,
    /// Engagement rate as a fraction (0.05 = 5%). Not every platform
    /// exposes enough data to estimate one.
    pub engagement_rate: Option<f64>,
}

/// Outcome of one platform's extraction task — success or failure, it is
/// always recorded, never escalated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformResult {
    pub platform: Platform,
    pub handle: String,
    pub success: bool,
    pub links: Vec<RawLink>,
    pub metrics: Option<PlatformMetrics>,
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

impl PlatformResult {
    /// A failed result with the given error reason and no links.
    #[must_use]
    pub fn failed(
        platform: Platform,
        handle: impl Into<String>,
        error: impl Into<String>,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            platform,
            handle: handle.into(),
            success: false,
            links: Vec::new(),
            metrics: None,
            error: Some(error.into()),
            elapsed_ms,
        }
    }
}

/// The merged form of every observation of one underlying link.
///
/// Two [`ProcessedLink`]s whose expanded URLs canonicalize to the same key
/// (or share a marketplace product identity) always end up in the same
/// `CanonicalLink`, independent of input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalLink {
    /// Stable id: SHA-256 over the canonical URL, hex-encoded.
    pub id: String,
    pub canonical_url: String,
    pub original_urls: Vec<String>,
    pub platforms: Vec<Platform>,
    pub contexts: Vec<SourceContext>,
    pub occurrences: usize,
    /// 0–100.
    pub confidence: u8,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub title: Option<String>,
    pub link_type: LinkType,
    pub brand: Option<String>,
    pub is_affiliate: bool,
    pub affiliate_id: Option<String>,
}

/// Run-level metadata: identity, wall-clock bounds, warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: uuid::Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub warnings: Vec<String>,
}
