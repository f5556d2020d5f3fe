//! Report types produced by the analyzer.

use linklens_core::Platform;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceClass {
    Nano,
    Micro,
    Mid,
    Macro,
    Mega,
}

/// Content-output tier, estimated from engagement rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentTier {
    Low,
    Moderate,
    High,
}

/// How actively a platform is used for link sharing, from per-platform
/// extracted link counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkShareTier {
    None,
    Light,
    Moderate,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationTier {
    Unmanaged,
    Basic,
    Curated,
    Professional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateFrequency {
    Stale,
    Occasional,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationDifficulty {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketPosition {
    Emerging,
    Established,
    Influential,
    Elite,
}

/// Outreach priority, derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Low,
    Medium,
    High,
}

/// One successful platform's presence summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformPresence {
    pub platform: Platform,
    pub handle: String,
    pub followers: u64,
    pub engagement_rate: Option<f64>,
    /// Heuristic: audiences above the verification threshold are almost
    /// always verified accounts.
    pub verified_estimate: bool,
    pub audience_class: AudienceClass,
    pub content_tier: ContentTier,
    /// Any links extracted counts as recent activity.
    pub active: bool,
    pub links_extracted: usize,
    pub link_share_tier: LinkShareTier,
}

/// A link-in-bio service the creator was seen using.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedAggregator {
    pub name: String,
    pub domain: String,
    pub link_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorAnalysis {
    pub aggregators: Vec<DetectedAggregator>,
    pub organization_tier: OrganizationTier,
    pub update_frequency: UpdateFrequency,
    /// Fraction of canonical links last seen within the freshness window.
    pub fresh_link_ratio: f64,
    pub migration_difficulty: MigrationDifficulty,
    pub total_links: usize,
}

/// Monthly monetization estimate. Heuristic, not financial-grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueEstimate {
    pub total_followers: u64,
    pub monthly_reach: f64,
    pub monthly_clicks: f64,
    pub conversion_rate: f64,
    pub monthly_conversions: f64,
    pub average_order_value: f64,
    pub affiliate_revenue: f64,
    pub brand_value: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub market_position: MarketPosition,
    pub primary_platform: Option<Platform>,
    pub switching_barriers: Vec<String>,
    pub outreach_pitch: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportScores {
    pub presence: f64,
    pub organization: f64,
    pub value: f64,
    pub overall: f64,
    pub priority: PriorityTier,
}

/// The complete intelligence report. Produced atomically by
/// [`crate::analyze`] — never partially constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelligenceReport {
    pub presence: Vec<PlatformPresence>,
    pub aggregators: AggregatorAnalysis,
    pub value: ValueEstimate,
    pub insights: Insights,
    pub scores: ReportScores,
}
