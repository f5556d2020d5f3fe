//! Creator intelligence analyzer.
//!
//! `analyze` derives the full [`IntelligenceReport`] from the settled
//! platform results and deduplicated links. Every stage is a pure function
//! of its inputs (`as_of` anchors the freshness window); missing or zero
//! data degrades scores toward zero instead of raising errors.

pub mod aggregators;
pub mod insights;
pub mod presence;
pub mod score;
pub mod types;
pub mod value;

pub use types::{
    AggregatorAnalysis, AudienceClass, ContentTier, DetectedAggregator, Insights,
    IntelligenceReport, LinkShareTier, MarketPosition, MigrationDifficulty, OrganizationTier,
    PlatformPresence, PriorityTier, ReportScores, UpdateFrequency, ValueEstimate,
};

use chrono::{DateTime, Utc};

use linklens_core::{CanonicalLink, PlatformResult};

/// Produce the intelligence report for one completed discovery run.
///
/// The report is constructed atomically: all stages run over the same
/// immutable snapshot and the result is assembled once, at the end.
#[must_use]
pub fn analyze(
    results: &[PlatformResult],
    links: &[CanonicalLink],
    as_of: DateTime<Utc>,
) -> IntelligenceReport {
    let presence = presence::analyze_presence(results);
    let aggregators = aggregators::analyze_aggregators(results, links, as_of);
    let value = value::estimate_value(results, links);
    let insights = insights::build_insights(results, &presence, &aggregators, &value);
    let scores = score::compute_scores(&presence, &aggregators, &value);

    tracing::debug!(
        platforms = presence.len(),
        links = links.len(),
        overall = scores.overall,
        "intelligence analysis complete"
    );

    IntelligenceReport {
        presence,
        aggregators,
        value,
        insights,
        scores,
    }
}
