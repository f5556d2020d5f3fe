//! Link-aggregator competitive analysis.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use linklens_core::tables::{aggregator_name, KNOWN_AGGREGATORS};
use linklens_core::{CanonicalLink, PlatformResult};

use crate::types::{
    AggregatorAnalysis, DetectedAggregator, MigrationDifficulty, OrganizationTier, UpdateFrequency,
};

/// Links last seen within this window count as fresh.
pub const FRESHNESS_WINDOW_DAYS: i64 = 7;

/// Fresh-link ratios at or above these mark an actively / occasionally
/// updated link set.
pub const FRESH_RATIO_ACTIVE: f64 = 0.5;
pub const FRESH_RATIO_OCCASIONAL: f64 = 0.2;

/// Link-count thresholds for the organization tier.
pub const CURATED_MIN_LINKS: usize = 5;
pub const PROFESSIONAL_MIN_LINKS: usize = 10;

/// Migration-difficulty thresholds.
pub const MIGRATION_HIGH_LINKS: usize = 20;
pub const MIGRATION_MEDIUM_LINKS: usize = 8;

fn canonical_host(canonical_url: &str) -> &str {
    let stripped = canonical_url
        .strip_prefix("https://")
        .or_else(|| canonical_url.strip_prefix("http://"))
        .unwrap_or(canonical_url);
    stripped.split(['/', '?', '#']).next().unwrap_or(stripped)
}

/// Analyze which link-in-bio aggregators the creator uses and how organized
/// the link set looks.
///
/// An aggregator is credited two ways: a canonical link pointing at its
/// domain, or the platform's dedicated extractor succeeding with at least
/// one link. `as_of` anchors the freshness window so the analysis stays
/// deterministic.
#[must_use]
pub fn analyze_aggregators(
    results: &[PlatformResult],
    links: &[CanonicalLink],
    as_of: DateTime<Utc>,
) -> AggregatorAnalysis {
    // name -> (domain, link_count); BTreeMap for deterministic output order.
    let mut detected: BTreeMap<&'static str, (String, usize)> = BTreeMap::new();

    for link in links {
        let host = canonical_host(&link.canonical_url);
        if let Some(name) = aggregator_name(host) {
            let entry = detected.entry(name).or_insert_with(|| (host.to_string(), 0));
            entry.1 += 1;
        }
    }

    for result in results {
        if !result.platform.is_aggregator() || !result.success || result.links.is_empty() {
            continue;
        }
        if let Some((domain, name)) = KNOWN_AGGREGATORS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(result.platform.as_str()))
        {
            let entry = detected
                .entry(name)
                .or_insert_with(|| ((*domain).to_string(), 0));
            // A direct extraction tells us how many links live on the page;
            // keep the larger of the two credit paths.
            entry.1 = entry.1.max(result.links.len());
        }
    }

    let aggregators: Vec<DetectedAggregator> = detected
        .into_iter()
        .map(|(name, (domain, link_count))| DetectedAggregator {
            name: name.to_string(),
            domain,
            link_count,
        })
        .collect();

    let total_links = links.len();
    let has_aggregator = !aggregators.is_empty();

    let organization_tier = if has_aggregator && total_links >= PROFESSIONAL_MIN_LINKS {
        OrganizationTier::Professional
    } else if has_aggregator && total_links >= CURATED_MIN_LINKS {
        OrganizationTier::Curated
    } else if has_aggregator || total_links >= CURATED_MIN_LINKS {
        OrganizationTier::Basic
    } else {
        OrganizationTier::Unmanaged
    };

    let window = Duration::days(FRESHNESS_WINDOW_DAYS);
    let fresh = links
        .iter()
        .filter(|l| as_of.signed_duration_since(l.last_seen) <= window)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let fresh_link_ratio = if total_links == 0 {
        0.0
    } else {
        fresh as f64 / total_links as f64
    };

    let update_frequency = if total_links == 0 || fresh_link_ratio < FRESH_RATIO_OCCASIONAL {
        UpdateFrequency::Stale
    } else if fresh_link_ratio < FRESH_RATIO_ACTIVE {
        UpdateFrequency::Occasional
    } else {
        UpdateFrequency::Active
    };

    let migration_difficulty = if total_links > MIGRATION_HIGH_LINKS || aggregators.len() > 1 {
        MigrationDifficulty::High
    } else if total_links > MIGRATION_MEDIUM_LINKS {
        MigrationDifficulty::Medium
    } else {
        MigrationDifficulty::Low
    };

    AggregatorAnalysis {
        aggregators,
        organization_tier,
        update_frequency,
        fresh_link_ratio,
        migration_difficulty,
        total_links,
    }
}
