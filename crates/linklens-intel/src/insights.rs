//! Narrative intelligence: market position, switching barriers, outreach
//! copy, recommendations. Everything here is a deterministic function of
//! the earlier analysis stages.

use crate::types::{
    AggregatorAnalysis, Insights, MarketPosition, PlatformPresence, ValueEstimate,
};
use crate::value::primary_platform;
use linklens_core::PlatformResult;

/// Monthly-reach thresholds for the market-position tier.
pub const POSITION_ESTABLISHED_REACH: f64 = 10_000.0;
pub const POSITION_INFLUENTIAL_REACH: f64 = 100_000.0;
pub const POSITION_ELITE_REACH: f64 = 500_000.0;

#[must_use]
pub fn market_position(monthly_reach: f64) -> MarketPosition {
    if monthly_reach >= POSITION_ELITE_REACH {
        MarketPosition::Elite
    } else if monthly_reach >= POSITION_INFLUENTIAL_REACH {
        MarketPosition::Influential
    } else if monthly_reach >= POSITION_ESTABLISHED_REACH {
        MarketPosition::Established
    } else {
        MarketPosition::Emerging
    }
}

fn switching_barriers(aggregators: &AggregatorAnalysis) -> Vec<String> {
    let mut barriers = Vec::new();

    if aggregators.total_links > 10 {
        barriers.push(format!(
            "{} links would need migrating and re-verifying",
            aggregators.total_links
        ));
    }
    if aggregators.aggregators.len() > 1 {
        barriers.push(format!(
            "links are spread across {} aggregator services",
            aggregators.aggregators.len()
        ));
    }
    if let Some(current) = aggregators.aggregators.first() {
        barriers.push(format!(
            "bio URLs on every platform currently point at {}",
            current.name
        ));
    }
    if barriers.is_empty() {
        barriers.push("no existing link-management tooling to displace".to_string());
    }

    barriers
}

fn recommendations(
    presence: &[PlatformPresence],
    aggregators: &AggregatorAnalysis,
    value: &ValueEstimate,
) -> Vec<String> {
    let mut recs = Vec::new();

    if aggregators.aggregators.is_empty() && aggregators.total_links > 0 {
        recs.push(
            "Consolidate scattered links onto a single managed link-in-bio page".to_string(),
        );
    }
    if value.total_followers > 0 && aggregators.total_links == 0 {
        recs.push("Audience exists but no links are being shared — add bio links".to_string());
    }
    let inactive: Vec<&PlatformPresence> = presence.iter().filter(|p| !p.active).collect();
    if !inactive.is_empty() {
        recs.push(format!(
            "{} platform(s) have an audience but share no links",
            inactive.len()
        ));
    }
    if aggregators.total_links > 0 && value.affiliate_revenue == 0.0 {
        recs.push("No affiliate tagging detected — existing links monetize nothing".to_string());
    }
    if recs.is_empty() {
        recs.push("Link presence is healthy; focus on conversion optimization".to_string());
    }

    recs
}

fn outreach_pitch(
    results: &[PlatformResult],
    presence: &[PlatformPresence],
    aggregators: &AggregatorAnalysis,
    value: &ValueEstimate,
) -> String {
    let handle = presence
        .first()
        .map(|p| p.handle.as_str())
        .or_else(|| results.first().map(|r| r.handle.as_str()))
        .unwrap_or("creator");

    let platform_clause = primary_platform(results).map_or_else(String::new, |platform| {
        let followers = presence
            .iter()
            .find(|p| p.platform == platform)
            .map_or(0, |p| p.followers);
        format!(" Your {platform} audience of {followers} followers is the anchor.")
    });

    let aggregator_clause = aggregators.aggregators.first().map_or_else(
        || " You are not using a link-in-bio service yet.".to_string(),
        |a| format!(" You currently run your links through {}.", a.name),
    );

    format!(
        "Hi @{handle} — we estimate your link-in-bio presence is worth ${:.0}/month.{}{} \
         We can help you capture more of that value.",
        value.total_value, platform_clause, aggregator_clause
    )
}

/// Build the narrative insight block from the earlier stages.
#[must_use]
pub fn build_insights(
    results: &[PlatformResult],
    presence: &[PlatformPresence],
    aggregators: &AggregatorAnalysis,
    value: &ValueEstimate,
) -> Insights {
    Insights {
        market_position: market_position(value.monthly_reach),
        primary_platform: primary_platform(results),
        switching_barriers: switching_barriers(aggregators),
        outreach_pitch: outreach_pitch(results, presence, aggregators, value),
        recommendations: recommendations(presence, aggregators, value),
    }
}
