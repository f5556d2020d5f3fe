//! Sub-scores and the overall creator score.

use crate::types::{
    AggregatorAnalysis, AudienceClass, OrganizationTier, PlatformPresence, PriorityTier,
    ReportScores, UpdateFrequency, ValueEstimate,
};

/// Overall-score stage weights.
pub const PRESENCE_WEIGHT: f64 = 0.4;
pub const ORGANIZATION_WEIGHT: f64 = 0.3;
pub const VALUE_WEIGHT: f64 = 0.3;

/// Presence sub-score: per-platform points by audience class, an activity
/// bonus, and a one-time verified bonus.
pub const AUDIENCE_CLASS_POINTS: [(AudienceClass, f64); 5] = [
    (AudienceClass::Nano, 5.0),
    (AudienceClass::Micro, 10.0),
    (AudienceClass::Mid, 15.0),
    (AudienceClass::Macro, 20.0),
    (AudienceClass::Mega, 25.0),
];
pub const ACTIVE_PLATFORM_POINTS: f64 = 5.0;
pub const VERIFIED_BONUS: f64 = 10.0;

/// Organization sub-score: base by tier plus an update-frequency bonus.
pub const ORGANIZATION_TIER_POINTS: [(OrganizationTier, f64); 4] = [
    (OrganizationTier::Unmanaged, 10.0),
    (OrganizationTier::Basic, 40.0),
    (OrganizationTier::Curated, 70.0),
    (OrganizationTier::Professional, 90.0),
];
pub const UPDATE_ACTIVE_BONUS: f64 = 10.0;
pub const UPDATE_OCCASIONAL_BONUS: f64 = 5.0;

/// Value sub-score: linear in estimated monthly value, saturating at this
/// amount.
pub const VALUE_SCORE_CEILING: f64 = 10_000.0;

/// Overall-score thresholds for the derived priority tier.
pub const PRIORITY_HIGH_SCORE: f64 = 70.0;
pub const PRIORITY_MEDIUM_SCORE: f64 = 40.0;

#[must_use]
pub fn presence_score(presence: &[PlatformPresence]) -> f64 {
    let mut score = 0.0;
    for entry in presence {
        score += AUDIENCE_CLASS_POINTS
            .iter()
            .find(|(class, _)| *class == entry.audience_class)
            .map_or(0.0, |(_, points)| *points);
        if entry.active {
            score += ACTIVE_PLATFORM_POINTS;
        }
    }
    if presence.iter().any(|p| p.verified_estimate) {
        score += VERIFIED_BONUS;
    }
    score.min(100.0)
}

#[must_use]
pub fn organization_score(aggregators: &AggregatorAnalysis) -> f64 {
    let base = ORGANIZATION_TIER_POINTS
        .iter()
        .find(|(tier, _)| *tier == aggregators.organization_tier)
        .map_or(0.0, |(_, points)| *points);
    let bonus = match aggregators.update_frequency {
        UpdateFrequency::Active => UPDATE_ACTIVE_BONUS,
        UpdateFrequency::Occasional => UPDATE_OCCASIONAL_BONUS,
        UpdateFrequency::Stale => 0.0,
    };
    (base + bonus).min(100.0)
}

#[must_use]
pub fn value_score(value: &ValueEstimate) -> f64 {
    (value.total_value / VALUE_SCORE_CEILING * 100.0).min(100.0)
}

#[must_use]
pub fn priority(overall: f64) -> PriorityTier {
    if overall >= PRIORITY_HIGH_SCORE {
        PriorityTier::High
    } else if overall >= PRIORITY_MEDIUM_SCORE {
        PriorityTier::Medium
    } else {
        PriorityTier::Low
    }
}

/// Combine the sub-scores into the weighted overall score and its derived
/// priority tier.
#[must_use]
pub fn compute_scores(
    presence: &[PlatformPresence],
    aggregators: &AggregatorAnalysis,
    value: &ValueEstimate,
) -> ReportScores {
    let presence_score = presence_score(presence);
    let organization_score = organization_score(aggregators);
    let value_score = value_score(value);
    let overall = PRESENCE_WEIGHT * presence_score
        + ORGANIZATION_WEIGHT * organization_score
        + VALUE_WEIGHT * value_score;

    ReportScores {
        presence: presence_score,
        organization: organization_score,
        value: value_score,
        overall,
        priority: priority(overall),
    }
}
