//! Monetization-value estimation.
//!
//! Every number here is a documented heuristic multiplier, not a learned
//! weight. Estimates degrade toward zero with missing data; they never
//! error.

use linklens_core::{CanonicalLink, Platform, PlatformResult};

use crate::types::ValueEstimate;

/// Share of the summed follower base reached in a month (engagement proxy).
pub const MONTHLY_REACH_RATE: f64 = 0.10;

/// Share of monthly reach that clicks through to a link.
pub const CLICK_THROUGH_RATE: f64 = 0.02;

/// Conversion-rate model: base, affiliate-weighted bonus, engagement bonus,
/// hard cap.
pub const BASE_CONVERSION_RATE: f64 = 0.02;
pub const AFFILIATE_CONVERSION_BONUS: f64 = 0.01;
pub const ENGAGEMENT_CONVERSION_BONUS: f64 = 0.005;
pub const HIGH_ENGAGEMENT_THRESHOLD: f64 = 0.06;
pub const MAX_CONVERSION_RATE: f64 = 0.05;

/// Commission taken on estimated affiliate order volume.
pub const COMMISSION_RATE: f64 = 0.05;

/// Average order value when no brand keyword matches.
pub const DEFAULT_ORDER_VALUE: f64 = 50.0;

/// Brand-keyword average order values, matched case-insensitively against
/// the brand names on affiliate links.
pub const ORDER_VALUE_KEYWORDS: &[(&str, f64)] = &[
    ("amazon", 45.0),
    ("etsy", 35.0),
    ("ebay", 30.0),
    ("walmart", 40.0),
    ("target", 45.0),
    ("sephora", 60.0),
    ("nike", 85.0),
    ("apple", 250.0),
    ("beauty", 55.0),
    ("fashion", 70.0),
    ("jewelry", 90.0),
    ("tech", 120.0),
];

/// Brand-deal CPM (USD per thousand reached) by primary platform.
pub const PLATFORM_CPM: &[(Platform, f64)] = &[
    (Platform::Youtube, 6.0),
    (Platform::Instagram, 5.0),
    (Platform::Tiktok, 4.0),
    (Platform::Twitch, 3.5),
    (Platform::Twitter, 2.5),
    (Platform::Pinterest, 2.0),
    (Platform::Linktree, 1.5),
    (Platform::Beacons, 1.5),
];

/// Monthly reach above which brand CPM is adjusted upward.
pub const LARGE_AUDIENCE_REACH: f64 = 1_000_000.0;
pub const LARGE_AUDIENCE_CPM_MULTIPLIER: f64 = 1.5;

/// The platform whose follower count leads (ties: alphabetical). This is
/// the same rule the orchestrator documents for primary-platform selection.
#[must_use]
pub fn primary_platform(results: &[PlatformResult]) -> Option<Platform> {
    results
        .iter()
        .filter(|r| r.success)
        .map(|r| (r.metrics.map_or(0, |m| m.followers), r.platform))
        .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        .map(|(_, platform)| platform)
}

fn average_order_value(links: &[CanonicalLink]) -> f64 {
    let matched: Vec<f64> = links
        .iter()
        .filter(|l| l.is_affiliate)
        .filter_map(|l| l.brand.as_deref())
        .filter_map(|brand| {
            let brand = brand.to_ascii_lowercase();
            ORDER_VALUE_KEYWORDS
                .iter()
                .find(|(keyword, _)| brand.contains(keyword))
                .map(|(_, aov)| *aov)
        })
        .collect();

    if matched.is_empty() {
        DEFAULT_ORDER_VALUE
    } else {
        #[allow(clippy::cast_precision_loss)]
        let denom = matched.len() as f64;
        matched.iter().sum::<f64>() / denom
    }
}

/// Estimate monthly monetization value from platform metrics and the
/// deduplicated link set.
#[must_use]
pub fn estimate_value(results: &[PlatformResult], links: &[CanonicalLink]) -> ValueEstimate {
    let total_followers: u64 = results
        .iter()
        .filter(|r| r.success)
        .filter_map(|r| r.metrics)
        .map(|m| m.followers)
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let monthly_reach = total_followers as f64 * MONTHLY_REACH_RATE;
    let monthly_clicks = monthly_reach * CLICK_THROUGH_RATE;

    #[allow(clippy::cast_precision_loss)]
    let affiliate_ratio = if links.is_empty() {
        0.0
    } else {
        links.iter().filter(|l| l.is_affiliate).count() as f64 / links.len() as f64
    };

    let engagement_rates: Vec<f64> = results
        .iter()
        .filter(|r| r.success)
        .filter_map(|r| r.metrics.and_then(|m| m.engagement_rate))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let average_engagement = if engagement_rates.is_empty() {
        0.0
    } else {
        engagement_rates.iter().sum::<f64>() / engagement_rates.len() as f64
    };

    let mut conversion_rate = BASE_CONVERSION_RATE;
    if affiliate_ratio > 0.0 {
        conversion_rate += AFFILIATE_CONVERSION_BONUS * affiliate_ratio;
    }
    if average_engagement > HIGH_ENGAGEMENT_THRESHOLD {
        conversion_rate += ENGAGEMENT_CONVERSION_BONUS;
    }
    conversion_rate = conversion_rate.min(MAX_CONVERSION_RATE);

    let monthly_conversions = monthly_clicks * conversion_rate;
    let average_order_value = average_order_value(links);
    let affiliate_revenue = monthly_conversions * average_order_value * COMMISSION_RATE;

    let cpm = primary_platform(results)
        .and_then(|p| {
            PLATFORM_CPM
                .iter()
                .find(|(platform, _)| *platform == p)
                .map(|(_, cpm)| *cpm)
        })
        .unwrap_or(0.0);
    let cpm = if monthly_reach > LARGE_AUDIENCE_REACH {
        cpm * LARGE_AUDIENCE_CPM_MULTIPLIER
    } else {
        cpm
    };
    let brand_value = monthly_reach / 1000.0 * cpm;

    ValueEstimate {
        total_followers,
        monthly_reach,
        monthly_clicks,
        conversion_rate,
        monthly_conversions,
        average_order_value,
        affiliate_revenue,
        brand_value,
        total_value: affiliate_revenue + brand_value,
    }
}
