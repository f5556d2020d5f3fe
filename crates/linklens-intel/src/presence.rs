//! Platform-presence analysis.

use linklens_core::PlatformResult;

use crate::types::{AudienceClass, ContentTier, LinkShareTier, PlatformPresence};

/// Follower count above which an account is assumed verified.
pub const VERIFIED_FOLLOWER_THRESHOLD: u64 = 100_000;

/// Engagement-rate thresholds for the content tier.
pub const ENGAGEMENT_MODERATE: f64 = 0.02;
pub const ENGAGEMENT_HIGH: f64 = 0.06;

/// Audience size-class boundaries (exclusive upper bounds).
pub const AUDIENCE_NANO_MAX: u64 = 10_000;
pub const AUDIENCE_MICRO_MAX: u64 = 100_000;
pub const AUDIENCE_MID_MAX: u64 = 500_000;
pub const AUDIENCE_MACRO_MAX: u64 = 1_000_000;

#[must_use]
pub fn audience_class(followers: u64) -> AudienceClass {
    match followers {
        f if f < AUDIENCE_NANO_MAX => AudienceClass::Nano,
        f if f < AUDIENCE_MICRO_MAX => AudienceClass::Micro,
        f if f < AUDIENCE_MID_MAX => AudienceClass::Mid,
        f if f < AUDIENCE_MACRO_MAX => AudienceClass::Macro,
        _ => AudienceClass::Mega,
    }
}

#[must_use]
pub fn content_tier(engagement_rate: Option<f64>) -> ContentTier {
    match engagement_rate {
        Some(rate) if rate >= ENGAGEMENT_HIGH => ContentTier::High,
        Some(rate) if rate >= ENGAGEMENT_MODERATE => ContentTier::Moderate,
        _ => ContentTier::Low,
    }
}

#[must_use]
pub fn link_share_tier(links_extracted: usize) -> LinkShareTier {
    match links_extracted {
        0 => LinkShareTier::None,
        1 => LinkShareTier::Light,
        2..=4 => LinkShareTier::Moderate,
        _ => LinkShareTier::Heavy,
    }
}

/// Derive one presence record per successful platform result, sorted by
/// follower count descending (ties: platform name ascending). Failed
/// platforms contribute nothing — absence degrades scores, it does not
/// error.
#[must_use]
pub fn analyze_presence(results: &[PlatformResult]) -> Vec<PlatformPresence> {
    let mut presence: Vec<PlatformPresence> = results
        .iter()
        .filter(|r| r.success)
        .map(|r| {
            let followers = r.metrics.map_or(0, |m| m.followers);
            let engagement_rate = r.metrics.and_then(|m| m.engagement_rate);
            PlatformPresence {
                platform: r.platform,
                handle: r.handle.clone(),
                followers,
                engagement_rate,
                verified_estimate: followers >= VERIFIED_FOLLOWER_THRESHOLD,
                audience_class: audience_class(followers),
                content_tier: content_tier(engagement_rate),
                active: !r.links.is_empty(),
                links_extracted: r.links.len(),
                link_share_tier: link_share_tier(r.links.len()),
            }
        })
        .collect();

    presence.sort_by(|a, b| {
        b.followers
            .cmp(&a.followers)
            .then(a.platform.cmp(&b.platform))
    });
    presence
}

#[cfg(test)]
mod tests {
    use super::*;
    use linklens_core::{Platform, PlatformMetrics, RawLink, SourceContext};

    fn result(
        platform: Platform,
        success: bool,
        followers: Option<u64>,
        link_count: usize,
    ) -> PlatformResult {
        PlatformResult {
            platform,
            handle: "someone".to_string(),
            success,
            links: (0..link_count)
                .map(|i| {
                    RawLink::new(
                        None,
                        format!("https://example.com/{i}"),
                        platform,
                        SourceContext::Bio,
                    )
                })
                .collect(),
            metrics: followers.map(|f| PlatformMetrics {
                followers: f,
                engagement_rate: None,
            }),
            error: None,
            elapsed_ms: 100,
        }
    }

    #[test]
    fn audience_classes_follow_thresholds() {
        assert_eq!(audience_class(9_999), AudienceClass::Nano);
        assert_eq!(audience_class(10_000), AudienceClass::Micro);
        assert_eq!(audience_class(499_999), AudienceClass::Mid);
        assert_eq!(audience_class(999_999), AudienceClass::Macro);
        assert_eq!(audience_class(1_000_000), AudienceClass::Mega);
    }

    #[test]
    fn content_tier_from_engagement() {
        assert_eq!(content_tier(None), ContentTier::Low);
        assert_eq!(content_tier(Some(0.01)), ContentTier::Low);
        assert_eq!(content_tier(Some(0.03)), ContentTier::Moderate);
        assert_eq!(content_tier(Some(0.08)), ContentTier::High);
    }

    #[test]
    fn failed_platforms_are_excluded() {
        let results = vec![
            result(Platform::Instagram, true, Some(5_000), 2),
            result(Platform::Tiktok, false, None, 0),
        ];
        let presence = analyze_presence(&results);
        assert_eq!(presence.len(), 1);
        assert_eq!(presence[0].platform, Platform::Instagram);
    }

    #[test]
    fn sorted_by_followers_desc_with_alphabetical_ties() {
        let results = vec![
            result(Platform::Tiktok, true, Some(1_000), 0),
            result(Platform::Youtube, true, Some(50_000), 1),
            result(Platform::Instagram, true, Some(1_000), 0),
        ];
        let presence = analyze_presence(&results);
        assert_eq!(presence[0].platform, Platform::Youtube);
        assert_eq!(presence[1].platform, Platform::Instagram, "tie broken alphabetically");
        assert_eq!(presence[2].platform, Platform::Tiktok);
    }

    #[test]
    fn zero_links_with_success_is_inactive_not_failed() {
        let results = vec![result(Platform::Twitch, true, Some(200_000), 0)];
        let presence = analyze_presence(&results);
        assert_eq!(presence.len(), 1);
        assert!(!presence[0].active);
        assert_eq!(presence[0].link_share_tier, LinkShareTier::None);
        assert!(presence[0].verified_estimate);
    }

    #[test]
    fn missing_metrics_degrade_to_zero_followers() {
        let results = vec![result(Platform::Twitter, true, None, 3)];
        let presence = analyze_presence(&results);
        assert_eq!(presence[0].followers, 0);
        assert_eq!(presence[0].audience_class, AudienceClass::Nano);
        assert_eq!(presence[0].link_share_tier, LinkShareTier::Moderate);
    }
}
