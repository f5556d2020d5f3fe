//! Link-type classification from destination domains.

use linklens_core::tables::{aggregator_name, is_marketplace};
use linklens_core::LinkType;
use url::Url;

/// Social networks — links back to other profiles rather than commerce.
const SOCIAL_DOMAINS: &[&str] = &[
    "instagram.com",
    "tiktok.com",
    "youtube.com",
    "youtu.be",
    "twitter.com",
    "x.com",
    "twitch.tv",
    "pinterest.com",
    "facebook.com",
    "threads.net",
    "discord.gg",
    "discord.com",
];

/// Commerce platforms and storefront keywords short of a full marketplace.
const COMMERCE_DOMAINS: &[&str] = &[
    "shopify.com",
    "gumroad.com",
    "teespring.com",
    "bigcartel.com",
    "squarespace.com",
    "shop.app",
    "patreon.com",
    "ko-fi.com",
    "buymeacoffee.com",
];

/// Content destinations: publishing, video, audio.
const CONTENT_DOMAINS: &[&str] = &[
    "substack.com",
    "medium.com",
    "spotify.com",
    "podcasts.apple.com",
    "soundcloud.com",
    "vimeo.com",
];

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{domain}"))
}

/// Classify a URL by destination domain. Unparseable URLs and unlisted
/// domains are `Unknown`.
#[must_use]
pub fn classify(url: &str) -> LinkType {
    let Ok(parsed) = Url::parse(url) else {
        return LinkType::Unknown;
    };
    let Some(host) = parsed.host_str() else {
        return LinkType::Unknown;
    };
    let host = host.strip_prefix("www.").unwrap_or(host).to_ascii_lowercase();

    if is_marketplace(&host) {
        return LinkType::Marketplace;
    }
    if aggregator_name(&host).is_some() {
        return LinkType::Aggregator;
    }
    if SOCIAL_DOMAINS.iter().any(|d| host_matches(&host, d)) {
        return LinkType::Social;
    }
    if COMMERCE_DOMAINS.iter().any(|d| host_matches(&host, d)) {
        return LinkType::Commerce;
    }
    if CONTENT_DOMAINS.iter().any(|d| host_matches(&host, d)) {
        return LinkType::Content;
    }

    LinkType::Unknown
}
