//! Shared domain vocabulary used across normalization, deduplication, and
//! analysis. Kept as named tables so thresholds and membership are
//! independently testable and tunable.

/// Known "link-in-bio" aggregator services: `(canonical domain, display
/// name)`. Presence of one of these domains among a creator's links is the
/// strongest signal of existing link-management behavior.
pub const KNOWN_AGGREGATORS: &[(&str, &str)] = &[
    ("linktr.ee", "Linktree"),
    ("beacons.ai", "Beacons"),
    ("linkin.bio", "Linkin.bio"),
    ("lnk.bio", "Lnk.Bio"),
    ("stan.store", "Stan Store"),
    ("komi.io", "Komi"),
    ("milkshake.app", "Milkshake"),
    ("carrd.co", "Carrd"),
    ("taplink.cc", "Taplink"),
    ("solo.to", "Solo"),
];

/// Marketplace domains that get product-identity canonicalization and a
/// structural query-parameter allow-list instead of generic stripping.
pub const MARKETPLACE_DOMAINS: &[&str] = &[
    "amazon.com",
    "amzn.to",
    "etsy.com",
    "ebay.com",
    "walmart.com",
    "target.com",
    "aliexpress.com",
];

/// Look up an aggregator display name for a canonical host, if the host is
/// (or is a subdomain of) a known aggregator domain.
#[must_use]
pub fn aggregator_name(host: &str) -> Option<&'static str> {
    KNOWN_AGGREGATORS
        .iter()
        .find(|(domain, _)| host == *domain || host.ends_with(&format!(".{domain}")))
        .map(|(_, name)| *name)
}

/// Whether a canonical host belongs to a known marketplace.
#[must_use]
pub fn is_marketplace(host: &str) -> bool {
    marketplace_root(host).is_some()
}

/// The registered marketplace domain a host belongs to, if any
/// (`www.amazon.com` → `amazon.com`).
#[must_use]
pub fn marketplace_root(host: &str) -> Option<&'static str> {
    MARKETPLACE_DOMAINS
        .iter()
        .find(|domain| host == **domain || host.ends_with(&format!(".{domain}")))
        .copied()
}
