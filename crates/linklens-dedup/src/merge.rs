//! Build-then-merge deduplication fold.
//!
//! Keys are computed for every input first (pure), links are grouped by
//! key, same-identity marketplace groups are united, and each group folds
//! into one immutable [`CanonicalLink`]. No accumulator is mutated while
//! being consulted, which is what makes order-independence hold.

use std::collections::{BTreeMap, BTreeSet};

use sha2::{Digest, Sha256};

use linklens_core::{CanonicalLink, LinkType, ProcessedLink};

use crate::canonical::canonical_key;
use crate::confidence;
use crate::marketplace::{product_identity, ProductIdentity};

/// Titles at or above this length are promotional copy, not labels, and
/// lose to shorter candidates.
const MAX_TITLE_CHARS: usize = 100;

/// Merge every observation of the same underlying link into one
/// [`CanonicalLink`] per canonical key (with marketplace product identity
/// as an additional merge rule), scored and sorted by
/// (confidence desc, occurrences desc, canonical URL asc).
#[must_use]
pub fn deduplicate(links: &[ProcessedLink]) -> Vec<CanonicalLink> {
    // Group by canonical key. BTreeMap gives key-sorted iteration, so every
    // later step is deterministic regardless of input order.
    let mut groups: BTreeMap<String, Vec<&ProcessedLink>> = BTreeMap::new();
    for link in links {
        groups
            .entry(canonical_key(&link.expanded_url))
            .or_default()
            .push(link);
    }

    // Marketplace refinement: groups sharing a product identity collapse
    // into the lexicographically smallest key among them.
    let mut identity_home: BTreeMap<ProductIdentity, String> = BTreeMap::new();
    for (key, group) in &groups {
        if let Some(identity) = group.iter().find_map(|l| product_identity(&l.expanded_url)) {
            identity_home.entry(identity).or_insert_with(|| key.clone());
        }
    }

    let mut merged: BTreeMap<String, Vec<&ProcessedLink>> = BTreeMap::new();
    for (key, group) in groups {
        let home = group
            .iter()
            .find_map(|l| product_identity(&l.expanded_url))
            .and_then(|identity| identity_home.get(&identity).cloned())
            .unwrap_or(key);
        merged.entry(home).or_default().extend(group);
    }

    let mut canonical: Vec<CanonicalLink> = merged
        .into_iter()
        .map(|(key, group)| fold_group(key, group))
        .collect();

    canonical.sort_by(|a, b| {
        b.confidence
            .cmp(&a.confidence)
            .then(b.occurrences.cmp(&a.occurrences))
            .then(a.canonical_url.cmp(&b.canonical_url))
    });

    tracing::debug!(
        input = links.len(),
        canonical = canonical.len(),
        "deduplicated links"
    );
    canonical
}

fn fold_group(canonical_url: String, mut group: Vec<&ProcessedLink>) -> CanonicalLink {
    // Fix the fold order so tie-breaks ("keep existing") cannot depend on
    // input order.
    group.sort_by(|a, b| {
        a.raw
            .original_url
            .cmp(&b.raw.original_url)
            .then(a.observed_at.cmp(&b.observed_at))
    });

    let occurrences = group.len();

    let mut original_urls: Vec<String> =
        group.iter().map(|l| l.raw.original_url.clone()).collect();
    original_urls.dedup();

    let platforms: BTreeSet<_> = group.iter().map(|l| l.raw.platform).collect();
    let contexts: BTreeSet<_> = group.iter().map(|l| l.raw.context).collect();

    let first_seen = group
        .iter()
        .map(|l| l.observed_at)
        .min()
        .expect("fold_group is only called on non-empty groups");
    let last_seen = group
        .iter()
        .map(|l| l.observed_at)
        .max()
        .expect("fold_group is only called on non-empty groups");

    let mut title: Option<&str> = None;
    for link in &group {
        let Some(candidate) = link.raw.title.as_deref() else {
            continue;
        };
        if candidate.chars().count() >= MAX_TITLE_CHARS {
            continue;
        }
        // Strictly longer wins; equal length keeps the existing title.
        if title.is_none_or(|current| candidate.chars().count() > current.chars().count()) {
            title = Some(candidate);
        }
    }

    let is_affiliate = group.iter().any(|l| l.is_affiliate);
    let affiliate_id = group
        .iter()
        .find_map(|l| l.affiliate_id.as_deref().filter(|id| !id.is_empty()))
        .map(str::to_string);
    let brand = group
        .iter()
        .find_map(|l| l.brand.as_deref().filter(|b| !b.is_empty()))
        .map(str::to_string);
    let link_type = group
        .iter()
        .map(|l| l.link_type)
        .find(|t| *t != LinkType::Unknown)
        .unwrap_or(LinkType::Unknown);

    let max_base = group
        .iter()
        .map(|l| l.raw.base_confidence)
        .max()
        .expect("fold_group is only called on non-empty groups");

    CanonicalLink {
        id: format!("{:x}", Sha256::digest(canonical_url.as_bytes())),
        confidence: confidence::score(max_base, occurrences, is_affiliate),
        canonical_url,
        original_urls,
        platforms: platforms.into_iter().collect(),
        contexts: contexts.into_iter().collect(),
        occurrences,
        first_seen,
        last_seen,
        title: title.map(str::to_string),
        link_type,
        brand,
        is_affiliate,
        affiliate_id,
    }
}
