//! Affiliate-parameter detection.

use url::Url;

/// Query parameters that mark a link as affiliate-tagged. Ordered roughly
/// by how often they appear in creator links; the first match supplies the
/// affiliate id.
const AFFILIATE_PARAMS: &[&str] = &[
    "tag",
    "ref",
    "aff",
    "aff_id",
    "affiliate",
    "affiliate_id",
    "partner",
    "irclickid",
    "clickid",
    "click_id",
    "cjevent",
];

/// Path segments that mark affiliate routing even without a tagged query.
const AFFILIATE_PATH_SEGMENTS: &[&str] = &["ref", "aff", "referral"];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AffiliateInfo {
    pub is_affiliate: bool,
    pub affiliate_id: Option<String>,
}

/// Detect affiliate tagging on a URL: a known affiliate query parameter
/// (whose value becomes the affiliate id) or a known affiliate path
/// segment. Unparseable URLs are never affiliate.
#[must_use]
pub fn detect_affiliate(url: &str) -> AffiliateInfo {
    let Ok(parsed) = Url::parse(url) else {
        return AffiliateInfo::default();
    };

    for param in AFFILIATE_PARAMS {
        if let Some((_, value)) = parsed.query_pairs().find(|(k, _)| k.as_ref() == *param) {
            let value = value.trim();
            return AffiliateInfo {
                is_affiliate: true,
                affiliate_id: if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                },
            };
        }
    }

    let mut segments = parsed.path().split('/').filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if AFFILIATE_PATH_SEGMENTS.contains(&segment) {
            return AffiliateInfo {
                is_affiliate: true,
                affiliate_id: segments.next().map(str::to_string),
            };
        }
    }

    AffiliateInfo::default()
}
