//! URL canonicalization — the merge key for deduplication.

use linklens_core::tables::marketplace_root;
use url::form_urlencoded;
use url::Url;

/// Tracking parameters stripped from every query string. `utm_*` is matched
/// by prefix in addition to this list.
const TRACKING_PARAMS: &[&str] = &[
    "ref",
    "ref_",
    "fbclid",
    "gclid",
    "igshid",
    "affiliate",
    "partner",
    "clickid",
    "click_id",
    "irclickid",
    "cjevent",
    "mc_cid",
    "mc_eid",
    "si",
];

/// On marketplace domains the generic strip list is too weak — seller and
/// campaign tags vary endlessly. Instead only these structurally meaningful
/// parameters survive.
const MARKETPLACE_PARAM_ALLOW: &[&str] = &["variant", "v", "node"];

fn is_tracking_param(name: &str) -> bool {
    name.starts_with("utm_") || TRACKING_PARAMS.contains(&name)
}

/// Compute the canonical key for a URL:
///
/// 1. strip tracking parameters (marketplace domains instead keep only the
///    structural allow-list),
/// 2. force the https scheme, drop a leading `www.` host label,
/// 3. strip a single trailing slash except on bare-root URLs,
/// 4. sort the surviving query pairs and lower-case the result.
///
/// A URL that does not parse degrades to best-effort trimming and
/// lower-casing — it still gets a key, it is never dropped.
#[must_use]
pub fn canonical_key(url: &str) -> String {
    let trimmed = url.trim();
    let Ok(parsed) = Url::parse(trimmed) else {
        return fallback_key(trimmed);
    };
    let Some(host) = parsed.host_str() else {
        return fallback_key(trimmed);
    };

    let host = host.strip_prefix("www.").unwrap_or(host);
    let marketplace = marketplace_root(host);

    let mut key = String::from("https://");
    key.push_str(host);
    if let Some(port) = parsed.port() {
        key.push(':');
        key.push_str(&port.to_string());
    }

    let path = parsed.path();
    if path != "/" {
        key.push_str(path.strip_suffix('/').unwrap_or(path));
    }

    let mut pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(name, _)| match marketplace {
            Some(_) => MARKETPLACE_PARAM_ALLOW.contains(&name.as_ref()),
            None => !is_tracking_param(name),
        })
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    if !pairs.is_empty() {
        pairs.sort();
        let query: String = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        key.push('?');
        key.push_str(&query);
    }

    key.to_lowercase()
}

/// Best-effort key for strings that do not parse as URLs.
fn fallback_key(url: &str) -> String {
    let stripped = url.strip_suffix('/').unwrap_or(url);
    stripped.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_utm_and_ref_params() {
        assert_eq!(
            canonical_key("https://a.com/x?utm_source=ig&ref=bio"),
            canonical_key("https://a.com/x"),
        );
    }

    #[test]
    fn keeps_semantic_query_params() {
        assert_eq!(
            canonical_key("https://a.com/search?q=mugs&utm_campaign=spring"),
            "https://a.com/search?q=mugs"
        );
    }

    #[test]
    fn forces_https_and_strips_www() {
        assert_eq!(
            canonical_key("http://www.Example.com/Path"),
            "https://example.com/path"
        );
    }

    #[test]
    fn strips_single_trailing_slash_but_not_bare_root() {
        assert_eq!(canonical_key("https://a.com/shop/"), "https://a.com/shop");
        assert_eq!(canonical_key("https://a.com/"), "https://a.com");
        assert_eq!(canonical_key("https://a.com"), "https://a.com");
    }

    #[test]
    fn sorts_query_pairs_for_stability() {
        assert_eq!(
            canonical_key("https://a.com/x?b=2&a=1"),
            canonical_key("https://a.com/x?a=1&b=2"),
        );
    }

    #[test]
    fn marketplace_keeps_only_allow_listed_params() {
        assert_eq!(
            canonical_key("https://www.amazon.com/dp/B000111222?tag=a&th=1&psc=1"),
            "https://amazon.com/dp/b000111222"
        );
        assert_eq!(
            canonical_key("https://www.amazon.com/dp/B000111222?tag=b&variant=red"),
            "https://amazon.com/dp/b000111222?variant=red"
        );
    }

    #[test]
    fn different_tracking_variants_share_a_key() {
        let a = canonical_key("https://amazon.com/dp/B000111222?tag=a");
        let b = canonical_key("https://amazon.com/dp/B000111222?tag=b&utm_source=yt");
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_urls_get_best_effort_keys() {
        assert_eq!(canonical_key("  Not A URL/  "), "not a url");
        assert_eq!(canonical_key("mailto:someone"), "mailto:someone");
    }

    #[test]
    fn non_default_port_is_preserved() {
        assert_eq!(
            canonical_key("http://a.com:8080/x"),
            "https://a.com:8080/x"
        );
    }
}
