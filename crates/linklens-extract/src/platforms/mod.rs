//! Platform extraction adapters.
//!
//! One module per platform. Aggregator services (Linktree, Beacons) parse
//! the profile's embedded state JSON and fall back to anchor scanning;
//! social platforms pull bio links and follower metrics out of profile
//! HTML with per-platform patterns.

mod beacons;
mod instagram;
mod linktree;
mod pinterest;
mod tiktok;
mod twitch;
mod twitter;
mod youtube;

pub use beacons::BeaconsExtractor;
pub use instagram::InstagramExtractor;
pub use linktree::LinktreeExtractor;
pub use pinterest::PinterestExtractor;
pub use tiktok::TiktokExtractor;
pub use twitch::TwitchExtractor;
pub use twitter::TwitterExtractor;
pub use youtube::YoutubeExtractor;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

/// Characters that must be escaped when a handle is substituted into a
/// profile URL path. Dots, underscores, and dashes are common in handles
/// and stay literal.
const HANDLE_ESCAPE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'&')
    .add(b'<')
    .add(b'>');

/// Percent-encode a handle for use in a profile URL path segment.
pub(crate) fn encode_handle(handle: &str) -> String {
    utf8_percent_encode(handle, HANDLE_ESCAPE_SET).to_string()
}

/// Decode a JSON-escaped string fragment captured by regex (`\/`, `&`,
/// …) back to its literal form. Returns the input unchanged if it is not a
/// valid JSON string body.
pub(crate) fn json_unescape(s: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{s}\"")).unwrap_or_else(|_| s.to_string())
}

/// File extensions and fragments that mark a URL as an asset or in-platform
/// navigation rather than a creator's outbound link.
fn is_asset_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or(&lower);
    [".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".css", ".js", ".ico", ".woff", ".woff2"]
        .iter()
        .any(|ext| path.ends_with(ext))
}

/// Recursively collect `(title, url)` pairs from any object in an embedded
/// state tree that carries an absolute `url` field, skipping asset URLs and
/// URLs on `own_domain` (the platform's own pages).
pub(crate) fn collect_state_links(
    value: &Value,
    own_domain: &str,
    out: &mut Vec<(Option<String>, String)>,
) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(url)) = map.get("url") {
                if url.starts_with("http") && !url.contains(own_domain) && !is_asset_url(url) {
                    let title = map
                        .get("title")
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string);
                    out.push((title, url.clone()));
                }
            }
            for v in map.values() {
                collect_state_links(v, own_domain, out);
            }
        }
        Value::Array(arr) => {
            for v in arr {
                collect_state_links(v, own_domain, out);
            }
        }
        _ => {}
    }
}

/// Drop duplicate URLs while keeping first-seen order.
pub(crate) fn dedupe_by_url(links: Vec<(Option<String>, String)>) -> Vec<(Option<String>, String)> {
    let mut seen = std::collections::HashSet::new();
    links
        .into_iter()
        .filter(|(_, url)| seen.insert(url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_handle_escapes_path_breaking_characters() {
        assert_eq!(encode_handle("some one/../x"), "some%20one%2F..%2Fx");
        assert_eq!(encode_handle("plain.handle_ok-1"), "plain.handle_ok-1");
    }

    #[test]
    fn json_unescape_decodes_escaped_ampersand() {
        assert_eq!(
            json_unescape(r"https:\/\/example.com?a=1&b=2"),
            "https://example.com?a=1&b=2"
        );
    }

    #[test]
    fn json_unescape_passes_plain_strings_through() {
        assert_eq!(json_unescape("https://example.com"), "https://example.com");
    }

    #[test]
    fn collect_state_links_walks_nested_arrays_and_objects() {
        let state = json!({
            "page": {
                "links": [
                    {"title": "Shop", "url": "https://shop.example.com"},
                    {"title": "", "url": "https://other.example.com"},
                ],
                "avatar": {"url": "https://cdn.linktr.ee/avatar.png"},
                "self": {"url": "https://linktr.ee/someone"}
            }
        });
        let mut out = Vec::new();
        collect_state_links(&state, "linktr.ee", &mut out);
        assert_eq!(
            out,
            vec![
                (Some("Shop".to_string()), "https://shop.example.com".to_string()),
                (None, "https://other.example.com".to_string()),
            ]
        );
    }

    #[test]
    fn dedupe_by_url_keeps_first_occurrence() {
        let links = vec![
            (Some("A".to_string()), "https://example.com".to_string()),
            (Some("B".to_string()), "https://example.com".to_string()),
        ];
        let deduped = dedupe_by_url(links);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].0.as_deref(), Some("A"));
    }
}
