//! Shared parsing helpers for profile pages: embedded-JSON extraction,
//! anchor scanning, and compact follower-count parsing.

use regex::Regex;

/// Try to extract a balanced JSON object or array from the start of `s`.
///
/// Scans character-by-character tracking bracket depth, respecting string
/// literals and escape sequences. Returns the shortest prefix of `s` that
/// forms a complete `{…}`/`[…]` value, or `None` if unterminated. A closer
/// that does not match the opener at depth 0 is never accepted.
pub(crate) fn extract_balanced_json(s: &str) -> Option<&str> {
    let opener = s.chars().next()?;
    let closer = match opener {
        '{' => '}',
        '[' => ']',
        _ => return None,
    };
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escape = false;
    for (i, c) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if in_string {
            match c {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth -= 1;
                if depth == 0 {
                    if c == closer {
                        return Some(&s[..=i]);
                    }
                    return None;
                }
            }
            _ => {}
        }
    }
    None
}

/// Find `marker` in `html` and extract the first balanced JSON value that
/// starts at the next `{` or `[` after it.
///
/// Covers the common embedded-state shapes: `<script id="__NEXT_DATA__"
/// type="application/json">{…}</script>`, `window.__INITIAL_STATE__ = {…};`.
pub(crate) fn extract_json_after<'a>(html: &'a str, marker: &str) -> Option<&'a str> {
    let after = &html[html.find(marker)? + marker.len()..];
    let start = after.find(['{', '['])?;
    extract_balanced_json(&after[start..])
}

/// An anchor scraped from profile HTML: optional inner text and an absolute
/// href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Anchor {
    pub title: Option<String>,
    pub href: String,
}

/// Hrefs that are navigation/boilerplate rather than creator links.
const BOILERPLATE_FRAGMENTS: [&str; 8] = [
    "/terms",
    "/privacy",
    "/cookie",
    "/login",
    "/signup",
    "/legal",
    "apps.apple.com",
    "play.google.com",
];

/// Scan `html` for absolute-URL anchors, dropping relative links,
/// boilerplate (terms/privacy/app-store), and duplicate hrefs.
pub(crate) fn extract_anchor_links(html: &str) -> Vec<Anchor> {
    let anchor_re =
        Regex::new(r#"(?is)<a\b[^>]*href="(https?://[^"]+)"[^>]*>(.*?)</a>"#).expect("valid regex");
    let tag_re = Regex::new(r"(?s)<[^>]+>").expect("valid regex");

    let mut seen = std::collections::HashSet::new();
    let mut anchors = Vec::new();

    for cap in anchor_re.captures_iter(html) {
        let href = cap[1].to_string();
        let lower = href.to_ascii_lowercase();
        if BOILERPLATE_FRAGMENTS.iter().any(|f| lower.contains(f)) {
            continue;
        }
        if !seen.insert(href.clone()) {
            continue;
        }

        let inner = tag_re.replace_all(&cap[2], " ");
        let title = {
            let trimmed = inner.split_whitespace().collect::<Vec<_>>().join(" ");
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        };

        anchors.push(Anchor { title, href });
    }

    anchors
}

/// Parse a compact count string as rendered on profile pages: `"12.5K"`,
/// `"1.2M"`, `"3,456"`, `"987"`. Returns `None` for anything else.
pub(crate) fn parse_compact_count(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (number_part, multiplier) = match s.chars().last()? {
        'k' | 'K' => (&s[..s.len() - 1], 1_000.0),
        'm' | 'M' => (&s[..s.len() - 1], 1_000_000.0),
        'b' | 'B' => (&s[..s.len() - 1], 1_000_000_000.0),
        _ => (s, 1.0),
    };

    let cleaned: String = number_part.chars().filter(|c| *c != ',').collect();
    let value: f64 = cleaned.trim().parse().ok()?;
    if value < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some((value * multiplier).round() as u64)
}
