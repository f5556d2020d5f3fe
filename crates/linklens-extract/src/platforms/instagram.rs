//! Instagram profile extractor.

use async_trait::async_trait;
use regex::Regex;

use linklens_core::{Platform, PlatformMetrics, RawLink, SourceContext};

use crate::client::ProfileClient;
use crate::error::ExtractError;
use crate::extractor::{Extraction, PlatformExtractor};
use crate::parse::parse_compact_count;
use crate::platforms::{dedupe_by_url, json_unescape};

/// Extracts bio links and follower counts from an Instagram profile page.
///
/// The web profile embeds the user record as JSON; `external_url` and the
/// newer `bio_links` array carry the outbound links, and the
/// `og:description` meta tag carries a compact follower count usable when
/// the embedded count is absent.
pub struct InstagramExtractor {
    client: ProfileClient,
    profile_url: String,
}

impl InstagramExtractor {
    #[must_use]
    pub fn new(client: ProfileClient, profile_url: String) -> Self {
        Self {
            client,
            profile_url,
        }
    }
}

#[async_trait]
impl PlatformExtractor for InstagramExtractor {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    async fn extract(&self, handle: &str) -> Result<Extraction, ExtractError> {
        let url = self
            .profile_url
            .replace("{handle}", &super::encode_handle(handle));
        let html = self.client.fetch_text(&url).await?;

        let links = parse_bio_links(&html);
        let metrics = parse_metrics(&html);
        tracing::debug!(handle, count = links.len(), "extracted Instagram bio links");
        Ok(Extraction { links, metrics })
    }
}

fn parse_bio_links(html: &str) -> Vec<RawLink> {
    let mut pairs = Vec::new();

    let external_re = Regex::new(r#""external_url"\s*:\s*"([^"]+)""#).expect("valid regex");
    for cap in external_re.captures_iter(html) {
        pairs.push((None, json_unescape(&cap[1])));
    }

    // bio_links entries: {"title":"...","url":"...","link_type":"external"}
    let bio_link_re =
        Regex::new(r#"\{"title"\s*:\s*"([^"]*)"\s*,\s*"url"\s*:\s*"([^"]+)"[^}]*\}"#)
            .expect("valid regex");
    for cap in bio_link_re.captures_iter(html) {
        let title = if cap[1].is_empty() {
            None
        } else {
            Some(json_unescape(&cap[1]))
        };
        pairs.push((title, json_unescape(&cap[2])));
    }

    dedupe_by_url(pairs)
        .into_iter()
        .filter(|(_, url)| url.starts_with("http") && !url.contains("instagram.com"))
        .map(|(title, url)| RawLink::new(title, url, Platform::Instagram, SourceContext::Bio))
        .collect()
}

fn parse_metrics(html: &str) -> Option<PlatformMetrics> {
    let json_count_re =
        Regex::new(r#""edge_followed_by"\s*:\s*\{"count"\s*:\s*(\d+)"#).expect("valid regex");
    if let Some(cap) = json_count_re.captures(html) {
        let followers = cap[1].parse().ok()?;
        return Some(PlatformMetrics {
            followers,
            engagement_rate: None,
        });
    }

    // og:description fallback: "1.2M Followers, 300 Following, 42 Posts — …"
    let og_re = Regex::new(r#"content="([\d.,]+[KMB]?) Followers"#).expect("valid regex");
    let cap = og_re.captures(html)?;
    let followers = parse_compact_count(&cap[1])?;
    Some(PlatformMetrics {
        followers,
        engagement_rate: None,
    })
}
