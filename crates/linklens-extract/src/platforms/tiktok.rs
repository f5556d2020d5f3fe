//! TikTok profile extractor.

use async_trait::async_trait;
use regex::Regex;

use linklens_core::{Platform, PlatformMetrics, RawLink, SourceContext};

use crate::client::ProfileClient;
use crate::error::ExtractError;
use crate::extractor::{Extraction, PlatformExtractor};
use crate::platforms::{dedupe_by_url, json_unescape};

/// Extracts the bio link and follower stats from a TikTok profile page.
///
/// TikTok ships profile state in a rehydration script; `bioLink.link` and
/// the `stats` block are stable enough to pattern-match directly.
pub struct TiktokExtractor {
    client: ProfileClient,
    profile_url: String,
}

impl TiktokExtractor {
    #[must_use]
    pub fn new(client: ProfileClient, profile_url: String) -> Self {
        Self {
            client,
            profile_url,
        }
    }
}

#[async_trait]
impl PlatformExtractor for TiktokExtractor {
    fn platform(&self) -> Platform {
        Platform::Tiktok
    }

    async fn extract(&self, handle: &str) -> Result<Extraction, ExtractError> {
        let url = self
            .profile_url
            .replace("{handle}", &super::encode_handle(handle));
        let html = self.client.fetch_text(&url).await?;

        let links = parse_bio_links(&html);
        let metrics = parse_metrics(&html);
        tracing::debug!(handle, count = links.len(), "extracted TikTok bio links");
        Ok(Extraction { links, metrics })
    }
}

fn parse_bio_links(html: &str) -> Vec<RawLink> {
    let bio_link_re =
        Regex::new(r#""bioLink"\s*:\s*\{"link"\s*:\s*"([^"]+)""#).expect("valid regex");

    let pairs: Vec<(Option<String>, String)> = bio_link_re
        .captures_iter(html)
        .map(|cap| (None, json_unescape(&cap[1])))
        .collect();

    dedupe_by_url(pairs)
        .into_iter()
        .map(|(title, url)| {
            // TikTok stores bio links without a scheme.
            let url = if url.starts_with("http") {
                url
            } else {
                format!("https://{url}")
            };
            RawLink::new(title, url, Platform::Tiktok, SourceContext::Bio)
        })
        .collect()
}

fn parse_metrics(html: &str) -> Option<PlatformMetrics> {
    let follower_re = Regex::new(r#""followerCount"\s*:\s*(\d+)"#).expect("valid regex");
    let followers = follower_re.captures(html)?[1].parse().ok()?;
    Some(PlatformMetrics {
        followers,
        engagement_rate: None,
    })
}
