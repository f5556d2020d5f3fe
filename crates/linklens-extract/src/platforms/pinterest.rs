//! Pinterest profile extractor.

use async_trait::async_trait;
use regex::Regex;

use linklens_core::{Platform, PlatformMetrics, RawLink, SourceContext};

use crate::client::ProfileClient;
use crate::error::ExtractError;
use crate::extractor::{Extraction, PlatformExtractor};
use crate::platforms::{dedupe_by_url, json_unescape};

/// Extracts the claimed website and follower count from a Pinterest profile
/// page's embedded `__PWS_DATA__` state.
pub struct PinterestExtractor {
    client: ProfileClient,
    profile_url: String,
}

impl PinterestExtractor {
    #[must_use]
    pub fn new(client: ProfileClient, profile_url: String) -> Self {
        Self {
            client,
            profile_url,
        }
    }
}

#[async_trait]
impl PlatformExtractor for PinterestExtractor {
    fn platform(&self) -> Platform {
        Platform::Pinterest
    }

    async fn extract(&self, handle: &str) -> Result<Extraction, ExtractError> {
        let url = self
            .profile_url
            .replace("{handle}", &super::encode_handle(handle));
        let html = self.client.fetch_text(&url).await?;

        let links = parse_bio_links(&html);
        let metrics = parse_metrics(&html);
        tracing::debug!(handle, count = links.len(), "extracted Pinterest profile links");
        Ok(Extraction { links, metrics })
    }
}

fn parse_bio_links(html: &str) -> Vec<RawLink> {
    let website_re = Regex::new(r#""website_url"\s*:\s*"([^"]+)""#).expect("valid regex");

    let pairs: Vec<(Option<String>, String)> = website_re
        .captures_iter(html)
        .map(|cap| (None, json_unescape(&cap[1])))
        .collect();

    dedupe_by_url(pairs)
        .into_iter()
        .filter(|(_, url)| url.starts_with("http") && !url.contains("pinterest.com"))
        .map(|(title, url)| RawLink::new(title, url, Platform::Pinterest, SourceContext::Bio))
        .collect()
}

fn parse_metrics(html: &str) -> Option<PlatformMetrics> {
    let follower_re = Regex::new(r#""follower_count"\s*:\s*(\d+)"#).expect("valid regex");
    let followers = follower_re.captures(html)?[1].parse().ok()?;
    Some(PlatformMetrics {
        followers,
        engagement_rate: None,
    })
}
