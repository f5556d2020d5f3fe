//! Twitter/X profile extractor.

use async_trait::async_trait;
use regex::Regex;

use linklens_core::{Platform, PlatformMetrics, RawLink, SourceContext};

use crate::client::ProfileClient;
use crate::error::ExtractError;
use crate::extractor::{Extraction, PlatformExtractor};
use crate::platforms::{dedupe_by_url, json_unescape};

/// Extracts the bio URL and follower count from a Twitter/X profile page.
///
/// The profile entity JSON carries `expanded_url` entries for the bio
/// website field and `followers_count` for the account.
pub struct TwitterExtractor {
    client: ProfileClient,
    profile_url: String,
}

impl TwitterExtractor {
    #[must_use]
    pub fn new(client: ProfileClient, profile_url: String) -> Self {
        Self {
            client,
            profile_url,
        }
    }
}

#[async_trait]
impl PlatformExtractor for TwitterExtractor {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    async fn extract(&self, handle: &str) -> Result<Extraction, ExtractError> {
        let url = self
            .profile_url
            .replace("{handle}", &super::encode_handle(handle));
        let html = self.client.fetch_text(&url).await?;

        let links = parse_bio_links(&html);
        let metrics = parse_metrics(&html);
        tracing::debug!(handle, count = links.len(), "extracted Twitter bio links");
        Ok(Extraction { links, metrics })
    }
}

fn parse_bio_links(html: &str) -> Vec<RawLink> {
    let expanded_re = Regex::new(r#""expanded_url"\s*:\s*"([^"]+)""#).expect("valid regex");

    let pairs: Vec<(Option<String>, String)> = expanded_re
        .captures_iter(html)
        .map(|cap| (None, json_unescape(&cap[1])))
        .collect();

    dedupe_by_url(pairs)
        .into_iter()
        .filter(|(_, url)| {
            url.starts_with("http") && !url.contains("twitter.com") && !url.contains("x.com")
        })
        .map(|(title, url)| RawLink::new(title, url, Platform::Twitter, SourceContext::Bio))
        .collect()
}

fn parse_metrics(html: &str) -> Option<PlatformMetrics> {
    let follower_re = Regex::new(r#""followers_count"\s*:\s*(\d+)"#).expect("valid regex");
    let followers = follower_re.captures(html)?[1].parse().ok()?;
    Some(PlatformMetrics {
        followers,
        engagement_rate: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_expanded_bio_url() {
        let html = r#""entities":{"url":{"urls":[{"url":"https:\/\/t.co\/abc","expanded_url":"https:\/\/linktr.ee\/someone"}]}},"followers_count":50231"#;
        let links = parse_bio_links(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].original_url, "https://linktr.ee/someone");
        assert_eq!(links[0].context, SourceContext::Bio);
    }

    #[test]
    fn filters_out_twitter_internal_urls() {
        let html = r#""expanded_url":"https://twitter.com/someone/status/1""#;
        assert!(parse_bio_links(html).is_empty());
    }

    #[test]
    fn parses_follower_count() {
        let html = r#""followers_count":50231,"friends_count":812"#;
        assert_eq!(parse_metrics(html).unwrap().followers, 50_231);
    }
}
