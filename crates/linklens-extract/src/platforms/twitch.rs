//! Twitch channel extractor.

use async_trait::async_trait;
use regex::Regex;

use linklens_core::{Platform, PlatformMetrics, RawLink, SourceContext};

use crate::client::ProfileClient;
use crate::error::ExtractError;
use crate::extractor::{Extraction, PlatformExtractor};
use crate::parse::extract_json_after;
use crate::platforms::dedupe_by_url;

/// Extracts about-panel links and follower counts from a Twitch channel's
/// about page.
///
/// The embedded GraphQL state carries a `socialMedias` array of
/// `{name, url}` entries and the channel's `followers.totalCount`.
pub struct TwitchExtractor {
    client: ProfileClient,
    profile_url: String,
}

impl TwitchExtractor {
    #[must_use]
    pub fn new(client: ProfileClient, profile_url: String) -> Self {
        Self {
            client,
            profile_url,
        }
    }
}

#[async_trait]
impl PlatformExtractor for TwitchExtractor {
    fn platform(&self) -> Platform {
        Platform::Twitch
    }

    async fn extract(&self, handle: &str) -> Result<Extraction, ExtractError> {
        let url = self
            .profile_url
            .replace("{handle}", &super::encode_handle(handle));
        let html = self.client.fetch_text(&url).await?;

        let links = parse_channel_links(&html);
        let metrics = parse_metrics(&html);
        tracing::debug!(handle, count = links.len(), "extracted Twitch channel links");
        Ok(Extraction { links, metrics })
    }
}

fn parse_channel_links(html: &str) -> Vec<RawLink> {
    let Some(array_json) = extract_json_after(html, "\"socialMedias\":") else {
        return Vec::new();
    };
    let Ok(serde_json::Value::Array(entries)) = serde_json::from_str(array_json) else {
        return Vec::new();
    };

    let pairs: Vec<(Option<String>, String)> = entries
        .iter()
        .filter_map(|entry| {
            let url = entry.get("url")?.as_str()?;
            if !url.starts_with("http") {
                return None;
            }
            let title = entry
                .get("title")
                .or_else(|| entry.get("name"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string);
            Some((title, url.to_string()))
        })
        .collect();

    dedupe_by_url(pairs)
        .into_iter()
        .map(|(title, url)| {
            RawLink::new(title, url, Platform::Twitch, SourceContext::ChannelDescription)
        })
        .collect()
}

fn parse_metrics(html: &str) -> Option<PlatformMetrics> {
    let follower_re =
        Regex::new(r#""followers"\s*:\s*\{[^}]*"totalCount"\s*:\s*(\d+)"#).expect("valid regex");
    let followers = follower_re.captures(html)?[1].parse().ok()?;
    Some(PlatformMetrics {
        followers,
        engagement_rate: None,
    })
}
