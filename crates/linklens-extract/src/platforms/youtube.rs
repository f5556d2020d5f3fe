//! YouTube channel extractor.

use async_trait::async_trait;
use regex::Regex;

use linklens_core::{Platform, PlatformMetrics, RawLink, SourceContext};

use crate::client::ProfileClient;
use crate::error::ExtractError;
use crate::extractor::{Extraction, PlatformExtractor};
use crate::parse::parse_compact_count;
use crate::platforms::{dedupe_by_url, json_unescape};

/// Extracts channel-description links and subscriber counts from a channel's
/// about page.
///
/// Channel links render through `channelExternalLinkViewModel` entries in
/// the initial data blob; subscriber counts only appear as compact strings
/// ("1.4M subscribers").
pub struct YoutubeExtractor {
    client: ProfileClient,
    profile_url: String,
}

impl YoutubeExtractor {
    #[must_use]
    pub fn new(client: ProfileClient, profile_url: String) -> Self {
        Self {
            client,
            profile_url,
        }
    }
}

#[async_trait]
impl PlatformExtractor for YoutubeExtractor {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    async fn extract(&self, handle: &str) -> Result<Extraction, ExtractError> {
        let url = self
            .profile_url
            .replace("{handle}", &super::encode_handle(handle));
        let html = self.client.fetch_text(&url).await?;

        let links = parse_channel_links(&html);
        let metrics = parse_metrics(&html);
        tracing::debug!(handle, count = links.len(), "extracted YouTube channel links");
        Ok(Extraction { links, metrics })
    }
}

fn parse_channel_links(html: &str) -> Vec<RawLink> {
    let link_re = Regex::new(
        r#""channelExternalLinkViewModel"\s*:\s*\{"title"\s*:\s*\{"content"\s*:\s*"([^"]*)"\}\s*,\s*"link"\s*:\s*\{"content"\s*:\s*"([^"]+)"\}"#,
    )
    .expect("valid regex");

    let pairs: Vec<(Option<String>, String)> = link_re
        .captures_iter(html)
        .map(|cap| {
            let title = if cap[1].is_empty() {
                None
            } else {
                Some(json_unescape(&cap[1]))
            };
            let mut url = json_unescape(&cap[2]);
            if !url.starts_with("http") {
                url = format!("https://{url}");
            }
            (title, url)
        })
        .collect();

    dedupe_by_url(pairs)
        .into_iter()
        .map(|(title, url)| {
            RawLink::new(title, url, Platform::Youtube, SourceContext::ChannelDescription)
        })
        .collect()
}

fn parse_metrics(html: &str) -> Option<PlatformMetrics> {
    let sub_re = Regex::new(r#"([\d.,]+[KMB]?)\s+subscribers"#).expect("valid regex");
    let followers = parse_compact_count(&sub_re.captures(html)?[1])?;
    Some(PlatformMetrics {
        followers,
        engagement_rate: None,
    })
}
