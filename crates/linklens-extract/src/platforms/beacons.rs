//! Beacons.ai profile page extractor.

use async_trait::async_trait;

use linklens_core::{Platform, RawLink, SourceContext};

use crate::client::ProfileClient;
use crate::error::ExtractError;
use crate::extractor::{Extraction, PlatformExtractor};
use crate::parse::{extract_anchor_links, extract_json_after};
use crate::platforms::{collect_state_links, dedupe_by_url};

/// Extracts the link blocks from a `beacons.ai/<handle>` page.
///
/// Beacons embeds its page model as `window.__INITIAL_STATE__ = {…};`; when
/// that is absent the anchor fallback still recovers outbound links.
pub struct BeaconsExtractor {
    client: ProfileClient,
    profile_url: String,
}

impl BeaconsExtractor {
    #[must_use]
    pub fn new(client: ProfileClient, profile_url: String) -> Self {
        Self {
            client,
            profile_url,
        }
    }
}

#[async_trait]
impl PlatformExtractor for BeaconsExtractor {
    fn platform(&self) -> Platform {
        Platform::Beacons
    }

    async fn extract(&self, handle: &str) -> Result<Extraction, ExtractError> {
        let url = self
            .profile_url
            .replace("{handle}", &super::encode_handle(handle));
        let html = self.client.fetch_text(&url).await?;
        let links = parse_profile_links(&html);
        tracing::debug!(handle, count = links.len(), "extracted Beacons links");
        Ok(Extraction {
            links,
            metrics: None,
        })
    }
}

fn parse_profile_links(html: &str) -> Vec<RawLink> {
    for marker in ["__INITIAL_STATE__", "__NEXT_DATA__"] {
        let Some(json) = extract_json_after(html, marker) else {
            continue;
        };
        let Ok(state) = serde_json::from_str::<serde_json::Value>(json) else {
            continue;
        };
        let mut pairs = Vec::new();
        collect_state_links(&state, "beacons.ai", &mut pairs);
        let pairs = dedupe_by_url(pairs);
        if !pairs.is_empty() {
            return pairs
                .into_iter()
                .map(|(title, url)| {
                    RawLink::new(title, url, Platform::Beacons, SourceContext::AggregatorPage)
                })
                .collect();
        }
    }

    extract_anchor_links(html)
        .into_iter()
        .filter(|a| !a.href.contains("beacons.ai"))
        .map(|a| RawLink::new(a.title, a.href, Platform::Beacons, SourceContext::AggregatorPage))
        .collect()
}
