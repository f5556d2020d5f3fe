//! Linktree profile page extractor.

use async_trait::async_trait;

use linklens_core::{Platform, RawLink, SourceContext};

use crate::client::ProfileClient;
use crate::error::ExtractError;
use crate::extractor::{Extraction, PlatformExtractor};
use crate::parse::{extract_anchor_links, extract_json_after};
use crate::platforms::{collect_state_links, dedupe_by_url};

/// Extracts the curated link list from a `linktr.ee/<handle>` page.
///
/// Linktree renders through Next.js, so the full link set is available in
/// the `__NEXT_DATA__` state script. Anchor scanning covers pages where the
/// state shape has drifted.
pub struct LinktreeExtractor {
    client: ProfileClient,
    profile_url: String,
}

impl LinktreeExtractor {
    #[must_use]
    pub fn new(client: ProfileClient, profile_url: String) -> Self {
        Self {
            client,
            profile_url,
        }
    }
}

#[async_trait]
impl PlatformExtractor for LinktreeExtractor {
    fn platform(&self) -> Platform {
        Platform::Linktree
    }

    async fn extract(&self, handle: &str) -> Result<Extraction, ExtractError> {
        let url = self
            .profile_url
            .replace("{handle}", &super::encode_handle(handle));
        let html = self.client.fetch_text(&url).await?;
        let links = parse_profile_links(&html);
        tracing::debug!(handle, count = links.len(), "extracted Linktree links");
        Ok(Extraction {
            links,
            metrics: None,
        })
    }
}

fn parse_profile_links(html: &str) -> Vec<RawLink> {
    if let Some(json) = extract_json_after(html, "__NEXT_DATA__") {
        if let Ok(state) = serde_json::from_str::<serde_json::Value>(json) {
            // The link list proper lives under pageProps; scoping the walk
            // there keeps header/meta URLs out.
            let scope = state.pointer("/props/pageProps").unwrap_or(&state);
            let mut pairs = Vec::new();
            collect_state_links(scope, "linktr.ee", &mut pairs);
            let pairs = dedupe_by_url(pairs);
            if !pairs.is_empty() {
                return pairs
                    .into_iter()
                    .map(|(title, url)| {
                        RawLink::new(title, url, Platform::Linktree, SourceContext::AggregatorPage)
                    })
                    .collect();
            }
        }
    }

    extract_anchor_links(html)
        .into_iter()
        .filter(|a| !a.href.contains("linktr.ee"))
        .map(|a| RawLink::new(a.title, a.href, Platform::Linktree, SourceContext::AggregatorPage))
        .collect()
}
