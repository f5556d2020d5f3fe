//! Link normalization: short-URL expansion, type classification, affiliate
//! detection, and brand extraction.
//!
//! Normalization is strictly per-link and best-effort: a link that cannot
//! be expanded keeps its original URL, a domain that matches no table is
//! `Unknown`. The normalizer never drops a link and never fails a run.

pub mod affiliate;
pub mod brand;
pub mod classify;
pub mod expand;

pub use affiliate::{detect_affiliate, AffiliateInfo};
pub use brand::extract_brand;
pub use classify::classify;
pub use expand::{expand_url, is_shortener};

use chrono::Utc;
use reqwest::Client;

use linklens_core::{ProcessedLink, RawLink};

/// One-pass normalizer over raw links.
pub struct Normalizer {
    client: Client,
}

impl Normalizer {
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the expansion HTTP client cannot be
    /// constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: expand::expansion_client(timeout_secs, user_agent)?,
        })
    }

    /// Normalize every raw link: expand known shorteners, classify the
    /// destination, detect affiliate tagging (on either the original or
    /// expanded form), and guess the brand.
    pub async fn process(&self, raw: Vec<RawLink>) -> Vec<ProcessedLink> {
        let mut processed = Vec::with_capacity(raw.len());

        for link in raw {
            let expanded_url = expand::expand_url(&self.client, &link.original_url).await;

            let link_type = classify::classify(&expanded_url);
            let brand = brand::extract_brand(&expanded_url);

            // Affiliate tags can live on either side of a shortener.
            let original_info = affiliate::detect_affiliate(&link.original_url);
            let expanded_info = affiliate::detect_affiliate(&expanded_url);
            let is_affiliate = original_info.is_affiliate || expanded_info.is_affiliate;
            let affiliate_id = expanded_info.affiliate_id.or(original_info.affiliate_id);

            processed.push(ProcessedLink {
                raw: link,
                expanded_url,
                link_type,
                brand,
                is_affiliate,
                affiliate_id,
                observed_at: Utc::now(),
            });
        }

        processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linklens_core::{LinkType, Platform, SourceContext};

    fn raw(url: &str) -> RawLink {
        RawLink::new(None, url, Platform::Instagram, SourceContext::Bio)
    }

    #[tokio::test]
    async fn process_classifies_and_detects_affiliate() {
        let normalizer = Normalizer::new(5, "linklens-test/0.1").unwrap();
        let processed = normalizer
            .process(vec![raw("https://www.amazon.com/dp/B000111222?tag=creator-20")])
            .await;

        assert_eq!(processed.len(), 1);
        let link = &processed[0];
        assert_eq!(link.link_type, LinkType::Marketplace);
        assert!(link.is_affiliate);
        assert_eq!(link.affiliate_id.as_deref(), Some("creator-20"));
        assert_eq!(link.brand.as_deref(), Some("Amazon"));
        // Not a shortener: no expansion attempted.
        assert_eq!(
            link.expanded_url,
            "https://www.amazon.com/dp/B000111222?tag=creator-20"
        );
    }

    #[tokio::test]
    async fn process_keeps_unclassifiable_links() {
        let normalizer = Normalizer::new(5, "linklens-test/0.1").unwrap();
        let processed = normalizer.process(vec![raw("not a url at all")]).await;

        assert_eq!(processed.len(), 1, "unparseable links are kept, not dropped");
        assert_eq!(processed[0].link_type, LinkType::Unknown);
        assert!(!processed[0].is_affiliate);
        assert_eq!(processed[0].expanded_url, "not a url at all");
    }
}
