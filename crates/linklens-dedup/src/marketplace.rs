//! Marketplace product identity — a stronger equivalence than the canonical
//! key for domains where one product page hides behind many URL shapes.

use linklens_core::tables::marketplace_root;
use regex::Regex;
use url::Url;

/// A product's stable identity on a marketplace: the marketplace's root
/// domain plus the product identifier recovered from the URL path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductIdentity {
    pub domain: &'static str,
    pub product_id: String,
}

/// Recover a product identity from well-known marketplace path shapes:
///
/// - Amazon: `/dp/<ASIN>`, `/gp/product/<ASIN>`, `/product/<ASIN>` — a
///   10-character alphanumeric code
/// - Etsy: `/listing/<digits>`
/// - eBay: `/itm/<digits>` (optionally with a slug segment before the id)
/// - Walmart: `/ip/…/<digits>`
///
/// Two URLs sharing an identity are the same link even when their canonical
/// keys differ.
#[must_use]
pub fn product_identity(url: &str) -> Option<ProductIdentity> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let domain = marketplace_root(host)?;

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let product_id = match domain {
        "amazon.com" => {
            let asin_re = Regex::new(r"^[A-Za-z0-9]{10}$").expect("valid regex");
            segments
                .windows(2)
                .find(|w| matches!(w[0], "dp" | "product") && asin_re.is_match(w[1]))
                .map(|w| w[1])?
        }
        "etsy.com" => segment_after(&segments, "listing", |s| {
            s.chars().all(|c| c.is_ascii_digit())
        })?,
        "ebay.com" => segments
            .iter()
            .skip_while(|s| **s != "itm")
            .skip(1)
            .find(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
            .copied()?,
        "walmart.com" => {
            if segments.first() != Some(&"ip") {
                return None;
            }
            segments
                .iter()
                .rev()
                .find(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
                .copied()?
        }
        _ => return None,
    };

    Some(ProductIdentity {
        domain,
        product_id: product_id.to_lowercase(),
    })
}

fn segment_after<'a>(
    segments: &[&'a str],
    marker: &str,
    accept: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    segments
        .windows(2)
        .find(|w| w[0] == marker && accept(w[1]))
        .map(|w| w[1])
}
