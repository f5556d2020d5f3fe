//! Brand-name extraction from destination domains.

use url::Url;

/// Domains whose second-level label would produce a wrong or unhelpful
/// brand guess, mapped to the name to use instead.
const BRAND_OVERRIDES: &[(&str, &str)] = &[
    ("amzn.to", "Amazon"),
    ("amazon.com", "Amazon"),
    ("etsy.com", "Etsy"),
    ("ebay.com", "eBay"),
    ("walmart.com", "Walmart"),
    ("target.com", "Target"),
    ("aliexpress.com", "AliExpress"),
    ("youtu.be", "YouTube"),
    ("ko-fi.com", "Ko-fi"),
];

/// Generic hosting/aggregator domains where the subdomain, not the
/// second-level label, names the creator's storefront.
const SUBDOMAIN_BRAND_DOMAINS: &[&str] = &["gumroad.com", "substack.com", "bigcartel.com"];

/// Guess the brand behind a URL from its host: an explicit override, the
/// storefront subdomain on known hosting domains, or the title-cased
/// second-level label otherwise.
#[must_use]
pub fn extract_brand(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    if let Some((_, name)) = BRAND_OVERRIDES
        .iter()
        .find(|(domain, _)| host == *domain || host.ends_with(&format!(".{domain}")))
    {
        return Some((*name).to_string());
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return None;
    }

    for domain in SUBDOMAIN_BRAND_DOMAINS {
        if let Some(prefix) = host.strip_suffix(&format!(".{domain}")) {
            let storefront = prefix.rsplit('.').next()?;
            return Some(title_case(storefront));
        }
    }

    let second_level = labels[labels.len() - 2];
    if second_level.is_empty() {
        return None;
    }
    Some(title_case(second_level))
}

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
