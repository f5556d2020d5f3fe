//! Short-URL expansion.

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;

/// Domains that exist to redirect. Only these are worth a network
/// round-trip; everything else is returned unchanged.
const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "t.co",
    "tinyurl.com",
    "goo.gl",
    "ow.ly",
    "buff.ly",
    "rebrand.ly",
    "is.gd",
    "amzn.to",
];

/// Redirect hops to follow before giving up. Shortener chains longer than
/// this are circular or adversarial.
const MAX_HOPS: usize = 5;

/// Whether `url`'s host is a known shortener.
#[must_use]
pub fn is_shortener(url: &str) -> bool {
    let Ok(parsed) = url::Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.strip_prefix("www.").unwrap_or(host);
    SHORTENER_DOMAINS.contains(&host)
}

/// Build the no-redirect client used for expansion: `Location` headers are
/// read manually so each hop can be inspected.
///
/// # Errors
///
/// Returns `reqwest::Error` if the client cannot be constructed.
pub fn expansion_client(timeout_secs: u64, user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(Policy::none())
        .user_agent(user_agent)
        .build()
}

/// Expand a shortened URL: known shortener hosts are resolved through
/// [`follow_redirects`]; anything else is returned unchanged.
pub async fn expand_url(client: &Client, url: &str) -> String {
    if !is_shortener(url) {
        return url.to_string();
    }
    follow_redirects(client, url).await
}

/// Follow `Location` headers from `url` up to [`MAX_HOPS`], returning the
/// final destination. Any failure (network error, missing/invalid header)
/// degrades to the best URL seen so far — expansion never drops a link.
pub async fn follow_redirects(client: &Client, url: &str) -> String {
    let mut current = url.to_string();
    for _ in 0..MAX_HOPS {
        let response = match client.get(&current).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(url = %current, error = %e, "short-URL expansion failed");
                return current;
            }
        };

        if !response.status().is_redirection() {
            return current;
        }

        let Some(location) = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
        else {
            return current;
        };

        // Relative Location values resolve against the current hop.
        current = match url::Url::parse(&current).and_then(|base| base.join(location)) {
            Ok(resolved) => resolved.to_string(),
            Err(_) => return current,
        };
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_shortener_domains() {
        assert!(is_shortener("https://bit.ly/abc"));
        assert!(is_shortener("https://www.tinyurl.com/abc"));
        assert!(!is_shortener("https://example.com/abc"));
        assert!(!is_shortener("not a url"));
    }
}
