//! HTTP client shared by all platform extractors.

use std::time::Duration;

use reqwest::Client;

use crate::error::ExtractError;
use crate::retry::retry_with_backoff;

/// Thin wrapper over `reqwest::Client` with configured timeout, `User-Agent`,
/// typed status handling, and bounded retry on transient errors.
///
/// 429 responses honor `Retry-After` for the reported delay; 404 maps to
/// [`ExtractError::NotFound`]; any other non-2xx to
/// [`ExtractError::UnexpectedStatus`].
#[derive(Clone)]
pub struct ProfileClient {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl ProfileClient {
    /// Creates a `ProfileClient` with configured timeout, `User-Agent`, and
    /// retry policy. `max_retries` is the number of additional attempts
    /// after the first failure for retriable errors; `0` disables retries.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches `url` and returns the response body as text, with automatic
    /// retry on transient errors (429, network failures).
    ///
    /// # Errors
    ///
    /// - [`ExtractError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ExtractError::NotFound`] — HTTP 404 (not retried).
    /// - [`ExtractError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ExtractError::Http`] — network or TLS failure after all retries.
    pub async fn fetch_text(&self, url: &str) -> Result<String, ExtractError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.to_owned();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/json;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ExtractError::RateLimited {
                        domain: extract_domain(&url),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ExtractError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ExtractError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }
}

/// Host portion of a URL, for rate-limit reporting. Falls back to the raw
/// string when it does not parse.
fn extract_domain(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    stripped
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(stripped)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_domain_strips_scheme_and_path() {
        assert_eq!(
            extract_domain("https://www.tiktok.com/@someone?lang=en"),
            "www.tiktok.com"
        );
    }

    #[test]
    fn extract_domain_handles_bare_host() {
        assert_eq!(extract_domain("linktr.ee"), "linktr.ee");
    }
}
