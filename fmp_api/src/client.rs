//! HTTP client for the Financial Modeling Prep REST API.

use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{encode_component, Endpoint, Error};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com";

/// Request timeout for FMP API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the FMP API.
///
/// The API key travels as the `apikey` query parameter. Each request races
/// the caller's cancellation token, so dropping interest in a ticker aborts
/// the outstanding request instead of waiting for the transport timeout.
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    api_key: String,
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_url: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: String) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the full request URL for `path`, appending the API key after any
    /// query parameters the path already carries.
    pub fn build_url(&self, path: &str) -> Result<Url, Error> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let raw = format!(
            "{}{}{}apikey={}",
            self.base_url,
            path,
            separator,
            encode_component(&self.api_key)
        );
        Url::parse(&raw).map_err(|e| {
            tracing::error!("Invalid URL constructed for {}: {}", path, e);
            Error::InvalidUrl(e.to_string())
        })
    }

    /// Fetches one endpoint for `ticker` and returns the decoded JSON body.
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        ticker: &str,
        cancel: &CancellationToken,
    ) -> Result<Value, Error> {
        tracing::debug!(endpoint = endpoint.name(), ticker, "requesting resource");
        self.get_json(&endpoint.path(ticker), cancel).await
    }

    /// GETs `path` and decodes the body as JSON, or returns [`Error::Cancelled`]
    /// as soon as `cancel` fires.
    pub async fn get_json(&self, path: &str, cancel: &CancellationToken) -> Result<Value, Error> {
        let url = self.build_url(path)?;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = self.send(url) => result,
        }
    }

    async fn send(&self, url: Url) -> Result<Value, Error> {
        // reqwest errors embed the URL, which carries the API key.
        let resp = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(e.without_url()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Network(e.without_url()))?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::warn!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed: Value = serde_json::from_str(&body).map_err(|e| {
            Error::ParseFailed(format!(
                "Failed to deserialize response: {} | body: {}",
                e,
                truncate_body(&body)
            ))
        })?;

        // FMP quirk: some endpoints answer 200 with {"Error Message": "..."}
        // for bad keys or exhausted plans.
        if let Some(message) = parsed.get("Error Message").and_then(Value::as_str) {
            return Err(Error::Upstream(message.to_string()));
        }

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX).collect();
        format!("{}...[truncated]", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::with_base_url("http://localhost:1234/", "test-key".to_string()).unwrap()
    }

    #[test]
    fn api_key_starts_query_when_path_has_none() {
        let url = client().build_url("/api/v3/key-metrics-ttm/AAPL").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:1234/api/v3/key-metrics-ttm/AAPL?apikey=test-key"
        );
    }

    #[test]
    fn api_key_follows_existing_query() {
        let url = client()
            .build_url("/api/v4/price-target-consensus?symbol=AAPL")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:1234/api/v4/price-target-consensus?symbol=AAPL&apikey=test-key"
        );
    }

    #[test]
    fn api_key_is_escaped() {
        let client = Client::with_base_url("http://localhost:1234", "a&b=c".to_string()).unwrap();
        let url = client.build_url("/x").unwrap();
        assert_eq!(url.query(), Some("apikey=a%26b%3Dc"));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let client = Client::with_base_url("not a url", "k".to_string()).unwrap();
        assert!(matches!(client.build_url("/x"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("test-key"));
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("...[truncated]"));
        assert_eq!(truncated.chars().filter(|c| *c == 'é').count(), 200);
    }

    #[test]
    fn error_display() {
        assert!(Error::Cancelled.to_string().contains("cancelled"));
        assert!(Error::Upstream("Invalid API KEY".into())
            .to_string()
            .contains("Invalid API KEY"));
        let err = Error::HttpStatus {
            status: 404,
            body: String::new(),
        };
        assert!(err.to_string().contains("404"));
        assert!(Error::Cancelled.is_cancelled());
    }
}
