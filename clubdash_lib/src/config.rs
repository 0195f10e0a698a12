//! Runtime configuration for the detail aggregator.

/// Environment variable holding the FMP API key.
pub const API_KEY_VAR: &str = "FMP_API_KEY";
/// Optional override for the FMP host, mostly for pointing at a mock server.
pub const BASE_URL_VAR: &str = "FMP_BASE_URL";

/// Credential and host for upstream requests.
///
/// A missing or blank key is a normal state: the aggregator then serves
/// synthetic data with an advisory instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: fmp_api::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl DetailConfig {
    /// Reads [`API_KEY_VAR`] and [`BASE_URL_VAR`] from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: non_blank(lookup(API_KEY_VAR)),
            base_url: non_blank(lookup(BASE_URL_VAR))
                .unwrap_or_else(|| fmp_api::DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Replaces the key when `api_key` is given and not blank.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = non_blank(api_key) {
            self.api_key = Some(key);
        }
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
