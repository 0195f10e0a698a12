//! Error types for the FMP client.

/// Errors that can occur when requesting an FMP resource.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request was abandoned because its cancellation token fired.
    #[error("Request cancelled")]
    Cancelled,
    /// The base URL and resource path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The API answered 200 but the body carried an error message instead of data.
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    #[error("Network error")]
    Network(#[from] reqwest::Error),
}

impl Error {
    /// True when the request was cut short by cancellation rather than failing.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
