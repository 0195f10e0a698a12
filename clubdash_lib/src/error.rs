//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding input validation failures.
#[derive(Debug)]
pub enum ClubDashError {
    /// An error from the underlying FMP client.
    Api(fmp_api::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl ClubDashError {
    /// True when the failure is a cancelled request, which callers treat as
    /// "no result" rather than an error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_cancelled())
    }
}

impl fmt::Display for ClubDashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ClubDashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<fmp_api::Error> for ClubDashError {
    fn from(e: fmp_api::Error) -> Self {
        Self::Api(e)
    }
}
