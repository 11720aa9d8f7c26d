// Error types for the video API client

use thiserror::Error;

/// Generic message for bodies that are not JSON.
pub const INVALID_RESPONSE: &str = "Server returned an invalid response. Please try again later.";

/// Shown when a 429 body does not carry its own message.
pub const DEFAULT_RATE_LIMIT_MESSAGE: &str =
    "The video site is temporarily blocking automated requests.";

/// Shown when a 429 body does not carry its own suggestion.
pub const DEFAULT_RATE_LIMIT_SUGGESTION: &str = "Wait a few minutes and try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Empty or malformed URL, caught before any request is made
    #[error("{0}")]
    Validation(String),

    /// Transport failure (DNS, refused connection, reset, ...)
    #[error("Failed to communicate with server: {0}")]
    Connection(String),

    /// Body was not JSON or did not match the expected shape
    #[error("{0}")]
    Protocol(String),

    /// HTTP status >= 400 with the server's message
    #[error("{message}")]
    Api { status: u16, message: String },

    /// HTTP 429, the server's bot detection kicked in
    #[error("{message}")]
    RateLimited { message: String, suggestion: String },

    /// Saving a downloaded file locally failed
    #[error("Failed to save file: {0}")]
    Storage(String),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Self::Protocol(INVALID_RESPONSE.to_string());
        }
        Self::Connection(e.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_reports_429() {
        let err = ClientError::RateLimited {
            message: "rate limited".to_string(),
            suggestion: "try later".to_string(),
        };
        assert!(err.is_rate_limited());
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.to_string(), "rate limited");
    }

    #[test]
    fn api_error_displays_server_message() {
        let err = ClientError::Api {
            status: 500,
            message: "extractor exploded".to_string(),
        };
        assert!(!err.is_rate_limited());
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "extractor exploded");
    }

    #[test]
    fn local_errors_have_no_status() {
        assert_eq!(ClientError::validation("Please enter a video URL").status(), None);
        assert_eq!(ClientError::Connection("refused".into()).status(), None);
    }
}
