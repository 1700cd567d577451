//! Error type shared by every API binding.
//!
//! Errors arise at exactly two points: while constructing a request (bad
//! base URL, query-string encoding) and while executing it (connection
//! failure, non-2xx status, response decode). The bindings themselves never
//! inspect status codes; callers that care can use the classification
//! helpers below.

use thiserror::Error;

/// Error type for all Vultr Managed Database API operations
#[derive(Error, Debug)]
pub enum VultrError {
    /// The client could not be constructed from the supplied configuration
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// List filter parameters could not be encoded as a query string
    #[error("failed to encode query parameters: {0}")]
    QueryEncoding(#[from] serde_urlencoded::ser::Error),

    /// The request could not be sent or the response body could not be read
    #[error("connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not the JSON shape the binding expected
    #[error("failed to decode response: {message}")]
    Deserialization { message: String },
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, VultrError>;

impl VultrError {
    /// The HTTP status code, if the API produced one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            VultrError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Returns true if the API rejected the call for rate limiting (429)
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Returns true if this is a server-side error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(s) if s >= 500)
    }

    /// Returns true if retrying the same call later could succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            VultrError::Connection(_) => true,
            _ => self.is_rate_limited() || self.is_server_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> VultrError {
        VultrError::Api {
            status,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn classifies_not_found() {
        assert!(api(404).is_not_found());
        assert!(!api(404).is_unauthorized());
        assert!(!api(500).is_not_found());
    }

    #[test]
    fn classifies_unauthorized() {
        assert!(api(401).is_unauthorized());
        assert!(api(403).is_unauthorized());
        assert!(!api(404).is_unauthorized());
    }

    #[test]
    fn classifies_retryable() {
        assert!(api(429).is_retryable());
        assert!(api(503).is_retryable());
        assert!(!api(400).is_retryable());
        assert!(!api(404).is_retryable());
    }

    #[test]
    fn non_api_errors_have_no_status() {
        let err = VultrError::Deserialization {
            message: "unexpected EOF".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(!err.is_server_error());
    }

    #[test]
    fn display_includes_status_and_message() {
        assert_eq!(api(404).to_string(), "API error (404): boom");
    }
}
