//! API-specific error types
//!
//! Classifies gateway failures so callers can decide on their own retry
//! policy. The gateway itself never retries.

use std::time::Duration;

use presensi_domain::PresensiError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Login rejected (401 on the login endpoint)
    Authentication,
    /// Token rejected (401 elsewhere); the session has been invalidated
    SessionExpired,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx other than 401/429) and local request problems
    Client,
    /// Network/connection errors, including timeouts
    Network,
    /// Configuration errors
    Config,
    /// Response body could not be decoded
    Decode,
}

/// Gateway operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::SessionExpired(_) => ApiErrorCategory::SessionExpired,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) | Self::Io(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
            Self::Decode(_) => ApiErrorCategory::Decode,
        }
    }

    /// Whether a caller-side retry could plausibly succeed.
    ///
    /// Authentication failures are not retryable: a new login is required.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Config(format!("invalid request: {err}"))
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<ApiError> for PresensiError {
    fn from(err: ApiError) -> Self {
        let text = err.to_string();
        match err {
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::SessionExpired(message) => Self::SessionExpired(message),
            ApiError::Network(_) | ApiError::Timeout(_) | ApiError::RateLimit(_) => {
                Self::Network(text)
            }
            ApiError::Server(message) => Self::Network(format!("server error: {message}")),
            ApiError::Client(message) | ApiError::Io(message) => Self::InvalidInput(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::Decode(message) => Self::Internal(format!("undecodable response: {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(ApiError::Auth("test".into()).category(), ApiErrorCategory::Authentication);
        assert_eq!(
            ApiError::SessionExpired("test".into()).category(),
            ApiErrorCategory::SessionExpired
        );
        assert_eq!(ApiError::RateLimit("test".into()).category(), ApiErrorCategory::RateLimit);
        assert_eq!(ApiError::Server("test".into()).category(), ApiErrorCategory::Server);
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(30)).category(),
            ApiErrorCategory::Network
        );
        assert_eq!(ApiError::Io("test".into()).category(), ApiErrorCategory::Client);
    }

    #[test]
    fn test_is_retryable() {
        assert!(ApiError::RateLimit("test".into()).is_retryable());
        assert!(ApiError::Server("test".into()).is_retryable());
        assert!(ApiError::Network("test".into()).is_retryable());
        assert!(!ApiError::Auth("test".into()).is_retryable());
        assert!(!ApiError::SessionExpired("test".into()).is_retryable());
        assert!(!ApiError::Client("test".into()).is_retryable());
        assert!(!ApiError::Decode("test".into()).is_retryable());
    }

    #[test]
    fn session_errors_keep_their_meaning_in_domain() {
        let err: PresensiError = ApiError::SessionExpired("rejected".into()).into();
        assert_eq!(err, PresensiError::SessionExpired("rejected".into()));

        let err: PresensiError = ApiError::Auth("bad password".into()).into();
        assert_eq!(err, PresensiError::Auth("bad password".into()));
    }

    #[test]
    fn local_file_errors_map_to_invalid_input() {
        let err: PresensiError = ApiError::Io("photo missing".into()).into();
        assert!(matches!(err, PresensiError::InvalidInput(_)));
    }
}
