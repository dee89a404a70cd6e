//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Presensi
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PresensiError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Credentials rejected by the login endpoint.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// An authenticated call was rejected; the local session has been
    /// invalidated.
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// A write collided with an existing record (e.g. duplicate field-duty
    /// draft).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PresensiError {
    /// Stable label suitable for structured log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::SessionExpired(_) => "session_expired",
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Presensi operations
pub type Result<T> = std::result::Result<T, PresensiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = PresensiError::SessionExpired("token rejected".into());
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["type"], "SessionExpired");
        assert_eq!(json["message"], "token rejected");
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(PresensiError::Conflict(String::new()).label(), "conflict");
        assert_eq!(PresensiError::Auth(String::new()).label(), "auth");
    }
}
