//! Session lifecycle types

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Whether a session token is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Authenticated,
    Unauthenticated,
}

impl_domain_status_conversions!(SessionState {
    Authenticated => "authenticated",
    Unauthenticated => "unauthenticated",
});

/// Process-wide session notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    /// The server rejected the current token; re-authentication is required.
    Unauthorized,
}
