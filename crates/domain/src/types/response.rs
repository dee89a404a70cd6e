//! Status-carrying response wrapper

use serde::{Deserialize, Serialize};

/// Raw outcome of an endpoint whose non-2xx replies are meaningful to the
/// caller (e.g. "no check-in recorded today").
///
/// `body` is the decoded payload when the status is a success and the body
/// parses; `raw_body` always holds the undecoded text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse<T> {
    pub status: u16,
    pub body: Option<T>,
    pub raw_body: String,
}

impl<T> StatusResponse<T> {
    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `true` when the server rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Consume the wrapper, keeping only the decoded body.
    pub fn into_body(self) -> Option<T> {
        self.body
    }
}
