//! Port interfaces for session state
//!
//! The credential store is the single shared holder of the session token.
//! The gateway reads it on every request and clears it when the server
//! rejects the token; the session service writes it after login.

use presensi_domain::{SessionEvent, SessionState};

/// Lock-guarded holder of the current session token.
///
/// Implementations must make reads and writes mutually exclusive so that a
/// concurrent clear never interleaves with a read.
pub trait CredentialStore: Send + Sync {
    /// Current token, if any. Empty tokens are reported as `None`.
    fn token(&self) -> Option<String>;

    /// Replace the current token.
    fn store(&self, token: String);

    /// Remove the token. Returns `true` if one was present.
    fn clear(&self) -> bool;

    /// Remove the token only if it still equals `token`.
    ///
    /// Returns `true` for exactly one caller per stored token, which is what
    /// keeps concurrent 401s from invalidating the session more than once.
    fn clear_if_current(&self, token: &str) -> bool;

    /// Session state derived from token presence.
    fn state(&self) -> SessionState {
        if self.token().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }
}

/// Receiver of process-wide session events.
///
/// `publish` must not block on listeners.
pub trait SessionEventSink: Send + Sync {
    fn publish(&self, event: SessionEvent);
}
