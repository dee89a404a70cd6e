//! In-process session token holder.

use parking_lot::RwLock;
use presensi_core::CredentialStore;
use tracing::debug;

/// Lock-guarded single-value token store.
///
/// One instance is shared by the session service and the gateway; it is
/// passed in explicitly rather than reached through a global.
#[derive(Default)]
pub struct SessionTokenStore {
    token: RwLock<Option<String>>,
}

impl SessionTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing token, e.g. one restored at startup.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.store(token.into());
        store
    }
}

impl std::fmt::Debug for SessionTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenStore")
            .field("authenticated", &self.token.read().is_some())
            .finish()
    }
}

impl CredentialStore for SessionTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn store(&self, token: String) {
        *self.token.write() = if token.is_empty() { None } else { Some(token) };
    }

    fn clear(&self) -> bool {
        self.token.write().take().is_some()
    }

    fn clear_if_current(&self, token: &str) -> bool {
        let mut guard = self.token.write();
        if guard.as_deref() == Some(token) {
            *guard = None;
            true
        } else {
            debug!("token already cleared or replaced");
            false
        }
    }
}
