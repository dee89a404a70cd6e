//! Session lifecycle service
//!
//! Owns the `Unauthenticated -> Authenticated` transition: the token is stored
//! only after the login endpoint accepted the credentials. The reverse
//! transition happens here on logout, or inside the gateway when the server
//! rejects the token.

use std::sync::Arc;

use presensi_domain::{LoginRequest, LoginResponse, PresensiError, Result, SessionState};
use tracing::{info, instrument, warn};

use super::ports::CredentialStore;
use crate::api::ports::AttendanceApi;

/// Login / logout orchestration over the credential store
pub struct SessionService {
    api: Arc<dyn AttendanceApi>,
    credentials: Arc<dyn CredentialStore>,
}

impl SessionService {
    /// Create a new session service
    pub fn new(api: Arc<dyn AttendanceApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { api, credentials }
    }

    /// Authenticate and store the issued token.
    ///
    /// # Errors
    ///
    /// - `PresensiError::Auth` if the credentials are rejected or the reply
    ///   carries no token; the stored token is left untouched
    /// - any transport error from the API
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let response = self.api.login(request).await?;

        if response.token.trim().is_empty() {
            warn!("login response carried no token");
            return Err(PresensiError::Auth("login response carried no token".into()));
        }

        self.credentials.store(response.token.clone());
        info!("session established");
        Ok(response)
    }

    /// Drop the local session. Returns `true` if a token was held.
    #[instrument(skip(self))]
    pub fn logout(&self) -> bool {
        let cleared = self.credentials.clear();
        info!(cleared, "session closed");
        cleared
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.credentials.state()
    }

    /// Whether a token is currently held
    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }
}
