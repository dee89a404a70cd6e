//! Session monitor stage
//!
//! Watches responses for `401 Unauthorized`. A 401 on any path except login
//! means the server no longer accepts the token the request carried: the
//! token is cleared and one [`SessionEvent::Unauthorized`] is published. The
//! response itself is passed through untouched so the caller still sees the
//! 401.

use std::sync::Arc;

use async_trait::async_trait;
use presensi_core::{CredentialStore, SessionEventSink};
use presensi_domain::constants::LOGIN_PATH;
use presensi_domain::SessionEvent;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::errors::ApiError;
use super::pipeline::{GatewayRequest, GatewayResponse, Next, Stage};

/// Invalidates the session when the server rejects its token.
pub struct SessionMonitor {
    credentials: Arc<dyn CredentialStore>,
    events: Arc<dyn SessionEventSink>,
    login_path: String,
}

impl SessionMonitor {
    pub fn new(credentials: Arc<dyn CredentialStore>, events: Arc<dyn SessionEventSink>) -> Self {
        Self { credentials, events, login_path: LOGIN_PATH.to_string() }
    }

    /// Override the path whose 401s mean "wrong credentials" rather than
    /// "session expired".
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    fn invalidate(&self, sent_token: Option<&str>, path: &str) {
        let Some(token) = sent_token else {
            debug!(%path, "401 on anonymous request; no session to invalidate");
            return;
        };

        // Compare-and-clear: only the first rejection of this token wins.
        if self.credentials.clear_if_current(token) {
            warn!(%path, "server rejected session token; session cleared");
            self.events.publish(SessionEvent::Unauthorized);
        } else {
            debug!(%path, "session already invalidated or replaced");
        }
    }
}

#[async_trait]
impl Stage for SessionMonitor {
    async fn handle(
        &self,
        request: GatewayRequest,
        next: Next<'_>,
    ) -> Result<GatewayResponse, ApiError> {
        let sent_token = request.bearer_token().map(str::to_owned);
        let is_login = request.targets(&self.login_path);
        let path = request.path.clone();

        let response = next.run(request).await?;

        if response.status == StatusCode::UNAUTHORIZED && !is_login {
            self.invalidate(sent_token.as_deref(), &path);
        }
        Ok(response)
    }
}
