//! Request authentication stage
//!
//! Stamps every outbound request with the static API key and JSON content
//! type, and adds the bearer token when a session is active.

use std::sync::Arc;

use async_trait::async_trait;
use presensi_core::CredentialStore;
use presensi_domain::constants::{BEARER_PREFIX, HEADER_API_KEY, JSON_MEDIA_TYPE};
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};

use super::errors::ApiError;
use super::pipeline::{GatewayRequest, GatewayResponse, Next, Stage};

/// Adds `X-Api-Key`, `Content-Type` and (when held) `Authorization`.
pub struct RequestAuthenticator {
    api_key_header: HeaderName,
    api_key: HeaderValue,
    credentials: Arc<dyn CredentialStore>,
}

impl RequestAuthenticator {
    /// Create the stage.
    ///
    /// # Errors
    ///
    /// `ApiError::Config` if the API key is blank or not a legal header
    /// value.
    pub fn new(api_key: &str, credentials: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::Config("API key is empty".into()));
        }
        let mut api_key = HeaderValue::from_str(api_key)
            .map_err(|e| ApiError::Config(format!("API key is not a valid header value: {e}")))?;
        api_key.set_sensitive(true);
        let api_key_header = HeaderName::from_bytes(HEADER_API_KEY.as_bytes())
            .map_err(|e| ApiError::Config(format!("invalid API key header name: {e}")))?;
        Ok(Self { api_key_header, api_key, credentials })
    }

    /// Apply the authentication headers to `request`.
    ///
    /// Headers already present are overwritten. An absent or empty token
    /// removes any `Authorization` header instead of sending an empty one.
    pub fn authenticate(&self, mut request: GatewayRequest) -> GatewayRequest {
        let headers = &mut request.headers;
        headers.insert(self.api_key_header.clone(), self.api_key.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));

        match self.credentials.token().and_then(|token| bearer_value(&token)) {
            Some(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            None => {
                headers.remove(AUTHORIZATION);
            }
        }
        request
    }
}

fn bearer_value(token: &str) -> Option<HeaderValue> {
    if token.is_empty() {
        return None;
    }
    match HeaderValue::from_str(&format!("{BEARER_PREFIX}{token}")) {
        Ok(mut value) => {
            value.set_sensitive(true);
            Some(value)
        }
        Err(_) => {
            warn!("stored session token is not a valid header value; sending anonymously");
            None
        }
    }
}

#[async_trait]
impl Stage for RequestAuthenticator {
    async fn handle(
        &self,
        request: GatewayRequest,
        next: Next<'_>,
    ) -> Result<GatewayResponse, ApiError> {
        let request = self.authenticate(request);
        debug!(
            method = %request.method,
            path = %request.path,
            authenticated = request.headers.contains_key(AUTHORIZATION),
            "request authenticated"
        );
        next.run(request).await
    }
}
