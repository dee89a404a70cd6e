//! Gateway client lifecycle
//!
//! [`ApiGateway`] owns the configuration and the injected session
//! dependencies and hands out one shared [`GatewayClient`]. The client is
//! built on first acquisition; concurrent first callers block on the same
//! initialization so exactly one transport is ever constructed. A failed
//! construction is returned to the caller and retried on the next
//! acquisition.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use presensi_core::{CredentialStore, SessionEventSink};
use presensi_domain::constants::LOGIN_PATH;
use presensi_domain::{ApiConfig, StatusResponse};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::auth::RequestAuthenticator;
use super::errors::ApiError;
use super::pipeline::{GatewayRequest, GatewayResponse, Pipeline, Transport};
use super::session_monitor::SessionMonitor;
use crate::http::HttpTransport;

/// Builds the terminal transport for the gateway pipeline.
pub trait TransportFactory: Send + Sync {
    /// # Errors
    ///
    /// Any error aborts client construction and reaches the caller.
    fn build(&self, config: &ApiConfig) -> Result<Arc<dyn Transport>, ApiError>;
}

/// Default factory: a reqwest transport with the configured connect timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpTransportFactory;

impl TransportFactory for HttpTransportFactory {
    fn build(&self, config: &ApiConfig) -> Result<Arc<dyn Transport>, ApiError> {
        let transport = HttpTransport::builder()
            .base_url(config.base_url.clone())
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()?;
        Ok(Arc::new(transport))
    }
}

/// Process-wide gateway handle
pub struct ApiGateway {
    config: ApiConfig,
    credentials: Arc<dyn CredentialStore>,
    events: Arc<dyn SessionEventSink>,
    factory: Arc<dyn TransportFactory>,
    client: OnceCell<Arc<GatewayClient>>,
}

impl ApiGateway {
    /// Create a gateway using the default HTTP transport.
    pub fn new(
        config: ApiConfig,
        credentials: Arc<dyn CredentialStore>,
        events: Arc<dyn SessionEventSink>,
    ) -> Self {
        Self {
            config,
            credentials,
            events,
            factory: Arc::new(HttpTransportFactory),
            client: OnceCell::new(),
        }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiGatewayBuilder {
        ApiGatewayBuilder::default()
    }

    /// Shared client, constructed on first call.
    ///
    /// # Errors
    ///
    /// Returns the construction error if the transport or the authentication
    /// stage cannot be built.
    pub fn client(&self) -> Result<Arc<GatewayClient>, ApiError> {
        self.client.get_or_try_init(|| self.construct()).cloned()
    }

    /// Whether the shared client has been built yet.
    pub fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn construct(&self) -> Result<Arc<GatewayClient>, ApiError> {
        info!(base_url = %self.config.base_url, "constructing gateway client");

        let transport = self.factory.build(&self.config).map_err(|err| {
            warn!(error = %err, "gateway transport construction failed");
            err
        })?;
        let authenticator =
            RequestAuthenticator::new(&self.config.api_key, Arc::clone(&self.credentials))?;
        let monitor = SessionMonitor::new(Arc::clone(&self.credentials), Arc::clone(&self.events));

        let pipeline = Pipeline::builder(transport)
            .stage(Arc::new(authenticator))
            .stage(Arc::new(monitor))
            .build();

        Ok(Arc::new(GatewayClient { pipeline }))
    }
}

/// Builder for [`ApiGateway`]
#[derive(Default)]
pub struct ApiGatewayBuilder {
    config: Option<ApiConfig>,
    credentials: Option<Arc<dyn CredentialStore>>,
    events: Option<Arc<dyn SessionEventSink>>,
    factory: Option<Arc<dyn TransportFactory>>,
}

impl ApiGatewayBuilder {
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn events(mut self, events: Arc<dyn SessionEventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn transport_factory(mut self, factory: Arc<dyn TransportFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Build the gateway. Nothing is connected until the first
    /// [`ApiGateway::client`] call.
    ///
    /// # Errors
    ///
    /// `ApiError::Config` if the credential store or event sink is missing.
    pub fn build(self) -> Result<ApiGateway, ApiError> {
        let credentials = self
            .credentials
            .ok_or_else(|| ApiError::Config("credential store not set".to_string()))?;
        let events =
            self.events.ok_or_else(|| ApiError::Config("session event sink not set".to_string()))?;

        let mut gateway = ApiGateway::new(self.config.unwrap_or_default(), credentials, events);
        if let Some(factory) = self.factory {
            gateway.factory = factory;
        }
        Ok(gateway)
    }
}

/// Composed client: authenticator, session monitor, transport.
pub struct GatewayClient {
    pipeline: Pipeline,
}

impl GatewayClient {
    /// Send `request` and return the response whatever its status.
    ///
    /// # Errors
    ///
    /// Only transport-level failures.
    pub async fn execute(&self, request: GatewayRequest) -> Result<GatewayResponse, ApiError> {
        self.pipeline.execute(request).await
    }

    /// Send `request` and decode a 2xx JSON body as `R`.
    ///
    /// # Errors
    ///
    /// Non-2xx statuses map through [`map_status_error`]; a body that does
    /// not decode yields `ApiError::Decode`.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send_json<R: DeserializeOwned>(
        &self,
        request: GatewayRequest,
    ) -> Result<R, ApiError> {
        let is_login = request.targets(LOGIN_PATH);
        let path = request.path.clone();
        let response = self.execute(request).await?;

        if !response.status.is_success() {
            return Err(map_status_error(response.status, &path, &response.text(), is_login));
        }

        // 204/205 carry no body by definition.
        let result: R = if response.status == StatusCode::NO_CONTENT
            || response.status == StatusCode::RESET_CONTENT
            || response.body.is_empty()
        {
            serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "{path} returned empty body ({}) but a payload was expected",
                    response.status.as_u16()
                ))
            })?
        } else {
            response.json()?
        };

        debug!("request successful");
        Ok(result)
    }

    /// Send `request` expecting no meaningful body.
    ///
    /// # Errors
    ///
    /// Same status mapping as [`Self::send_json`].
    pub async fn send_empty(&self, request: GatewayRequest) -> Result<(), ApiError> {
        let is_login = request.targets(LOGIN_PATH);
        let path = request.path.clone();
        let response = self.execute(request).await?;

        if response.status.is_success() {
            Ok(())
        } else {
            Err(map_status_error(response.status, &path, &response.text(), is_login))
        }
    }

    /// Send `request` and wrap the outcome without treating non-2xx as an
    /// error. The body is decoded only for 2xx statuses.
    ///
    /// # Errors
    ///
    /// Only transport-level failures.
    pub async fn send_for_status<R: DeserializeOwned>(
        &self,
        request: GatewayRequest,
    ) -> Result<StatusResponse<R>, ApiError> {
        let path = request.path.clone();
        let response = self.execute(request).await?;

        let body = if response.status.is_success() {
            match response.json::<R>() {
                Ok(body) => Some(body),
                Err(err) => {
                    debug!(%path, error = %err, "status response body did not decode");
                    None
                }
            }
        } else {
            None
        };

        Ok(StatusResponse { status: response.status.as_u16(), body, raw_body: response.text() })
    }
}

/// Classify a non-2xx status.
///
/// A 401 is `Auth` on the login path (bad credentials) and `SessionExpired`
/// everywhere else, where the session monitor has already cleared the token.
pub fn map_status_error(status: StatusCode, path: &str, body: &str, is_login: bool) -> ApiError {
    let message = if body.is_empty() {
        format!("{path} returned status {status}")
    } else {
        format!("{path} returned status {status}: {body}")
    };

    if status == StatusCode::UNAUTHORIZED {
        if is_login {
            ApiError::Auth(message)
        } else {
            ApiError::SessionExpired(message)
        }
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        ApiError::RateLimit(message)
    } else if status.is_server_error() {
        ApiError::Server(message)
    } else if status.is_client_error() {
        ApiError::Client(message)
    } else {
        ApiError::Network(message)
    }
}
