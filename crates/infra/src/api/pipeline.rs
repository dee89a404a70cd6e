//! Request pipeline
//!
//! A gateway call is an ordered list of [`Stage`]s ending in a [`Transport`].
//! Each stage receives the request and a [`Next`] handle; it may rewrite the
//! request before calling `next.run(..)` and observe the response afterwards.
//! Stages do not depend on any HTTP library's interceptor model.

use std::sync::Arc;

use async_trait::async_trait;
use presensi_domain::constants::BEARER_PREFIX;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::ApiError;

/// Outbound request as seen by pipeline stages. `path` is relative to the
/// gateway base URL.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

/// Request payload
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Pre-serialized JSON bytes
    Json(Vec<u8>),
    Multipart(MultipartBody),
}

impl GatewayRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Set a header from caller-supplied text.
    ///
    /// # Errors
    ///
    /// `ApiError::Client` if `value` is not a legal header value.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::Client(format!("invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::Client(format!("invalid {name} header: {e}")))?;
        self.headers.insert(header, value);
        Ok(self)
    }

    /// Serialize `body` as the JSON payload
    ///
    /// # Errors
    ///
    /// `ApiError::Client` if serialization fails.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| ApiError::Client(format!("Failed to serialize body: {e}")))?;
        self.body = RequestBody::Json(bytes);
        Ok(self)
    }

    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = RequestBody::Multipart(body);
        self
    }

    /// Token carried in the `Authorization: Bearer` header, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .filter(|token| !token.is_empty())
    }

    /// Whether this request targets `path` (ignoring a trailing slash).
    pub fn targets(&self, path: &str) -> bool {
        self.path.trim_end_matches('/') == path.trim_end_matches('/')
    }
}

/// Multipart form with inspectable parts
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    pub parts: Vec<MultipartPart>,
}

/// One named multipart part
#[derive(Debug, Clone)]
pub struct MultipartPart {
    pub name: String,
    pub value: PartValue,
}

/// Part payload
#[derive(Debug, Clone)]
pub enum PartValue {
    Text(String),
    File { file_name: String, content_type: String, bytes: Vec<u8> },
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart { name: name.to_string(), value: PartValue::Text(value.into()) });
        self
    }

    pub fn file(
        mut self,
        name: &str,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(MultipartPart {
            name: name.to_string(),
            value: PartValue::File {
                file_name: file_name.into(),
                content_type: content_type.into(),
                bytes,
            },
        });
        self
    }

    pub fn part(&self, name: &str) -> Option<&MultipartPart> {
        self.parts.iter().find(|part| part.name == name)
    }
}

/// Completed response. The body is fully buffered.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl GatewayResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self { status, headers: HeaderMap::new(), body: body.into() }
    }

    /// Body as lossy UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the JSON body
    ///
    /// # Errors
    ///
    /// `ApiError::Decode` if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
    }
}

/// Terminal stage: moves bytes over the network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse, ApiError>;
}

/// Request/response processing stage
#[async_trait]
pub trait Stage: Send + Sync {
    async fn handle(
        &self,
        request: GatewayRequest,
        next: Next<'_>,
    ) -> Result<GatewayResponse, ApiError>;
}

/// Remainder of the pipeline after the current stage
#[derive(Clone, Copy)]
pub struct Next<'a> {
    stages: &'a [Arc<dyn Stage>],
    transport: &'a dyn Transport,
}

impl Next<'_> {
    /// Pass the request to the next stage, or to the transport when no
    /// stages remain.
    pub async fn run(self, request: GatewayRequest) -> Result<GatewayResponse, ApiError> {
        match self.stages.split_first() {
            Some((stage, rest)) => {
                stage.handle(request, Next { stages: rest, transport: self.transport }).await
            }
            None => self.transport.send(request).await,
        }
    }
}

/// Ordered stages plus transport
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
    transport: Arc<dyn Transport>,
}

impl Pipeline {
    pub fn builder(transport: Arc<dyn Transport>) -> PipelineBuilder {
        PipelineBuilder { stages: Vec::new(), transport }
    }

    /// Run `request` through every stage and the transport
    pub async fn execute(&self, request: GatewayRequest) -> Result<GatewayResponse, ApiError> {
        Next { stages: &self.stages, transport: self.transport.as_ref() }.run(request).await
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

/// Builder for [`Pipeline`]. Stages run in the order they are added.
pub struct PipelineBuilder {
    stages: Vec<Arc<dyn Stage>>,
    transport: Arc<dyn Transport>,
}

impl PipelineBuilder {
    pub fn stage(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline { stages: self.stages, transport: self.transport }
    }
}
