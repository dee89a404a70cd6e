use std::time::Duration;

use async_trait::async_trait;
use presensi_domain::constants::DEFAULT_CONNECT_TIMEOUT_SECS;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client as ReqwestClient;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::pipeline::{
    GatewayRequest, GatewayResponse, MultipartBody, PartValue, RequestBody, Transport,
};

/// reqwest-backed [`Transport`]. Sends each request exactly once.
#[derive(Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    base_url: String,
    request_timeout: Option<Duration>,
}

impl HttpTransport {
    /// Start building a new transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn map_send_error(&self, err: reqwest::Error) -> ApiError {
        match self.request_timeout {
            Some(timeout) if err.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::from(err),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse, ApiError> {
        let GatewayRequest { method, path, query, mut headers, body } = request;
        let url = self.url_for(&path);
        debug!(%method, %url, "sending HTTP request");

        let mut builder = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        builder = match body {
            RequestBody::Empty => builder.headers(headers),
            RequestBody::Json(bytes) => builder.headers(headers).body(bytes),
            RequestBody::Multipart(parts) => {
                // reqwest writes the multipart content type with its boundary.
                headers.remove(CONTENT_TYPE);
                builder.headers(headers).multipart(into_form(parts)?)
            }
        };

        let response = builder.send().await.map_err(|err| {
            debug!(%method, %url, error = %err, "HTTP request failed");
            self.map_send_error(err)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|err| self.map_send_error(err))?;
        debug!(%method, %url, %status, "received HTTP response");

        Ok(GatewayResponse { status, headers, body: body.to_vec() })
    }
}

fn into_form(body: MultipartBody) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in body.parts {
        form = match part.value {
            PartValue::Text(value) => form.text(part.name, value),
            PartValue::File { file_name, content_type, bytes } => {
                let file = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| ApiError::Client(format!("invalid part content type: {e}")))?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    base_url: String,
    connect_timeout: Duration,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            base_url: presensi_domain::constants::DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: None,
            user_agent: None,
        }
    }
}

impl HttpTransportBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Whole-request deadline. Unset by default: only connecting is bounded.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpTransport, ApiError> {
        if self.base_url.trim().is_empty() {
            return Err(ApiError::Config("base URL is empty".into()));
        }

        let mut builder = ReqwestClient::builder().connect_timeout(self.connect_timeout).no_proxy();

        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(HttpTransport { client, base_url: self.base_url, request_timeout: self.request_timeout })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::StatusCode;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn transport(base_url: &str) -> HttpTransport {
        HttpTransport::builder().base_url(base_url).build().unwrap()
    }

    #[tokio::test]
    async fn sends_json_body_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/checkin"))
            .and(query_param("year", "2024"))
            .and(body_string_contains("\"pin\":\"1001\""))
            .respond_with(ResponseTemplate::new(201).set_body_string("{\"id\":1}"))
            .expect(1)
            .mount(&server)
            .await;

        let request = GatewayRequest::post("/api/checkin")
            .query("year", 2024)
            .json(&serde_json::json!({ "pin": "1001" }))
            .unwrap();
        let response = transport(&server.uri()).send(request).await.unwrap();

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.text(), "{\"id\":1}");
    }

    #[tokio::test]
    async fn does_not_retry_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let response =
            transport(&server.uri()).send(GatewayRequest::get("/api/tugas-luar")).await.unwrap();

        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn multipart_replaces_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tugas-luar"))
            .and(header("x-api-key", "k"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let body = MultipartBody::new().text("tujuan", "Kantor").file(
            "foto",
            "a.jpg",
            "image/jpeg",
            vec![1, 2, 3],
        );
        let request = GatewayRequest::post("/api/tugas-luar")
            .header("X-Api-Key", "k")
            .unwrap()
            .header("Content-Type", "application/json")
            .unwrap()
            .multipart(body);

        transport(&server.uri()).send(request).await.unwrap();

        let received = server.received_requests().await.unwrap();
        let content_type = received[0].headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        let raw = String::from_utf8_lossy(&received[0].body);
        assert!(raw.contains("name=\"tujuan\""));
        assert!(raw.contains("filename=\"a.jpg\""));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = transport(&format!("http://{addr}")).send(GatewayRequest::get("/")).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let result = HttpTransport::builder().base_url("  ").build();
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn joins_paths_with_single_slash() {
        let transport = transport("http://example.test/");
        assert_eq!(transport.url_for("/api/pegawai/1"), "http://example.test/api/pegawai/1");
    }
}
