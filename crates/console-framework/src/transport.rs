//! # API Transport
//!
//! The backend is a collaborator reachable over HTTP with JSON payloads. Hooks
//! and controllers only see the [`ApiTransport`] trait, so tests can swap in
//! the in-memory transports from [`mock`](crate::mock).

use crate::error::ApiError;
use crate::session::Session;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP verbs used by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request against the admin API, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attaches a JSON body.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("cannot serialize body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Sends requests to the admin API.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Sends `request` and returns the decoded JSON body of a 2xx response.
    ///
    /// Non-2xx responses are [`ApiError::Rejected`]; transport failures are
    /// [`ApiError::Network`].
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// [`ApiTransport`] over HTTP using `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpTransport {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Session,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidRequest(format!(
                "base URL must be http(s): {base_url}"
            )));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    #[tracing::instrument(skip(self, request), fields(method = ?request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let mut builder = self
            .client
            .request(request.method.as_reqwest(), self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            ApiError::Network(e.to_string())
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?;
        debug!(status = status.as_u16(), len = bytes.len(), "Response");

        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED {
                self.session.clear();
            }
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .as_ref()
                .and_then(server_message);
            return Err(ApiError::rejected(Some(status.as_u16()), message));
        }

        decode_body(&bytes)
    }
}

/// Decodes a 2xx body. An empty body means the status alone signalled success.
pub(crate) fn decode_body(bytes: &[u8]) -> Result<Value, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::json!({ "success": true }));
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Extracts the server-provided explanation from an error body.
pub(crate) fn server_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_success_body_counts_as_success() {
        assert_eq!(decode_body(b"").unwrap(), json!({ "success": true }));
        assert_eq!(decode_body(b"  \n").unwrap(), json!({ "success": true }));
    }

    #[test]
    fn invalid_json_is_a_shape_mismatch() {
        assert!(matches!(decode_body(b"<html>"), Err(ApiError::ShapeMismatch(_))));
    }

    #[test]
    fn server_message_prefers_message_then_error() {
        assert_eq!(
            server_message(&json!({ "message": "nope", "error": "x" })),
            Some("nope".to_string())
        );
        assert_eq!(server_message(&json!({ "error": "bad token" })), Some("bad token".to_string()));
        assert_eq!(server_message(&json!({ "detail": 1 })), None);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = HttpTransport::new("ftp://example.com", Duration::from_secs(1), Session::new());
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn joins_paths_without_double_slashes() {
        let transport =
            HttpTransport::new("http://localhost:8000/api/", Duration::from_secs(1), Session::new())
                .unwrap();
        assert_eq!(transport.url("/roles"), "http://localhost:8000/api/roles");
        assert_eq!(transport.url("roles/3"), "http://localhost:8000/api/roles/3");
    }

    #[test]
    fn base_url_is_trimmed() {
        let transport =
            HttpTransport::new("  http://localhost:8000/api/ \n", Duration::from_secs(1), Session::new())
                .unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn request_builder_serializes_body() {
        let request = ApiRequest::post("/roles").with_json(&json!({ "name": "editor" })).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body, Some(json!({ "name": "editor" })));
    }
}
