//! # Mock Transports & Testing Guide
//!
//! Two in-memory [`ApiTransport`]s let hooks, controllers and domain clients be
//! tested without a server.
//!
//! | Feature | MockTransport | channel_transport |
//! |---------|---------------|-------------------|
//! | **Style** | Scripted expectations | Manual request/response |
//! | **Ordering** | Responds immediately | Test decides when each request settles |
//! | **Use Case** | Happy paths, error injection | Races, cancellation, in-flight state |
//!
//! ## Scripted Expectations
//!
//! ```rust
//! use console_framework::mock::MockTransport;
//! use console_framework::{ApiRequest, ApiTransport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/roles").return_json(json!([{ "id": 1, "name": "admin" }]));
//!
//!     let body = mock.send(ApiRequest::get("/roles")).await.unwrap();
//!     assert_eq!(body[0]["name"], "admin");
//!
//!     mock.verify(); // Ensures all expectations were met
//! }
//! ```
//!
//! ## Controlling Settlement Order
//!
//! ```rust
//! use console_framework::mock::channel_transport;
//! use console_framework::{ApiRequest, ApiTransport, Method};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (transport, mut requests) = channel_transport(8);
//!
//!     let call = tokio::spawn(async move { transport.send(ApiRequest::get("/roles")).await });
//!
//!     let pending = requests.recv().await.unwrap();
//!     assert_eq!(pending.request.method, Method::Get);
//!     pending.respond_json(json!([]));
//!
//!     assert_eq!(call.await.unwrap().unwrap(), json!([]));
//! }
//! ```

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiTransport, Method};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to return for it.
struct Expectation {
    method: Method,
    path: String,
    response: Result<Value, ApiError>,
}

/// A transport that answers from a queue of expectations, in order.
///
/// A request that does not match the next expectation panics, failing the
/// test that sent it.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    /// Creates a new mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with `method` on `path`.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    pub fn expect_put(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Put, path)
    }

    pub fn expect_patch(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Patch, path)
    }

    pub fn expect_delete(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, path)
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let pending: Vec<String> = exps
                .iter()
                .map(|e| format!("{:?} {}", e.method, e.path))
                .collect();
            panic!("Not all expectations were met. {} remaining: {:?}", exps.len(), pending);
        }
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let expectation = self.expectations.lock().unwrap().pop_front();

        match expectation {
            Some(exp) if exp.method == request.method && exp.path == request.path => exp.response,
            Some(exp) => panic!(
                "Unexpected request {:?} {}, expected {:?} {}",
                request.method, request.path, exp.method, exp.path
            ),
            None => panic!(
                "Unexpected request {:?} {}, no expectations left",
                request.method, request.path
            ),
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Responds with a 2xx JSON body.
    pub fn return_json(self, body: Value) {
        self.push(Ok(body));
    }

    /// Responds with an error.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, ApiError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }
}

// =============================================================================
// CHANNEL TRANSPORT
// =============================================================================

/// A request captured by [`channel_transport`], waiting for the test to answer.
#[derive(Debug)]
pub struct PendingRequest {
    pub request: ApiRequest,
    pub respond_to: oneshot::Sender<Result<Value, ApiError>>,
}

impl PendingRequest {
    pub fn respond_json(self, body: Value) {
        let _ = self.respond_to.send(Ok(body));
    }

    pub fn respond_err(self, error: ApiError) {
        let _ = self.respond_to.send(Err(error));
    }
}

/// Transport half of [`channel_transport`].
#[derive(Clone)]
pub struct ChannelTransport {
    sender: mpsc::Sender<PendingRequest>,
}

#[async_trait]
impl ApiTransport for ChannelTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PendingRequest { request, respond_to })
            .await
            .map_err(|_| ApiError::Network("mock receiver closed".into()))?;
        response
            .await
            .map_err(|_| ApiError::Network("mock dropped responder".into()))?
    }
}

/// Creates a transport whose requests arrive on the returned receiver.
///
/// Each request stays in flight until the test answers its [`PendingRequest`].
pub fn channel_transport(buffer_size: usize) -> (ChannelTransport, mpsc::Receiver<PendingRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelTransport { sender }, receiver)
}

/// Helper to verify that the next request uses `method`.
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<PendingRequest>,
    method: Method,
) -> Option<PendingRequest> {
    match receiver.recv().await {
        Some(pending) if pending.request.method == method => Some(pending),
        _ => None,
    }
}
