//! Driven port for exchanging requests with the content repository.
//!
//! The port deliberately carries raw status codes and bodies: status
//! classification and envelope decoding belong to the content client so that
//! every transport implementation shares one error taxonomy.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

/// HTTP method used for a repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMethod {
    /// Read request with query-string parameters.
    Get,
    /// Write request with a JSON body.
    Post,
}

/// One outgoing request to the content repository.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// Request method.
    pub method: TransportMethod,
    /// Path relative to the repository base URL, e.g. `/api/pages`.
    pub path: String,
    /// Query-string pairs in emission order.
    pub query: Vec<(String, String)>,
    /// JSON body for write requests.
    pub body: Option<Value>,
}

impl TransportRequest {
    /// Build a `GET` request.
    pub fn get(path: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            method: TransportMethod::Get,
            path: path.into(),
            query,
            body: None,
        }
    }

    /// Build a `POST` request carrying `body`.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: TransportMethod::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Return the first query value recorded for `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Raw repository response: any status, including errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Build a response from a JSON value.
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }
}

define_port_error! {
    /// Failures where no response was received at all.
    pub enum TransportError {
        /// The client-side deadline elapsed before a response arrived.
        Timeout { message: String } =>
            "content request timed out: {message}",
        /// The repository could not be reached (DNS, refused connection, reset).
        Network { message: String } =>
            "content repository unreachable: {message}",
    }
}

/// Port for sending requests to the content repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentTransport: Send + Sync {
    /// Send one request and return the raw response.
    ///
    /// Implementations return `Ok` for every received response regardless
    /// of status; `Err` is reserved for requests that never got an answer.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Fixture transport answering every request with an empty list envelope.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContentTransport;

#[async_trait]
impl ContentTransport for FixtureContentTransport {
    async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
        Ok(TransportResponse::json(
            200,
            &serde_json::json!({ "data": [], "meta": {} }),
        ))
    }
}
