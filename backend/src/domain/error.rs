//! Classified content-client failures.
//!
//! [`ContentError`] is the only error type that crosses the content client's
//! boundary. Every failure path maps to one [`ErrorKind`]; raw transport
//! errors and repository payloads never escape unclassified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status reported for failures where the repository was unreachable.
pub const NETWORK_STATUS: u16 = 0;
/// Status reported for client-side deadline expiry.
pub const TIMEOUT_STATUS: u16 = 408;
/// Status reported for precondition violations caught before any request.
pub const BAD_REQUEST_STATUS: u16 = 400;
/// Status reported when a successful response carried a malformed payload.
pub const MALFORMED_PAYLOAD_STATUS: u16 = 422;

const NETWORK_MESSAGE: &str = "Unable to reach the content service.";
const TIMEOUT_MESSAGE: &str = "The content service did not respond in time.";
const NOT_FOUND_MESSAGE: &str = "The requested content was not found.";
const SERVER_ERROR_MESSAGE: &str =
    "The content service is temporarily unavailable. Please try again later.";
const USER_NOT_FOUND_MESSAGE: &str = "The page you are looking for could not be found.";
const USER_RETRY_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Closed set of failure classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No response: DNS failure, refused or reset connection.
    Network,
    /// No response before the configured deadline.
    Timeout,
    /// The repository answered 404, or a slug lookup matched nothing.
    NotFound,
    /// The repository answered 500, 502 or 503.
    ServerError,
    /// Any other failure, including rejected preconditions and malformed payloads.
    ClientError,
}

/// Classified failure returned by every content-client operation.
///
/// # Examples
/// ```
/// use agency_content::domain::{ContentError, ErrorKind};
///
/// let err = ContentError::not_found();
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.status(), 404);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentError {
    kind: ErrorKind,
    message: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ContentError {
    fn new(kind: ErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status,
            details: None,
        }
    }

    /// The repository could not be reached.
    pub fn network() -> Self {
        Self::new(ErrorKind::Network, NETWORK_STATUS, NETWORK_MESSAGE)
    }

    /// The request exceeded the configured deadline.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout, TIMEOUT_STATUS, TIMEOUT_MESSAGE)
    }

    /// The requested content does not exist or is not published.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound, 404, NOT_FOUND_MESSAGE)
    }

    /// The repository failed with a 5xx status covered by the retry-later copy.
    pub fn server_error(status: u16) -> Self {
        Self::new(ErrorKind::ServerError, status, SERVER_ERROR_MESSAGE)
    }

    /// Any other failure, carrying the repository's or validator's message.
    pub fn client_error(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ClientError, status, message)
    }

    /// A precondition failed before any request was sent.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::client_error(BAD_REQUEST_STATUS, message)
    }

    /// A successful response could not be decoded into the expected shape.
    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self::client_error(MALFORMED_PAYLOAD_STATUS, message)
    }

    /// Attach structured diagnostic details.
    ///
    /// # Examples
    /// ```
    /// use agency_content::domain::ContentError;
    /// use serde_json::json;
    ///
    /// let err = ContentError::invalid_request("email is invalid")
    ///     .with_details(json!({ "field": "email" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Classification bucket.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP-like status: `0` for network, `408` for timeout, otherwise the
    /// received or precondition status.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Diagnostic payload passed through from the repository, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Return `true` for [`ErrorKind::NotFound`].
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Copy safe to show end users.
    ///
    /// Not-found failures map to a "not found" page message; every other
    /// classification maps to a generic retry-later message so transport
    /// details never reach visitors.
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            ErrorKind::NotFound => USER_NOT_FOUND_MESSAGE,
            ErrorKind::Network
            | ErrorKind::Timeout
            | ErrorKind::ServerError
            | ErrorKind::ClientError => USER_RETRY_MESSAGE,
        }
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (status {})", self.message, self.status)
    }
}

impl std::error::Error for ContentError {}

#[cfg(test)]
mod tests;
