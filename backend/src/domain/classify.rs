//! The content client's single error-normalisation step.
//!
//! Every transport outcome and every payload decode passes through this
//! module, so callers only ever observe a [`ContentError`].

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::warn;

use super::envelope::{ContentList, Envelope, ErrorEnvelope, normalize_item};
use super::error::ContentError;
use super::ports::{TransportError, TransportResponse};

/// Classify one transport outcome, returning the body of a 2xx response.
pub(crate) fn classify_outcome(
    outcome: Result<TransportResponse, TransportError>,
) -> Result<Vec<u8>, ContentError> {
    let response = outcome.map_err(classify_transport_error)?;
    if (200..300).contains(&response.status) {
        return Ok(response.body);
    }
    let error = classify_status(response.status, &response.body);
    warn!(
        status = response.status,
        kind = ?error.kind(),
        "content repository returned an error status"
    );
    Err(error)
}

fn classify_transport_error(error: TransportError) -> ContentError {
    warn!(error = %error, "content request produced no response");
    match error {
        TransportError::Timeout { .. } => ContentError::timeout(),
        TransportError::Network { .. } => ContentError::network(),
    }
}

/// Map a non-2xx status to its classification.
///
/// Server errors never carry the repository payload; other statuses pass
/// the repository's own message and `details` through verbatim.
pub(crate) fn classify_status(status: u16, body: &[u8]) -> ContentError {
    match status {
        404 => ContentError::not_found(),
        500 | 502 | 503 => ContentError::server_error(status),
        _ => {
            let error_body = serde_json::from_slice::<ErrorEnvelope>(body)
                .ok()
                .and_then(|envelope| envelope.error);
            let (reported_message, details) = error_body
                .map_or((None, None), |reported| (reported.message, reported.details));
            let message = reported_message
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| format!("Content request failed with status {status}"));
            let mut error = ContentError::client_error(status, message);
            if let Some(value) = details.filter(|value| !value.is_null()) {
                error = error.with_details(value);
            }
            error
        }
    }
}

fn parse_envelope(body: &[u8]) -> Result<Envelope, ContentError> {
    serde_json::from_slice(body).map_err(|error| malformed("response is not a valid envelope", &error))
}

fn malformed(message: &str, error: &dyn std::fmt::Display) -> ContentError {
    warn!(reason = %error, "{message}");
    ContentError::malformed_payload(format!("Malformed content payload: {message}"))
        .with_details(json!({ "reason": error.to_string() }))
}

fn decode_item<T: DeserializeOwned>(item: Value) -> Result<T, ContentError> {
    serde_json::from_value(normalize_item(item))
        .map_err(|error| malformed("item failed validation", &error))
}

/// Decode a single-item or singleton envelope; `data: null` yields `None`.
pub(crate) fn decode_single<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, ContentError> {
    let envelope = parse_envelope(body)?;
    match envelope.data {
        Value::Null => Ok(None),
        Value::Array(_) => Err(ContentError::malformed_payload(
            "Malformed content payload: expected a single item",
        )),
        item => decode_item(item).map(Some),
    }
}

/// Decode a list envelope, keeping its pagination metadata.
pub(crate) fn decode_list<T: DeserializeOwned>(body: &[u8]) -> Result<ContentList<T>, ContentError> {
    let envelope = parse_envelope(body)?;
    let pagination = envelope.meta.and_then(|meta| meta.pagination);
    let items = match envelope.data {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .into_iter()
            .map(decode_item)
            .collect::<Result<Vec<T>, _>>()?,
        _ => {
            return Err(ContentError::malformed_payload(
                "Malformed content payload: expected a list of items",
            ));
        }
    };
    Ok(ContentList::new(items, pagination))
}
