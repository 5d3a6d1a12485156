//! Tests for classified content errors and their user-facing copy.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case::network(ContentError::network(), ErrorKind::Network, 0)]
#[case::timeout(ContentError::timeout(), ErrorKind::Timeout, 408)]
#[case::not_found(ContentError::not_found(), ErrorKind::NotFound, 404)]
#[case::server(ContentError::server_error(502), ErrorKind::ServerError, 502)]
#[case::invalid(ContentError::invalid_request("bad"), ErrorKind::ClientError, 400)]
#[case::malformed(ContentError::malformed_payload("bad"), ErrorKind::ClientError, 422)]
fn constructors_set_kind_and_status(
    #[case] error: ContentError,
    #[case] kind: ErrorKind,
    #[case] status: u16,
) {
    assert_eq!(error.kind(), kind);
    assert_eq!(error.status(), status);
}

#[rstest]
fn not_found_maps_to_not_found_copy() {
    let error = ContentError::not_found();
    assert!(error.is_not_found());
    assert_eq!(error.user_message(), USER_NOT_FOUND_MESSAGE);
}

#[rstest]
#[case(ContentError::network())]
#[case(ContentError::timeout())]
#[case(ContentError::server_error(500))]
#[case(ContentError::client_error(418, "teapot stack trace"))]
fn other_kinds_map_to_retry_copy(#[case] error: ContentError) {
    assert_eq!(error.user_message(), USER_RETRY_MESSAGE);
    assert!(!error.user_message().contains("teapot"));
}

#[rstest]
fn details_round_trip_through_serde() {
    let error = ContentError::client_error(400, "name is required")
        .with_details(json!({ "errors": [{ "path": ["name"] }] }));

    let encoded = serde_json::to_value(&error).expect("error serialises");
    assert_eq!(encoded["kind"], "client_error");
    assert_eq!(encoded["status"], 400);

    let decoded: ContentError = serde_json::from_value(encoded).expect("error deserialises");
    assert_eq!(decoded, error);
}

#[rstest]
fn display_includes_status() {
    assert_eq!(
        ContentError::timeout().to_string(),
        "The content service did not respond in time. (status 408)"
    );
}
