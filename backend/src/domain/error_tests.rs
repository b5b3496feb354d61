//! Tests for the domain error type.

use serde_json::json;

use super::*;

#[test]
fn constructors_set_the_matching_code() {
    assert_eq!(Error::invalid_request("x").code(), ErrorCode::InvalidRequest);
    assert_eq!(Error::unauthorized("x").code(), ErrorCode::Unauthorized);
    assert_eq!(Error::not_found("x").code(), ErrorCode::NotFound);
    assert_eq!(Error::conflict("x").code(), ErrorCode::Conflict);
    assert_eq!(Error::internal("x").code(), ErrorCode::InternalError);
}

#[test]
fn display_shows_the_message() {
    let err = Error::conflict("book is out of stock");
    assert_eq!(err.to_string(), "book is out of stock");
}

#[test]
fn details_round_trip() {
    let err = Error::invalid_request("bad").with_details(json!({ "field": "status" }));
    assert_eq!(err.details(), Some(&json!({ "field": "status" })));
}

#[test]
fn codes_serialise_snake_case() {
    let value = serde_json::to_value(ErrorCode::InvalidRequest).expect("code serialises");
    assert_eq!(value, json!("invalid_request"));
    let value = serde_json::to_value(ErrorCode::InternalError).expect("code serialises");
    assert_eq!(value, json!("internal_error"));
}

#[test]
fn envelope_omits_absent_fields() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("error serialises");
    assert!(value.get("details").is_none());
    assert_eq!(value.get("code"), Some(&json!("not_found")));
    assert_eq!(value.get("message"), Some(&json!("missing")));
}

#[test]
fn explicit_trace_id_is_preserved() {
    let err = Error::internal("boom").with_trace_id("abc");
    assert_eq!(err.trace_id(), Some("abc"));
}
