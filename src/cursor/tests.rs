//! Tests for cursor module

use super::*;
use crate::error::Error;
use chrono::{TimeZone, Utc};
use serde_json::json;
use test_case::test_case;

// ============================================================================
// OrderingKey Tests
// ============================================================================

#[test]
fn test_ordering_key_variant_order() {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut keys = vec![
        OrderingKey::from("a"),
        OrderingKey::from(ts),
        OrderingKey::Null,
        OrderingKey::from(5),
        OrderingKey::from(vec![1, 2]),
    ];
    keys.sort();

    assert_eq!(keys[0], OrderingKey::Null);
    assert_eq!(keys[1], OrderingKey::Int(5));
    assert_eq!(keys[2], OrderingKey::Timestamp(ts));
    assert_eq!(keys[3], OrderingKey::Text("a".to_string()));
    assert!(matches!(keys[4], OrderingKey::Composite(_)));
}

#[test]
fn test_composite_keys_compare_lexicographically() {
    let a = OrderingKey::from(vec![1, 9]);
    let b = OrderingKey::from(vec![2, 0]);
    let c = OrderingKey::from(vec![2, 1]);
    assert!(a < b);
    assert!(b < c);
}

#[test_case(json!(null), OrderingKey::Null ; "null")]
#[test_case(json!(42), OrderingKey::Int(42) ; "integer")]
#[test_case(json!(true), OrderingKey::Int(1) ; "boolean")]
#[test_case(json!("bob"), OrderingKey::Text("bob".to_string()) ; "text")]
#[test_case(json!(1.5), OrderingKey::Text("1.5".to_string()) ; "float falls back to text")]
fn test_ordering_key_from_json(value: serde_json::Value, expected: OrderingKey) {
    assert_eq!(OrderingKey::from_json(&value), expected);
}

#[test]
fn test_ordering_key_from_json_timestamp() {
    let key = OrderingKey::from_json(&json!("2024-03-01T12:00:00+02:00"));
    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    assert_eq!(key, OrderingKey::Timestamp(expected));
}

#[test]
fn test_ordering_key_from_json_field() {
    let item = json!({"id": 7, "name": "x"});
    assert_eq!(OrderingKey::from_json_field(&item, "id"), OrderingKey::Int(7));
    assert_eq!(OrderingKey::from_json_field(&item, "missing"), OrderingKey::Null);
}

// ============================================================================
// Cursor Tests
// ============================================================================

#[test]
fn test_cursor_constructors() {
    assert!(Cursor::start().is_start());
    assert!(!Cursor::end().is_start());
    assert!(Cursor::end().reverse);

    let after = Cursor::after(5);
    assert_eq!(after.position, Some(OrderingKey::Int(5)));
    assert!(!after.reverse);

    let before = Cursor::before("k");
    assert!(before.reverse);
}

#[test]
fn test_cursor_serialization_is_compact() {
    assert_eq!(serde_json::to_string(&Cursor::start()).unwrap(), "{}");
    assert_eq!(
        serde_json::to_string(&Cursor::before(3)).unwrap(),
        r#"{"p":{"int":3},"r":true}"#
    );
}

// ============================================================================
// Base64 Codec Tests
// ============================================================================

#[test]
fn test_base64_round_trip() {
    let codec = Base64CursorCodec;
    for cursor in [
        Cursor::start(),
        Cursor::end(),
        Cursor::after(10),
        Cursor::before("name-42"),
        Cursor::after(vec![OrderingKey::from(1), OrderingKey::from("x")]),
    ] {
        let token = codec.encode(&cursor).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), cursor);
    }
}

#[test]
fn test_base64_is_deterministic_and_url_safe() {
    let codec = Base64CursorCodec;
    let a = codec.encode(&Cursor::after("a/b+c")).unwrap();
    let b = codec.encode(&Cursor::after("a/b+c")).unwrap();
    assert_eq!(a, b);
    assert!(!a.contains('+'));
    assert!(!a.contains('/'));
    assert!(!a.contains('='));
}

#[test]
fn test_base64_does_not_expose_raw_key() {
    let token = Base64CursorCodec.encode(&Cursor::after("secret-key")).unwrap();
    assert!(!token.contains("secret-key"));
}

#[test_case("not base64 at all!" ; "bad alphabet")]
#[test_case("aGVsbG8" ; "valid base64 but not json")]
#[test_case("eyJwIjp7ImZsb2F0IjoxfX0" ; "unknown key kind")]
fn test_base64_rejects_malformed(token: &str) {
    let err = Base64CursorCodec.decode(token).unwrap_err();
    assert!(matches!(err, Error::InvalidCursor { .. }));
}

// ============================================================================
// Signed Codec Tests
// ============================================================================

#[test]
fn test_signed_round_trip() {
    let codec = SignedCursorCodec::new("s3cret");
    for cursor in [Cursor::start(), Cursor::after(99), Cursor::before("m")] {
        let token = codec.encode(&cursor).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), cursor);
    }
}

#[test]
fn test_signed_is_deterministic() {
    let codec = SignedCursorCodec::new("s3cret");
    let a = codec.encode(&Cursor::after(1)).unwrap();
    let b = codec.encode(&Cursor::after(1)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_signed_rejects_tampering() {
    let codec = SignedCursorCodec::new("s3cret");
    let token = codec.encode(&Cursor::after(1)).unwrap();

    // Swap the payload for one pointing elsewhere, keeping the signature
    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);
    let forged_payload = encode_segment(r#"{"p":{"int":1000}}"#);
    let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

    let err = codec.decode(&forged).unwrap_err();
    assert!(matches!(err, Error::InvalidCursor { .. }));
}

#[test]
fn test_signed_rejects_other_secret() {
    let token = SignedCursorCodec::new("one").encode(&Cursor::after(1)).unwrap();
    assert!(SignedCursorCodec::new("two").decode(&token).is_err());
}

#[test]
fn test_signed_rejects_unsigned_token() {
    let token = Base64CursorCodec.encode(&Cursor::after(1)).unwrap();
    assert!(SignedCursorCodec::new("s3cret").decode(&token).is_err());
}

fn encode_segment(body: &str) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    URL_SAFE_NO_PAD.encode(body)
}
