//! Unit tests for value classification and token coercion.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface coercion mistakes"
)]

use rstest::rstest;
use serde_json::json;

use super::{CoercionError, ConfigValue, RawToken, ValueKind, Vec2, coerce};

#[rstest]
#[case("true", 1)]
#[case("yes", 1)]
#[case("on", 1)]
#[case("TRUE", 1)]
#[case("false", 0)]
#[case("no", 0)]
#[case("off", 0)]
#[case("42", 42)]
#[case("-7", -7)]
#[case("0xFF0000", 0xFF_0000)]
#[case("0xffffffff", 0xFFFF_FFFF)]
fn coerces_integer_tokens(#[case] token: &str, #[case] expected: i64) {
    let value = coerce(&RawToken::new(token), ValueKind::Int).expect("integer token");
    assert_eq!(value, ConfigValue::Int(expected));
}

#[test]
fn integer_entries_take_pre_parsed_colours() {
    let token = RawToken::new("rgba(33ccffee)").with_color(0xEE33_CCFF);
    let value = coerce(&token, ValueKind::Int).expect("colour token");
    assert_eq!(value, ConfigValue::Int(0xEE33_CCFF));
}

#[test]
fn text_entries_keep_colour_literals() {
    let token = RawToken::new("rgb(ffffff)").with_color(0xFFFF_FFFF);
    let value = coerce(&token, ValueKind::Text).expect("text accepts anything");
    assert_eq!(value, ConfigValue::Text("rgb(ffffff)".into()));
}

#[rstest]
#[case("3.5", ValueKind::Int)]
#[case("dwindle", ValueKind::Int)]
#[case("", ValueKind::Int)]
#[case("0x", ValueKind::Int)]
#[case("inf", ValueKind::Float)]
#[case("NaN", ValueKind::Float)]
#[case("fast", ValueKind::Float)]
fn rejects_tokens_of_the_wrong_kind(#[case] token: &str, #[case] kind: ValueKind) {
    let err = coerce(&RawToken::new(token), kind).expect_err("token must be rejected");
    assert!(
        matches!(err, CoercionError::TypeMismatch { expected, .. } if expected == kind),
        "unexpected error: {err:?}"
    );
}

#[rstest]
#[case("5", 5.0)]
#[case("5.0", 5.0)]
#[case("-0.25", -0.25)]
#[case("1e3", 1000.0)]
fn coerces_float_tokens(#[case] token: &str, #[case] expected: f64) {
    let value = coerce(&RawToken::new(token), ValueKind::Float).expect("float token");
    assert_eq!(value, ConfigValue::Float(expected));
}

#[test]
fn coerces_vec2_tokens() {
    let value = coerce(&RawToken::new("1920 1080"), ValueKind::Vec2).expect("vector token");
    assert_eq!(value, ConfigValue::Vec2(Vec2::new(1920.0, 1080.0)));
}

#[rstest]
#[case("5", 1)]
#[case("1 2 3", 3)]
#[case("", 0)]
fn vec2_requires_two_components(#[case] token: &str, #[case] found: usize) {
    let err = coerce(&RawToken::new(token), ValueKind::Vec2).expect_err("arity mismatch");
    assert_eq!(err, CoercionError::ArityMismatch { expected: 2, found });
}

#[test]
fn vec2_rejects_non_numeric_components() {
    let err = coerce(&RawToken::new("1 wide"), ValueKind::Vec2).expect_err("mismatch");
    assert!(matches!(err, CoercionError::TypeMismatch { expected: ValueKind::Vec2, .. }));
}

#[test]
fn text_is_verbatim() {
    let value = coerce(&RawToken::new("hello world"), ValueKind::Text).expect("text");
    assert_eq!(value.as_text(), Some("hello world"));
}

#[rstest]
#[case(json!(3), ConfigValue::Int(3))]
#[case(json!(5.0), ConfigValue::Float(5.0))]
#[case(json!("dwindle"), ConfigValue::Text("dwindle".into()))]
#[case(json!([1.5, 2.5]), ConfigValue::Vec2(Vec2::new(1.5, 2.5)))]
fn classifies_host_defaults(#[case] host: serde_json::Value, #[case] expected: ConfigValue) {
    assert_eq!(ConfigValue::from_json(&host), Ok(expected));
}

#[rstest]
#[case(json!(true), "bool")]
#[case(json!(null), "null")]
#[case(json!([1.0, 2.0, 3.0]), "array")]
#[case(json!(["a", "b"]), "array")]
#[case(json!({"a": 1}), "object")]
fn rejects_unsupported_host_defaults(#[case] host: serde_json::Value, #[case] shape: &str) {
    assert_eq!(ConfigValue::from_json(&host), Err(shape));
}

#[test]
fn exports_vectors_as_pairs() {
    let value = ConfigValue::from((1.0, 2.0));
    assert_eq!(value.to_json(), json!([1.0, 2.0]));
    assert_eq!(value.kind(), ValueKind::Vec2);
    assert_eq!(value.to_string(), "1 2");
}
