use crate::{CoreError, Entry, RequestDocument};

use serde_json::json;

#[test]
fn test_parse_keeps_stored_items_verbatim() {
    let text = r#"{"requests":[{"title":"A","requestedBy":"x","timestamp":1},{"legacy":true}]}"#;

    let doc = RequestDocument::parse(text).unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.requests[1], json!({ "legacy": true }));
}

#[test]
fn test_parse_invalid_json_is_error() {
    let result = RequestDocument::parse("not json {");

    assert!(matches!(result, Err(CoreError::DocumentParse { .. })));
}

#[test]
fn test_parse_empty_text_is_error() {
    assert!(RequestDocument::parse("").is_err());
}

#[test]
fn test_parse_non_array_requests_yields_empty() {
    let doc = RequestDocument::parse(r#"{"requests":"nope"}"#).unwrap();
    assert!(doc.is_empty());
}

#[test]
fn test_parse_missing_requests_yields_empty() {
    let doc = RequestDocument::parse(r#"{"other":[1,2,3]}"#).unwrap();
    assert!(doc.is_empty());
}

#[test]
fn test_parse_non_object_yields_empty() {
    assert!(RequestDocument::parse("[1,2]").unwrap().is_empty());
    assert!(RequestDocument::parse("null").unwrap().is_empty());
}

#[test]
fn test_push_appends_in_arrival_order() {
    let mut doc = RequestDocument::parse(r#"{"requests":[{"title":"first"}]}"#).unwrap();

    doc.push(&Entry::with_timestamp("second".into(), "bob".into(), 2))
        .unwrap();
    doc.push(&Entry::with_timestamp("third".into(), "carol".into(), 3))
        .unwrap();

    assert_eq!(doc.len(), 3);
    assert_eq!(doc.requests[0]["title"], "first");
    assert_eq!(doc.requests[1]["title"], "second");
    assert_eq!(doc.requests[2]["requestedBy"], "carol");
}

#[test]
fn test_to_pretty_json_uses_two_space_indent() {
    let mut doc = RequestDocument::default();
    doc.push(&Entry::with_timestamp("Dune".into(), "alice".into(), 7))
        .unwrap();

    let text = doc.to_pretty_json().unwrap();

    let expected = "{\n  \"requests\": [\n    {\n      \"title\": \"Dune\",\n      \"requestedBy\": \"alice\",\n      \"timestamp\": 7\n    }\n  ]\n}";
    assert_eq!(text, expected);
}

#[test]
fn test_to_pretty_json_empty_document() {
    let text = RequestDocument::default().to_pretty_json().unwrap();
    assert_eq!(text, "{\n  \"requests\": []\n}");
}

#[test]
fn test_stored_items_keep_their_key_order_when_rewritten() {
    let text = "{\n  \"requests\": [\n    {\n      \"zeta\": 1,\n      \"title\": \"Old\",\n      \"alpha\": 2\n    }\n  ]\n}";
    let mut doc = RequestDocument::parse(text).unwrap();

    assert_eq!(doc.to_pretty_json().unwrap(), text);

    doc.push(&Entry::with_timestamp("Dune".into(), "alice".into(), 7))
        .unwrap();
    let rewritten = doc.to_pretty_json().unwrap();

    assert!(rewritten.starts_with(&text[..text.len() - 6]));
    assert!(rewritten.contains("\"title\": \"Dune\",\n      \"requestedBy\": \"alice\",\n      \"timestamp\": 7"));
}
