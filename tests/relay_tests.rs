mod common;

use serde_json::{json, Value};

use common::{gemini_envelope, relay_with, MockTransport, Scripted, SAMPLE_ROWS};
use qc_relay::relay::{ExtractionError, EXTRACTION_PROMPT};
use qc_relay::ExtractionRequest;

fn request(image: &str, key: Option<&str>) -> ExtractionRequest {
    ExtractionRequest::new(image, "image/png", key.map(str::to_string))
}

#[tokio::test]
async fn test_fenced_array_is_returned_verbatim() {
    let fenced = format!("```json\n{}\n```", SAMPLE_ROWS);
    let transport = MockTransport::replying(200, gemini_envelope(&fenced));
    let relay = relay_with(transport.clone(), Some("server-key"));

    let rows = relay.extract(request("aGVsbG8=", None)).await.unwrap();

    let expected: Vec<Value> = serde_json::from_str(SAMPLE_ROWS).unwrap();
    assert_eq!(rows, expected);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_clean_array_is_unchanged() {
    let transport = MockTransport::replying(200, gemini_envelope(SAMPLE_ROWS));
    let relay = relay_with(transport, Some("server-key"));

    let rows = relay.extract(request("aGVsbG8=", None)).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["batch_code"], "MU01");
}

#[tokio::test]
async fn test_bare_object_becomes_single_row() {
    let text = r#"{"variety":"Rolled Oats 800gm","mrp":"405"}"#;
    let transport = MockTransport::replying(200, gemini_envelope(text));
    let relay = relay_with(transport, Some("server-key"));

    let rows = relay.extract(request("aGVsbG8=", None)).await.unwrap();
    assert_eq!(rows, vec![json!({"variety": "Rolled Oats 800gm", "mrp": "405"})]);
}

#[tokio::test]
async fn test_rows_are_not_schema_checked() {
    let transport = MockTransport::replying(200, gemini_envelope(r#"[1, "two", {"extra": true}]"#));
    let relay = relay_with(transport, Some("server-key"));

    let rows = relay.extract(request("aGVsbG8=", None)).await.unwrap();
    assert_eq!(rows, vec![json!(1), json!("two"), json!({"extra": true})]);
}

#[tokio::test]
async fn test_missing_image_skips_network() {
    let transport = MockTransport::replying(200, gemini_envelope("[]"));
    let relay = relay_with(transport.clone(), Some("server-key"));

    let err = relay.extract(request("", None)).await.unwrap_err();
    assert!(matches!(err, ExtractionError::MissingInput(_)));
    assert_eq!(err.status_code(), 400);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_whitespace_image_is_forwarded() {
    let transport = MockTransport::replying(200, gemini_envelope("[]"));
    let relay = relay_with(transport.clone(), Some("server-key"));

    let rows = relay.extract(request("  ", None)).await.unwrap();
    assert!(rows.is_empty());
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_missing_credential_skips_network() {
    let transport = MockTransport::replying(200, gemini_envelope("[]"));
    let relay = relay_with(transport.clone(), None);

    let err = relay.extract(request("aGVsbG8=", None)).await.unwrap_err();
    assert!(matches!(err, ExtractionError::MissingInput(_)));
    assert_eq!(transport.calls(), 0);

    let err = relay.extract(request("aGVsbG8=", Some("   "))).await.unwrap_err();
    assert!(matches!(err, ExtractionError::MissingInput(_)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_caller_key_used_without_server_key() {
    let transport = MockTransport::replying(200, gemini_envelope("[]"));
    let relay = relay_with(transport.clone(), None);

    relay.extract(request("aGVsbG8=", Some("caller-key"))).await.unwrap();
    let (url, _) = transport.last_request().unwrap();
    assert!(url.ends_with("key=caller-key"), "{url}");
}

#[tokio::test]
async fn test_server_key_wins_over_caller_key() {
    let transport = MockTransport::replying(200, gemini_envelope("[]"));
    let relay = relay_with(transport.clone(), Some("server-key"));

    relay.extract(request("aGVsbG8=", Some("caller-key"))).await.unwrap();
    let (url, _) = transport.last_request().unwrap();
    assert_eq!(
        url,
        "http://upstream.test/v1beta/models/gemini-2.5-flash:generateContent?key=server-key"
    );
}

#[tokio::test]
async fn test_outbound_payload_shape() {
    let transport = MockTransport::replying(200, gemini_envelope("[]"));
    let relay = relay_with(transport.clone(), Some("server-key"));

    relay.extract(request("aGVsbG8=", None)).await.unwrap();
    let (_, body) = transport.last_request().unwrap();
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["inline_data"]["mime_type"], "image/png");
    assert_eq!(parts[0]["inline_data"]["data"], "aGVsbG8=");
    assert_eq!(parts[1]["text"], EXTRACTION_PROMPT);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 4096);
}

#[tokio::test]
async fn test_upstream_rejection_keeps_status_and_message() {
    let transport = MockTransport::replying(429, r#"{"error":{"message":"rate limited"}}"#);
    let relay = relay_with(transport, Some("server-key"));

    let err = relay.extract(request("aGVsbG8=", None)).await.unwrap_err();
    assert_eq!(err.status_code(), 429);
    assert_eq!(err.to_string(), "Gemini API error: rate limited");
}

#[tokio::test]
async fn test_upstream_rejection_with_plain_body() {
    let transport = MockTransport::replying(503, "Service Unavailable");
    let relay = relay_with(transport, Some("server-key"));

    let err = relay.extract(request("aGVsbG8=", None)).await.unwrap_err();
    assert_eq!(err.status_code(), 503);
    assert_eq!(err.to_string(), "Gemini API error: Service Unavailable");
}

#[tokio::test]
async fn test_unreachable_upstream_maps_to_gateway_error() {
    let transport = MockTransport::new(Scripted::Unreachable("tcp connect error: Connection refused".into()));
    let relay = relay_with(transport.clone(), Some("server-key"));

    let err = relay.extract(request("aGVsbG8=", None)).await.unwrap_err();
    assert_eq!(err.status_code(), 502);
    assert!(err.to_string().contains("Connection refused"));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_prose_reply_surfaces_raw_text() {
    let prose = "I'm sorry, I can't read this image.";
    let transport = MockTransport::replying(200, gemini_envelope(prose));
    let relay = relay_with(transport, Some("server-key"));

    let err = relay.extract(request("aGVsbG8=", None)).await.unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains(prose));
}

#[tokio::test]
async fn test_unexpected_envelope_is_shape_error() {
    let transport = MockTransport::replying(200, r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
    let relay = relay_with(transport, Some("server-key"));

    let err = relay.extract(request("aGVsbG8=", None)).await.unwrap_err();
    assert!(matches!(err, ExtractionError::ResponseShape(_)));
    assert_eq!(err.status_code(), 500);
}
