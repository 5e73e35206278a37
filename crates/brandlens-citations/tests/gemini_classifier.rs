//! Integration tests for `GeminiClassifier` using wiremock HTTP mocks.

use brandlens_citations::{CitationError, CompetitorClassifier, GeminiClassifier};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn test_classifier(base_url: &str) -> GeminiClassifier {
    GeminiClassifier::with_base_url("test-key", "gemini-2.5-flash", 5, base_url)
        .expect("classifier construction should not fail")
}

fn candidate_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": text } ] } }
        ]
    })
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn returns_domains_from_structured_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_string_contains("nike.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(
            r#"[{"domain": "adidas.com"}, {"domain": " puma.com "}, {"domain": ""}]"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = test_classifier(&server.uri());
    let found = classifier
        .classify_competitors(
            &urls(&["https://adidas.com/x", "https://puma.com", "https://adidas.com/x"]),
            "nike.com",
        )
        .await
        .expect("should classify");

    assert_eq!(found, vec!["adidas.com".to_string(), "puma.com".to_string()]);
}

#[tokio::test]
async fn empty_url_list_skips_the_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let classifier = test_classifier(&server.uri());
    let found = classifier
        .classify_competitors(&[], "nike.com")
        .await
        .expect("no request should be made");
    assert!(found.is_empty());
}

#[tokio::test]
async fn missing_candidates_mean_no_competitors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let classifier = test_classifier(&server.uri());
    let found = classifier
        .classify_competitors(&urls(&["https://adidas.com"]), "nike.com")
        .await
        .expect("empty reply is not an error");
    assert!(found.is_empty());
}

#[tokio::test]
async fn server_error_is_classification_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let classifier = test_classifier(&server.uri());
    let err = classifier
        .classify_competitors(&urls(&["https://adidas.com"]), "nike.com")
        .await
        .unwrap_err();
    assert!(
        matches!(err, CitationError::ClassificationServiceUnavailable(ref m) if m.contains("503")),
        "got {err:?}"
    );
}

#[tokio::test]
async fn malformed_domain_list_is_classification_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("not json")))
        .mount(&server)
        .await;

    let classifier = test_classifier(&server.uri());
    let err = classifier
        .classify_competitors(&urls(&["https://adidas.com"]), "nike.com")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CitationError::ClassificationServiceUnavailable(_)
    ));
}

#[tokio::test]
async fn unreachable_service_is_classification_unavailable() {
    // Nothing listens on port 9 of localhost.
    let classifier = test_classifier("http://127.0.0.1:9");
    let err = classifier
        .classify_competitors(&urls(&["https://adidas.com"]), "nike.com")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CitationError::ClassificationServiceUnavailable(_)
    ));
}
