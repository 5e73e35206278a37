//! Integration tests for the filesystem and HTTP document stores, and the
//! analyzer running on top of them.

use brandlens_citations::{
    analyze_domain_citations, CitationError, DocumentStore, FsDocumentStore, HttpDocumentStore,
    NoCompetitors,
};
use brandlens_core::ScopeRequest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fs_store_reads_nested_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("report-1");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(nested.join("answer.md"), "see https://nike.com").unwrap();

    let store = FsDocumentStore::new(dir.path());
    let text = store.fetch("report-1/answer.md").await.unwrap();
    assert_eq!(text, "see https://nike.com");
}

#[tokio::test]
async fn fs_store_missing_file_is_store_unavailable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FsDocumentStore::new(dir.path());
    let err = store.fetch("nope.md").await.unwrap_err();
    assert!(matches!(err, CitationError::StoreUnavailable { ref key, .. } if key == "nope.md"));
}

#[tokio::test]
async fn http_store_fetches_by_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bucket/report-1/a.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[x](https://x.com)"))
        .mount(&server)
        .await;

    let store = HttpDocumentStore::new(&format!("{}/bucket/", server.uri()), 5).unwrap();
    let text = store.fetch("report-1/a.md").await.unwrap();
    assert_eq!(text, "[x](https://x.com)");
}

#[tokio::test]
async fn http_store_non_success_is_store_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = HttpDocumentStore::new(&server.uri(), 5).unwrap();
    let err = store.fetch("missing.md").await.unwrap_err();
    assert!(
        matches!(err, CitationError::StoreUnavailable { ref reason, .. } if reason.contains("404")),
        "got {err:?}"
    );
}

#[tokio::test]
async fn analyzer_over_filesystem_documents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let documents = [
        ("a.md", "[Target](https://target.com/x) and https://other.net/y"),
        ("b.md", "nothing"),
        ("c.md", "target.com is cited"),
        ("d.md", "https://www.google.com/search?q=target.com"),
        ("e.md", "nothing"),
    ];
    for (name, body) in documents {
        std::fs::write(dir.path().join(name), body).unwrap();
    }
    let keys: Vec<String> = documents.iter().map(|(k, _)| (*k).to_string()).collect();

    let scope = ScopeRequest {
        report_id: Some("report-1".to_string()),
        ..ScopeRequest::default()
    }
    .build()
    .unwrap();

    let report = analyze_domain_citations(
        &scope,
        "target.com",
        &keys,
        &FsDocumentStore::new(dir.path()),
        &NoCompetitors,
    )
    .await
    .unwrap();

    // d.md mentions target.com textually inside the google URL.
    assert!((report.coverage_percentage - 60.0).abs() < 1e-9);
    assert_eq!(report.citation_count, 1);
    assert!(report.url_data.own.is_some());
    assert_eq!(report.url_data.external_domains.len(), 1);
    assert_eq!(report.url_data.external_domains[0].domain, "other.net");
}
