//! Crossref client tests using wiremock.
//!
//! Verify the request shape and the status-code classification.

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use author_lookup::client::CrossrefClient;
use author_lookup::config::{Config, fields};
use author_lookup::error::ClientError;

fn setup_client(mock_server: &MockServer) -> CrossrefClient {
    CrossrefClient::new(Config::for_testing(&mock_server.uri())).unwrap()
}

fn search_fixture() -> serde_json::Value {
    serde_json::from_str(include_str!("fixtures/works_search.json")).unwrap()
}

// =============================================================================
// Request shape
// =============================================================================

#[tokio::test]
async fn test_search_sends_bounded_projected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("query.author", "Jane Smith"))
        .and(query_param("rows", "100"))
        .and(query_param("select", fields::AUTHOR_SEARCH.join(",")))
        .and(query_param("mailto", "test@example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_fixture()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let works = setup_client(&mock_server).search_by_author_name("Jane Smith").await.unwrap();

    assert_eq!(works.len(), 5);
    assert_eq!(works[0].doi(), Some("10.1000/a1"));
    assert_eq!(works[0].authors().len(), 2);
    assert!(works[2].authors().is_empty());
}

#[tokio::test]
async fn test_publications_projection_includes_created() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("query.author", "Jane Smith"))
        .and(query_param("select", fields::PUBLICATIONS.join(",")))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_fixture()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let works = setup_client(&mock_server).search_publications("Jane Smith").await.unwrap();
    assert_eq!(works.len(), 5);
}

#[tokio::test]
async fn test_mailto_is_omitted_when_unset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param_is_missing("mailto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_fixture()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config { mailto: None, ..Config::for_testing(&mock_server.uri()) };
    let client = CrossrefClient::new(config).unwrap();
    assert!(!client.has_mailto());
    client.search_by_author_name("smith").await.unwrap();
}

#[tokio::test]
async fn test_get_by_doi() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/10.1000/a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("fixtures/work_single.json"))
                .insert_header("content-type", "application/json"),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let work = client.get_by_doi("10.1000/a1").await.unwrap();
    assert_eq!(work.title(), Some("Deep Learning for Graphs"));
    assert_eq!(work.created_at().unwrap().to_rfc3339(), "2019-01-15T08:30:00+00:00");

    let work = client.get_by_doi("https://doi.org/10.1000/a1").await.unwrap();
    assert_eq!(work.doi(), Some("10.1000/a1"));
}

#[tokio::test]
async fn test_empty_result_set_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "message-type": "work-list",
            "message": {"total-results": 0, "items": []}
        })))
        .mount(&mock_server)
        .await;

    let works = setup_client(&mock_server).search_by_author_name("zzzz").await.unwrap();
    assert!(works.is_empty());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_unknown_doi_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/10.1000/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Resource not found."))
        .mount(&mock_server)
        .await;

    let err = setup_client(&mock_server).get_by_doi("10.1000/missing").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }), "got {err:?}");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_server_error_is_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = setup_client(&mock_server).search_by_author_name("smith").await.unwrap_err();
    match err {
        ClientError::Upstream { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_is_upstream_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = setup_client(&mock_server).search_by_author_name("smith").await.unwrap_err();
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = setup_client(&mock_server).search_by_author_name("smith").await.unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Nothing listens on the discard port.
    let client = CrossrefClient::new(Config::for_testing("http://127.0.0.1:9")).unwrap();
    let err = client.search_by_author_name("smith").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "got {err:?}");
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_client_debug_shows_base() {
    let client = CrossrefClient::new(Config::for_testing("http://localhost:4000")).unwrap();
    let debug = format!("{client:?}");
    assert!(debug.contains("localhost:4000"));
    assert!(debug.contains("has_mailto"));
}

#[test]
fn test_client_rejects_non_base_url() {
    let config = Config { api_url: "mailto:someone@example.org".to_string(), ..Config::default() };
    assert!(CrossrefClient::new(config).is_err());
}
