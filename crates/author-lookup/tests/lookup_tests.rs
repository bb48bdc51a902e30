//! End-to-end lookup flow against a mock Crossref.

use std::sync::Arc;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use author_lookup::error::{ClientError, LookupError};
use author_lookup::models::AuthorSummary;
use author_lookup::session::FileSession;
use author_lookup::{AuthorLookup, Config, CrossrefClient};

fn setup_lookup(mock_server: &MockServer) -> AuthorLookup {
    let client = CrossrefClient::new(Config::for_testing(&mock_server.uri())).unwrap();
    AuthorLookup::new(Arc::new(client))
}

fn search_fixture() -> serde_json::Value {
    serde_json::from_str(include_str!("fixtures/works_search.json")).unwrap()
}

async fn mount_search(mock_server: &MockServer, author: &str) {
    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("query.author", author))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_fixture()))
        .mount(mock_server)
        .await;
}

// =============================================================================
// find_candidates
// =============================================================================

#[tokio::test]
async fn test_find_candidates() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, "smith").await;

    let candidates = setup_lookup(&mock_server).find_candidates("  smith ").await.unwrap();

    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[0].full_name(), "Jane Smith");
    assert_eq!(candidates[0].total_publications, 3);
    assert_eq!(candidates[1].full_name(), "Adam Smithson");
}

#[tokio::test]
async fn test_blank_name_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_fixture()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = setup_lookup(&mock_server).find_candidates("   ").await.unwrap_err();
    assert!(matches!(err, LookupError::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_search_failure_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = setup_lookup(&mock_server).find_candidates("smith").await.unwrap_err();
    assert!(matches!(err, LookupError::Client(ClientError::Upstream { status: 500, .. })));
    assert_eq!(err.to_user_message(), "Failed to fetch data from Crossref. Please try again.");
}

// =============================================================================
// publications
// =============================================================================

#[tokio::test]
async fn test_publications_by_full_name() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, "Jane Smith").await;

    let author = AuthorSummary {
        given: "Jane".to_string(),
        family: "Smith".to_string(),
        ..Default::default()
    };
    let result = setup_lookup(&mock_server).publications(&author).await.unwrap();

    assert_eq!(result.author.full_name(), "Jane Smith");
    assert_eq!(result.publications.len(), 5);

    let citations: Vec<u64> = result.top_cited.iter().map(|b| b.citations).collect();
    assert_eq!(citations, vec![100, 10, 5, 3, 0]);
    assert_eq!(result.chart.len(), result.top_cited.len());
}

#[tokio::test]
async fn test_publications_rejects_nameless_author() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&mock_server).await;

    let err = setup_lookup(&mock_server).publications(&AuthorSummary::default()).await.unwrap_err();
    assert!(matches!(err, LookupError::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_publications_failure_returns_nothing_partial() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let author =
        AuthorSummary { given: "Jane".to_string(), family: "Smith".to_string(), ..Default::default() };
    let err = setup_lookup(&mock_server).publications(&author).await.unwrap_err();
    assert!(matches!(err, LookupError::Client(_)));
}

// =============================================================================
// Session handoff
// =============================================================================

#[tokio::test]
async fn test_search_select_publications_through_file_slot() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, "smith").await;
    mount_search(&mock_server, "Adam Smithson").await;

    let dir = tempfile::tempdir().unwrap();
    let session = FileSession::new(dir.path().join("selection.json"));
    let lookup = setup_lookup(&mock_server);

    assert!(matches!(session.read(), Err(LookupError::NoSelection)));

    let candidates = lookup.find_candidates("smith").await.unwrap();
    session.write(&candidates[1]).unwrap();

    let selected = session.read().unwrap();
    assert_eq!(selected, candidates[1]);

    let result = lookup.publications(&selected).await.unwrap();
    assert_eq!(result.author.family, "Smithson");

    // Reading does not consume the selection.
    assert!(session.read().is_ok());
}

// =============================================================================
// work
// =============================================================================

#[tokio::test]
async fn test_work_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/10.1000/a1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/work_single.json")),
        )
        .mount(&mock_server)
        .await;

    let work = setup_lookup(&mock_server).work("doi:10.1000/a1").await.unwrap();
    assert_eq!(work.title_or_default(), "Deep Learning for Graphs");
}

#[tokio::test]
async fn test_work_not_found_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/10.1000/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = setup_lookup(&mock_server).work("10.1000/nope").await.unwrap_err();
    assert!(err.to_user_message().contains("check the DOI"));
}

#[tokio::test]
async fn test_blank_doi_is_invalid() {
    let mock_server = MockServer::start().await;

    // A works-list envelope would decode as an empty work if a request went out.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_fixture()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let lookup = setup_lookup(&mock_server);
    for doi in [" ", "doi:", "doi: ", "https://doi.org/", "https://dx.doi.org/"] {
        let err = lookup.work(doi).await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidArgument { .. }), "doi {doi:?}");
    }
}

#[tokio::test]
async fn test_search_not_found_does_not_blame_doi() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = setup_lookup(&mock_server).find_candidates("smith").await.unwrap_err();
    let msg = err.to_user_message();
    assert!(!msg.contains("DOI"), "{msg}");
    assert!(msg.contains("API URL"));
}
