//! Error classification across the pipeline

mod common;

use std::time::Duration;

use evidence_search::{ErrorKind, SearchError, SearchFilters, SearchService};
use rstest::rstest;
use tracing_test::traced_test;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{esearch_json, mock_config, mock_service};

#[rstest]
#[case::malformed_year(SearchFilters::new().date_from("20x0"))]
#[case::two_digit_year(SearchFilters::new().date_to("24"))]
#[case::inverted_range(SearchFilters::new().date_from("2024").date_to("2019"))]
#[tokio::test]
async fn test_invalid_filters_are_input_errors(#[case] filters: SearchFilters) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = mock_service(&server)
        .search("curcumin", 10, &filters)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::InvalidFilter(_)));
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[tokio::test]
async fn test_too_many_results_requested() {
    let server = MockServer::start().await;

    let err = mock_service(&server)
        .search("curcumin", 20_000, &SearchFilters::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchError::SearchLimitExceeded {
            requested: 20_000,
            maximum: 9999
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[rstest]
#[case(500, true)]
#[case(503, true)]
#[case(429, true)]
#[case(400, false)]
#[case(404, false)]
#[tokio::test]
async fn test_esearch_status_errors(#[case] status: u16, #[case] retryable: bool) {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;

    let err = mock_service(&server)
        .search("curcumin", 10, &SearchFilters::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::ApiError { status: s, .. } if s == status));
    assert_eq!(err.kind(), ErrorKind::Retrieval);
    assert_eq!(err.is_retryable(), retryable);
}

#[tokio::test]
async fn test_undecodable_esearch_body() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = mock_service(&server)
        .search("curcumin", 10, &SearchFilters::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::JsonError(_)));
    assert_eq!(err.kind(), ErrorKind::Retrieval);
}

#[tokio::test]
#[traced_test]
async fn test_esearch_error_payload() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"esearchresult":{"ERROR":"Invalid query syntax"}}"#),
        )
        .mount(&server)
        .await;

    let err = mock_service(&server)
        .search("curcumin AND (", 10, &SearchFilters::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Retrieval);
    assert!(err.to_string().contains("Invalid query syntax"));
    assert!(logs_contain("ESearch reported an error"));
}

#[tokio::test]
async fn test_efetch_failure_is_not_degraded() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json(2, &["1", "2"])))
        .mount(&server)
        .await;
    Mock::given(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = mock_service(&server)
        .search("curcumin", 10, &SearchFilters::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::ApiError { status: 502, .. }));
}

#[tokio::test]
async fn test_malformed_batch_document() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json(1, &["1"])))
        .mount(&server)
        .await;
    Mock::given(path("/efetch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<PubmedArticleSet><PubmedArticle><MedlineCitation>"),
        )
        .mount(&server)
        .await;

    let err = mock_service(&server)
        .search("curcumin", 10, &SearchFilters::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::XmlError(_)));
    assert_eq!(err.kind(), ErrorKind::Retrieval);
}

#[tokio::test]
async fn test_retrieval_timeout() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(esearch_json(0, &[]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let service = SearchService::with_config(
        mock_config(&server).with_timeout(Duration::from_millis(200)),
    );
    let err = service
        .search("curcumin", 10, &SearchFilters::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::RequestError(_)));
    assert_eq!(err.kind(), ErrorKind::Retrieval);
    assert!(err.is_retryable());
}
