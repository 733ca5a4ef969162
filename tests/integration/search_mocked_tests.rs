//! End-to-end search tests with both E-utilities phases mocked

mod common;

use evidence_search::query::{QUALITY_CLAUSE, condition_query};
use evidence_search::{ClientConfig, SearchFilters, SearchService, StudyType};
use rstest::rstest;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{article_record, article_set, esearch_json, load_fixture, mock_config, mock_service};

async fn mount_esearch(server: &MockServer, count: usize, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json(count, ids)))
        .mount(server)
        .await;
}

async fn mount_efetch(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_returns_parsed_articles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("term", "curcumin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("api_responses/esearch_curcumin.json")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "34200001,34200002,34200004"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("pubmed_xml/curcumin_batch.xml")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = mock_service(&server)
        .search("curcumin", 20, &SearchFilters::new())
        .await
        .unwrap();

    assert_eq!(result.query, "curcumin");
    assert_eq!(result.total_count, 3);
    assert_eq!(result.articles.len(), 3);
    assert_eq!(result.articles[0].id, "34200001");
    // Correctly spelled: nothing to suggest even though the count is low
    assert_eq!(result.suggestion, None);
}

#[tokio::test]
async fn test_zero_ids_skips_detail_fetch() {
    let server = MockServer::start().await;
    mount_esearch(&server, 0, &[]).await;
    Mock::given(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = mock_service(&server)
        .search("withaferin", 10, &SearchFilters::new())
        .await
        .unwrap();

    assert!(result.articles.is_empty());
    assert_eq!(result.total_count, 0);
}

#[tokio::test]
async fn test_zero_ids_keeps_upstream_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json(37, &[])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = mock_service(&server)
        .search("withaferin", 0, &SearchFilters::new())
        .await
        .unwrap();

    assert!(result.articles.is_empty());
    assert_eq!(result.total_count, 37);
}

#[tokio::test]
async fn test_total_count_comes_from_esearch() {
    let server = MockServer::start().await;
    mount_esearch(&server, 1432, &["1", "2"]).await;
    mount_efetch(
        &server,
        article_set(&[
            article_record("1", Some("First")),
            article_record("2", Some("Second")),
        ]),
    )
    .await;

    let result = mock_service(&server)
        .search("magnesium", 2, &SearchFilters::new())
        .await
        .unwrap();

    assert_eq!(result.total_count, 1432);
    assert_eq!(result.articles.len(), 2);
}

#[tokio::test]
async fn test_misspelling_with_sparse_results_gets_suggestion() {
    let server = MockServer::start().await;
    mount_esearch(&server, 1, &["7"]).await;
    mount_efetch(&server, article_set(&[article_record("7", Some("T"))])).await;

    let result = mock_service(&server)
        .search("curcuminn", 20, &SearchFilters::new())
        .await
        .unwrap();

    // The original query is what was searched and reported
    assert_eq!(result.query, "curcuminn");
    assert_eq!(result.suggestion.as_deref(), Some("curcumin"));
}

#[tokio::test]
async fn test_misspelling_with_healthy_results_gets_no_suggestion() {
    let server = MockServer::start().await;
    mount_esearch(&server, 250, &["7"]).await;
    mount_efetch(&server, article_set(&[article_record("7", Some("T"))])).await;

    let result = mock_service(&server)
        .search("curcuminn", 1, &SearchFilters::new())
        .await
        .unwrap();

    assert_eq!(result.suggestion, None);
}

#[rstest]
#[case("ashwaghanda", "ashwagandha")]
#[case("turmric", "turmeric")]
#[case("ginsng", "ginseng")]
#[tokio::test]
async fn test_suggestions_for_common_misspellings(#[case] query: &str, #[case] expected: &str) {
    let server = MockServer::start().await;
    mount_esearch(&server, 0, &[]).await;

    let result = mock_service(&server)
        .search(query, 20, &SearchFilters::new())
        .await
        .unwrap();

    assert_eq!(result.suggestion.as_deref(), Some(expected));
}

#[tokio::test]
async fn test_threshold_is_configurable() {
    let server = MockServer::start().await;
    mount_esearch(&server, 0, &[]).await;

    let service = SearchService::with_config(mock_config(&server).with_low_result_threshold(0));
    let result = service
        .search("curcuminn", 20, &SearchFilters::new())
        .await
        .unwrap();

    // Nothing is ever below a zero threshold
    assert_eq!(result.suggestion, None);
    assert!(!service.needs_fallback(&result));
}

#[tokio::test]
async fn test_filters_are_anded_onto_the_term() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param(
            "term",
            "(ashwagandha sleep) AND 2019:2024[pdat] AND Meta-Analysis[pt]",
        ))
        .and(query_param("sort", "relevance"))
        .and(query_param("retmax", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json(0, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let filters = SearchFilters::new()
        .date_from("2019")
        .date_to("2024")
        .study_type(StudyType::MetaAnalysis);
    let result = mock_service(&server)
        .search("ashwagandha sleep", 15, &filters)
        .await
        .unwrap();

    assert_eq!(result.total_count, 0);
}

#[tokio::test]
async fn test_study_type_only_adds_single_clause() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .and(query_param("term", "(curcumin) AND Meta-Analysis[pt]"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json(0, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let filters = SearchFilters::new().study_type(StudyType::MetaAnalysis);
    mock_service(&server)
        .search("curcumin", 20, &filters)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_identification_params_are_sent() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .and(query_param("api_key", "secret-key"))
        .and(query_param("email", "test@example.com"))
        .and(query_param("tool", "evidence-search-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json(0, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let config: ClientConfig = mock_config(&server).with_api_key("secret-key");
    SearchService::with_config(config)
        .search("ginseng", 5, &SearchFilters::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_condition_search_uses_preset_query() {
    let server = MockServer::start().await;
    let expected = format!("({}) AND {}", condition_query("cardiovascular"), QUALITY_CLAUSE);
    Mock::given(path("/esearch.fcgi"))
        .and(query_param("term", expected.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json(0, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let result = mock_service(&server)
        .search_by_condition("cardiovascular", 20, &SearchFilters::new())
        .await
        .unwrap();

    assert_eq!(result.query, "cardiovascular");
    assert_eq!(result.suggestion, None);
}

#[tokio::test]
async fn test_condition_search_adds_quality_clause_after_filters() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .and(query_param(
            "term",
            "(long covid) AND Review[pt] AND (humans[MeSH] OR clinical trial[pt] OR review[pt]) AND english[la]",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json(0, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let filters = SearchFilters::new().study_type(StudyType::Review);
    mock_service(&server)
        .search_by_condition("long covid", 20, &filters)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_blank_query_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = mock_service(&server)
        .search("", 20, &SearchFilters::new())
        .await
        .unwrap();

    assert!(result.articles.is_empty());
    assert_eq!(result.total_count, 0);
    assert_eq!(result.suggestion, None);
}
