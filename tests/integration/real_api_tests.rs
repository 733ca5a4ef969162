//! Live NCBI tests
//!
//! Run with:
//! `EVIDENCE_SEARCH_REAL_API_TESTS=1 cargo test --features integration-tests --test real_api_tests`

mod common;

use evidence_search::{ClientConfig, SearchFilters, SearchService, StudyType};
use tracing::info;

use common::should_run_real_api_tests;

fn live_service() -> SearchService {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    SearchService::with_config(
        ClientConfig::from_env()
            .with_email("test@example.com")
            .with_tool("evidence-search-integration-tests"),
    )
}

#[tokio::test]
async fn test_live_search() {
    if !should_run_real_api_tests() {
        info!("Skipping live test; set EVIDENCE_SEARCH_REAL_API_TESTS to enable");
        return;
    }

    let result = live_service()
        .search("curcumin osteoarthritis", 5, &SearchFilters::new())
        .await
        .expect("Live search should succeed");

    assert!(result.total_count > 0);
    assert!(!result.articles.is_empty());
    assert!(result.articles.len() <= 5);
    for article in &result.articles {
        assert!(!article.id.is_empty());
        assert!(article.authors.len() <= 5);
        assert!(article.source_url.ends_with(&format!("{}/", article.id)));
    }
}

#[tokio::test]
async fn test_live_filtered_search() {
    if !should_run_real_api_tests() {
        return;
    }

    let filters = SearchFilters::new()
        .date_from("2018")
        .study_type(StudyType::MetaAnalysis);
    let result = live_service()
        .search("ashwagandha", 5, &filters)
        .await
        .expect("Live filtered search should succeed");

    for article in &result.articles {
        if let Ok(year) = article.year.parse::<u32>() {
            assert!(year >= 2018, "{} published {}", article.id, year);
        }
    }
}

#[tokio::test]
async fn test_live_misspelling() {
    if !should_run_real_api_tests() {
        return;
    }

    let service = live_service();
    let result = service
        .search("ashwaghanda", 5, &SearchFilters::new())
        .await
        .expect("Live search should succeed");

    if service.needs_fallback(&result) {
        assert_eq!(result.suggestion.as_deref(), Some("ashwagandha"));
    }
}
