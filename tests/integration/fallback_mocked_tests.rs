//! Generative fallback tests against a mocked chat completion service

mod common;

use std::time::Duration;

use evidence_search::{
    ErrorKind, FallbackClient, FallbackConfig, FallbackSource, SearchFilters, SearchService,
};
use serde_json::json;
use tracing_test::traced_test;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{esearch_json, mock_config};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn fallback_config(server: &MockServer) -> FallbackConfig {
    FallbackConfig::new()
        .with_endpoint(format!("{}/v1", server.uri()))
        .with_api_key("test-key")
        .with_model("test-model")
}

#[tokio::test]
async fn test_structured_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"summary":"Shilajit is a mineral pitch used in Ayurveda.","suggested_terms":["shilajit","fulvic acid"],"related_topics":["mitochondrial function"]}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = FallbackClient::new(fallback_config(&server));
    let result = client
        .augment("shilajit", Some("Literature search returned 2 results"))
        .await
        .unwrap();

    assert_eq!(result.query, "shilajit");
    assert_eq!(result.summary, "Shilajit is a mineral pitch used in Ayurveda.");
    assert_eq!(result.suggested_terms, vec!["shilajit", "fulvic acid"]);
    assert_eq!(result.related_topics, vec!["mitochondrial function"]);
    assert_eq!(result.source, FallbackSource::AiAssisted);
}

#[tokio::test]
async fn test_prose_answer_becomes_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("Moringa leaves are rich in polyphenols.")),
        )
        .mount(&server)
        .await;

    let result = FallbackClient::new(fallback_config(&server))
        .augment("moringa", None)
        .await
        .unwrap();

    assert_eq!(result.summary, "Moringa leaves are rich in polyphenols.");
    assert!(result.suggested_terms.is_empty());
    assert!(result.related_topics.is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = FallbackClient::new(fallback_config(&server))
        .augment("moringa", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FallbackUnavailable);
    assert!(logs_contain("Fallback service answered with status"));
}

#[tokio::test]
async fn test_empty_choices_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = FallbackClient::new(fallback_config(&server))
        .augment("moringa", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FallbackUnavailable);
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = fallback_config(&server).with_timeout(Duration::from_millis(200));
    let err = FallbackClient::new(config)
        .augment("moringa", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FallbackUnavailable);
}

#[tokio::test]
async fn test_service_offers_fallback_for_sparse_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json(0, &[])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"summary":"S","suggested_terms":["Mucuna pruriens"],"related_topics":[]}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let service = SearchService::with_config(
        mock_config(&server).with_fallback(fallback_config(&server)),
    );
    let result = service
        .search("kapikachhu", 20, &SearchFilters::new())
        .await
        .unwrap();
    assert!(service.needs_fallback(&result));

    let answer = service
        .augment_with_fallback(&result.query, None)
        .await
        .unwrap();
    assert_eq!(answer.suggested_terms, vec!["Mucuna pruriens"]);
    assert_eq!(answer.source.as_str(), "ai_assisted");
}
