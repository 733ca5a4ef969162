//! Generative fallback for sparse searches
//!
//! When literal retrieval finds little, [`FallbackClient::augment`] asks an
//! OpenAI-compatible chat completion service for a short explanation of the
//! topic plus alternative search terms. The answer is always tagged
//! [`FallbackSource::AiAssisted`] so it is never mistaken for retrieved
//! literature.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::FallbackConfig;
use crate::error::{Result, SearchError};
use crate::models::{FallbackResult, FallbackSource};

const SYSTEM_PROMPT: &str = "You are a research assistant for evidence-based \
natural medicine. The literature search for the user's query returned few or \
no results. Reply with a JSON object with exactly these keys: \"summary\" (a \
concise, neutral overview of what is known about the topic, at most 150 \
words), \"suggested_terms\" (up to 5 alternative PubMed search terms) and \
\"related_topics\" (up to 5 related research topics). Do not give medical \
advice.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Structured answer the service is asked to produce
#[derive(Debug, Default, Deserialize)]
struct FallbackPayload {
    #[serde(default, alias = "ai_summary")]
    summary: String,
    #[serde(default)]
    suggested_terms: Vec<String>,
    #[serde(default)]
    related_topics: Vec<String>,
}

/// Client for the generative fallback service
#[derive(Clone)]
pub struct FallbackClient {
    client: Client,
    config: FallbackConfig,
}

impl FallbackClient {
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be built.
    pub fn new(config: FallbackConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    pub fn config(&self) -> &FallbackConfig {
        &self.config
    }

    /// Ask the service to explain `query`, optionally with extra `context`
    /// (for example what the literal search returned)
    ///
    /// # Errors
    ///
    /// * `SearchError::InvalidQuery` - If `query` is blank
    /// * `SearchError::FallbackUnavailable` - If the service is not configured,
    ///   unreachable, times out, answers with a non-success status or returns
    ///   no content
    #[instrument(skip(self, context), fields(query = %query))]
    pub async fn augment(&self, query: &str, context: Option<&str>) -> Result<FallbackResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery(
                "fallback query cannot be empty".to_string(),
            ));
        }

        let (endpoint, api_key) = match (&self.config.endpoint, &self.config.api_key) {
            (Some(endpoint), Some(api_key)) if self.config.is_configured() => {
                (endpoint.trim(), api_key.trim())
            }
            _ => {
                return Err(SearchError::fallback_unavailable(
                    "fallback service is not configured",
                ));
            }
        };

        let url = format!("{}/chat/completions", endpoint.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(query, context),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        debug!(model = %self.config.model, "Requesting fallback completion");
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Fallback request failed");
                SearchError::fallback_unavailable(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Fallback service answered with status: {}", status);
            return Err(SearchError::fallback_unavailable(format!(
                "service answered HTTP {}",
                status.as_u16()
            )));
        }

        let reply: ChatResponse = response.json().await.map_err(|e| {
            SearchError::fallback_unavailable(format!("unreadable service response: {}", e))
        })?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| SearchError::fallback_unavailable("service returned no content"))?;

        let payload = decode_payload(&content);
        info!(
            suggested_terms = payload.suggested_terms.len(),
            related_topics = payload.related_topics.len(),
            "Fallback answer received"
        );

        Ok(FallbackResult {
            query: query.to_string(),
            summary: payload.summary,
            suggested_terms: payload.suggested_terms,
            related_topics: payload.related_topics,
            source: FallbackSource::AiAssisted,
        })
    }
}

fn user_prompt(query: &str, context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!("Query: {}\nContext: {}", query, context),
        None => format!("Query: {}", query),
    }
}

/// Read the reply as the requested JSON object, tolerating prose or code
/// fences around it; anything else becomes the summary verbatim
fn decode_payload(content: &str) -> FallbackPayload {
    let content = content.trim();

    if let Ok(payload) = serde_json::from_str::<FallbackPayload>(content) {
        return payload;
    }

    if let (Some(start), Some(end)) = (content.find('{'), content.rfind('}')) {
        if start < end {
            if let Ok(payload) = serde_json::from_str::<FallbackPayload>(&content[start..=end]) {
                return payload;
            }
        }
    }

    debug!("Fallback reply is not JSON, using it as the summary");
    FallbackPayload {
        summary: content.to_string(),
        ..FallbackPayload::default()
    }
}
