//! Search orchestration
//!
//! [`SearchService`] wires the corrector, the filter compiler, the retrieval
//! client and the batch parser into the single `search` operation, and keeps
//! the generative fallback as a separate call.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::corrector::QueryCorrector;
use crate::error::{Result, SearchError};
use crate::fallback::FallbackClient;
use crate::lexicon::Lexicon;
use crate::models::{FallbackResult, SearchResult};
use crate::parser::parse_batch;
use crate::query::{QUALITY_CLAUSE, SearchFilters, compile, condition_query};
use crate::retrieval::{MAX_RESULTS_LIMIT, RetrievalClient};

/// Decide whether a correction is shown to the user
///
/// A suggestion is offered only when a correction exists, it differs from
/// what the user typed, and the original query found fewer than `threshold`
/// results.
///
/// ```
/// use evidence_search::search::suggestion_for;
///
/// assert_eq!(suggestion_for(Some("curcumin"), "curcuminn", 2, 10).as_deref(), Some("curcumin"));
/// assert_eq!(suggestion_for(Some("curcumin"), "curcuminn", 500, 10), None);
/// assert_eq!(suggestion_for(None, "curcumin", 0, 10), None);
/// ```
pub fn suggestion_for(
    correction: Option<&str>,
    original: &str,
    total_count: usize,
    threshold: usize,
) -> Option<String> {
    correction
        .filter(|corrected| corrected.trim() != original.trim())
        .filter(|_| total_count < threshold)
        .map(str::to_string)
}

#[derive(Debug, Clone, Copy)]
enum SearchKind {
    FreeText,
    Condition,
}

/// Entry point for literature searches
///
/// Cloning is cheap: clones share the HTTP connection pools and the lexicon.
///
/// # Example
///
/// ```no_run
/// use evidence_search::{SearchFilters, SearchService, StudyType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let service = SearchService::new();
///     let filters = SearchFilters::new()
///         .date_from("2018")
///         .study_type(StudyType::MetaAnalysis);
///
///     let result = service.search("ashwaghanda anxiety", 20, &filters).await?;
///     if let Some(suggestion) = &result.suggestion {
///         println!("Did you mean: {}?", suggestion);
///     }
///     for article in &result.articles {
///         println!("{} ({}) {}", article.title, article.year, article.source_url);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SearchService {
    retrieval: RetrievalClient,
    corrector: QueryCorrector,
    fallback: Option<FallbackClient>,
    low_result_threshold: usize,
}

impl SearchService {
    /// Service with default configuration and the bundled lexicon
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Service configured from environment variables
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Self {
        Self::with_config(ClientConfig::from_env())
    }

    /// # Panics
    ///
    /// Panics if an underlying HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Self {
        let fallback = config
            .fallback
            .is_configured()
            .then(|| FallbackClient::new(config.fallback.clone()));
        let low_result_threshold = config.low_result_threshold;

        Self {
            retrieval: RetrievalClient::with_config(config),
            corrector: QueryCorrector::new(),
            fallback,
            low_result_threshold,
        }
    }

    /// Replace the lexicon used for query correction
    pub fn with_lexicon(mut self, lexicon: Arc<Lexicon>) -> Self {
        self.corrector = QueryCorrector::with_lexicon(lexicon);
        self
    }

    pub fn retrieval(&self) -> &RetrievalClient {
        &self.retrieval
    }

    pub fn low_result_threshold(&self) -> usize {
        self.low_result_threshold
    }

    /// Whether the fallback service is configured
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Search for `query` narrowed by `filters`
    ///
    /// A blank query returns an empty result without contacting upstream.
    /// The result's `query` is the input as given; a corrected query is only
    /// reported in `suggestion`, never searched.
    ///
    /// # Errors
    ///
    /// * Input errors for invalid filters or `max_results` above 9999
    /// * Retrieval errors from either upstream phase or from parsing the
    ///   batch document
    #[instrument(skip(self, filters), fields(query = %query, max_results = max_results))]
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
        filters: &SearchFilters,
    ) -> Result<SearchResult> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            debug!("Empty query provided, returning empty results");
            return Ok(SearchResult::empty(query));
        }

        self.execute(query, trimmed, max_results, filters, SearchKind::FreeText).await
    }

    /// Search one of the curated condition categories
    ///
    /// Known categories (`cancer`, `neurological`, `cardiovascular`,
    /// `metabolic`, `autoimmune`, `infectious`, `musculoskeletal`) expand to
    /// their MeSH query; anything else is searched verbatim. Condition
    /// searches are always narrowed by [`QUALITY_CLAUSE`] after any filters.
    /// No correction is attempted.
    #[instrument(skip(self, filters), fields(condition = %condition, max_results = max_results))]
    pub async fn search_by_condition(
        &self,
        condition: &str,
        max_results: usize,
        filters: &SearchFilters,
    ) -> Result<SearchResult> {
        if condition.trim().is_empty() {
            return Ok(SearchResult::empty(condition));
        }

        let preset = condition_query(condition);
        self.execute(condition, &preset, max_results, filters, SearchKind::Condition).await
    }

    /// Whether a result is sparse enough that the fallback is worth offering
    pub fn needs_fallback(&self, result: &SearchResult) -> bool {
        result.total_count < self.low_result_threshold
    }

    /// Ask the generative service about `query`
    ///
    /// # Errors
    ///
    /// * `SearchError::InvalidQuery` - If `query` is blank
    /// * `SearchError::FallbackUnavailable` - If no service is configured or
    ///   the call fails
    pub async fn augment_with_fallback(
        &self,
        query: &str,
        context: Option<&str>,
    ) -> Result<FallbackResult> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidQuery(
                "fallback query cannot be empty".to_string(),
            ));
        }

        match &self.fallback {
            Some(fallback) => fallback.augment(query, context).await,
            None => Err(SearchError::fallback_unavailable(
                "fallback service is not configured",
            )),
        }
    }

    async fn execute(
        &self,
        original: &str,
        base_term: &str,
        max_results: usize,
        filters: &SearchFilters,
        kind: SearchKind,
    ) -> Result<SearchResult> {
        filters.validate()?;
        if max_results > MAX_RESULTS_LIMIT {
            return Err(SearchError::SearchLimitExceeded {
                requested: max_results,
                maximum: MAX_RESULTS_LIMIT,
            });
        }

        let (correction, augmentation) = match kind {
            SearchKind::FreeText => (self.corrector.correct(base_term), compile(filters)),
            SearchKind::Condition => (None, compile(filters).with_clause(QUALITY_CLAUSE)),
        };

        let term = augmentation.apply(base_term);
        let resolved = self.retrieval.resolve_ids(&term, max_results).await?;

        let articles = if resolved.ids.is_empty() {
            Vec::new()
        } else {
            let xml = self.retrieval.fetch_details(&resolved.ids).await?;
            parse_batch(&xml)?
        };

        let suggestion = suggestion_for(
            correction.as_deref(),
            base_term,
            resolved.total_count,
            self.low_result_threshold,
        );

        info!(
            total_count = resolved.total_count,
            articles = articles.len(),
            suggested = suggestion.is_some(),
            "Search completed"
        );

        Ok(SearchResult {
            articles,
            total_count: resolved.total_count,
            query: original.to_string(),
            suggestion,
        })
    }
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new()
    }
}
