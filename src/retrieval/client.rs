use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Result, SearchError};

use super::responses::ESearchResult;

/// Largest `retmax` ESearch honours
pub const MAX_RESULTS_LIMIT: usize = 9999;

/// Outcome of the id-resolution phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedIds {
    /// PMIDs in upstream relevance order
    pub ids: Vec<String>,
    /// Total matches upstream; may exceed `ids.len()`
    pub total_count: usize,
    /// How upstream interpreted the term, when reported
    pub query_translation: Option<String>,
}

/// Client for the ESearch and EFetch endpoints
#[derive(Clone)]
pub struct RetrievalClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl RetrievalClient {
    /// Create a retrieval client with default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use evidence_search::RetrievalClient;
    ///
    /// let client = RetrievalClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a retrieval client with custom configuration
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be built (TLS backend
    /// initialisation failure).
    ///
    /// # Example
    ///
    /// ```
    /// use evidence_search::{ClientConfig, RetrievalClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@university.edu");
    ///
    /// let client = RetrievalClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.effective_user_agent())
            .build()
            .expect("Failed to create HTTP client");

        Self::with_client(client, config)
    }

    /// Create a retrieval client around an existing HTTP client
    ///
    /// The timeout and user agent of `client` are used as is.
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        let base_url = config.effective_base_url().to_string();

        Self {
            client,
            base_url,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve a query term to at most `max_results` PMIDs
    ///
    /// # Errors
    ///
    /// * `SearchError::InvalidQuery` - If the term is blank
    /// * `SearchError::SearchLimitExceeded` - If `max_results` is above [`MAX_RESULTS_LIMIT`]
    /// * `SearchError::RequestError` - If the HTTP request fails or times out
    /// * `SearchError::ApiError` - On a non-success status or an `ERROR` payload
    /// * `SearchError::JsonError` - If the response is not ESearch JSON
    ///
    /// # Example
    ///
    /// ```no_run
    /// use evidence_search::RetrievalClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = RetrievalClient::new();
    ///     let resolved = client.resolve_ids("ashwagandha AND sleep", 20).await?;
    ///     println!("{} of {} ids", resolved.ids.len(), resolved.total_count);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(term = %term, max_results = max_results))]
    pub async fn resolve_ids(&self, term: &str, max_results: usize) -> Result<ResolvedIds> {
        if term.trim().is_empty() {
            return Err(SearchError::InvalidQuery(
                "search term cannot be empty".to_string(),
            ));
        }
        if max_results > MAX_RESULTS_LIMIT {
            return Err(SearchError::SearchLimitExceeded {
                requested: max_results,
                maximum: MAX_RESULTS_LIMIT,
            });
        }

        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retmode=json&sort=relevance",
            self.base_url,
            urlencoding::encode(term),
            max_results
        );

        debug!("Making ESearch API request");
        let response = self.make_request(url).await?;
        let body = response.text().await?;
        let search_result: ESearchResult = serde_json::from_str(&body)?;
        let data = search_result.esearchresult;

        if let Some(message) = data.error {
            warn!(error = %message, "ESearch reported an error");
            return Err(SearchError::ApiError {
                status: 200,
                message,
            });
        }

        let total_count = match data.count.as_deref().map(|c| c.trim().parse::<usize>()) {
            Some(Ok(count)) => count,
            Some(Err(_)) | None => {
                warn!(count = ?data.count, "ESearch count missing or not a number");
                data.idlist.len()
            }
        };

        info!(
            total_count,
            ids = data.idlist.len(),
            "Search completed successfully"
        );

        Ok(ResolvedIds {
            ids: data.idlist,
            total_count,
            query_translation: data.querytranslation,
        })
    }

    /// Fetch the batch document for `ids` in one EFetch call
    ///
    /// An empty id list returns an empty document without a request.
    ///
    /// # Errors
    ///
    /// * `SearchError::RequestError` - If the HTTP request fails or times out
    /// * `SearchError::ApiError` - On a non-success status
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn fetch_details(&self, ids: &[String]) -> Result<String> {
        if ids.is_empty() {
            debug!("No ids to fetch, skipping EFetch");
            return Ok(String::new());
        }

        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml&rettype=abstract",
            self.base_url,
            urlencoding::encode(&ids.join(","))
        );

        debug!("Making EFetch API request");
        let response = self.make_request(url).await?;
        let xml = response.text().await?;

        info!(bytes = xml.len(), "Fetched batch document");
        Ok(xml)
    }

    /// Send a GET with the NCBI identification parameters appended and map a
    /// non-success status to `ApiError`
    async fn make_request(&self, mut url: String) -> Result<Response> {
        for (key, value) in self.config.build_api_params() {
            url.push('&');
            url.push_str(&key);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("API request failed with status: {}", status);
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message: format!(
                    "HTTP {}: {}",
                    status,
                    status.canonical_reason().unwrap_or("Unknown error")
                ),
            });
        }

        Ok(response)
    }
}

impl Default for RetrievalClient {
    fn default() -> Self {
        Self::new()
    }
}
