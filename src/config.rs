//! Configuration for the retrieval client, the fallback service and the
//! orchestration policy.

use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const DEFAULT_TOOL: &str = "evidence-search";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_FALLBACK_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_FALLBACK_MODEL: &str = "gpt-4o-mini";

/// Default result count below which a search is considered sparse
pub const DEFAULT_LOW_RESULT_THRESHOLD: usize = 10;

/// Configuration for [`crate::SearchService`] and its collaborators
///
/// # Example
///
/// ```
/// use evidence_search::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_api_key("your_api_key_here")
///     .with_email("researcher@university.edu")
///     .with_timeout(Duration::from_secs(20))
///     .with_low_result_threshold(5);
///
/// assert_eq!(config.low_result_threshold, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// NCBI API key
    pub api_key: Option<String>,
    /// Contact email sent to NCBI with every request
    pub email: Option<String>,
    /// Tool name sent to NCBI with every request
    pub tool: Option<String>,
    /// E-utilities base URL override (used by tests and mirrors)
    pub base_url: Option<String>,
    /// HTTP User-Agent override
    pub user_agent: Option<String>,
    /// Timeout applied to each retrieval phase
    pub timeout: Duration,
    /// Result count below which suggestions are exposed and fallback is advised
    pub low_result_threshold: usize,
    /// Generative fallback service settings
    pub fallback: FallbackConfig,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            api_key: None,
            email: None,
            tool: None,
            base_url: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            low_result_threshold: DEFAULT_LOW_RESULT_THRESHOLD,
            fallback: FallbackConfig::new(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new();

        config.api_key = env::var("NCBI_API_KEY").ok();
        config.email = env::var("NCBI_EMAIL").ok();
        config.tool = env::var("NCBI_TOOL").ok();
        config.base_url = env::var("EVIDENCE_SEARCH_BASE_URL").ok();

        if let Some(threshold) = env::var("EVIDENCE_SEARCH_LOW_RESULT_THRESHOLD")
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            config.low_result_threshold = threshold;
        }

        config.fallback = FallbackConfig::from_env();
        config
    }

    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_low_result_threshold(mut self, threshold: usize) -> Self {
        self.low_result_threshold = threshold;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackConfig) -> Self {
        self.fallback = fallback;
        self
    }

    /// Base URL without a trailing slash
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("evidence-search/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Identification parameters appended to every E-utilities request
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(api_key) = &self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        params.push(("tool".to_string(), self.effective_tool().to_string()));

        params
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for the OpenAI-compatible generative service used by
/// [`crate::fallback::FallbackClient`]
#[derive(Debug, Clone)]
pub struct FallbackConfig {
    /// Base URL; `/chat/completions` is appended
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl FallbackConfig {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: DEFAULT_FALLBACK_MODEL.to_string(),
            timeout: DEFAULT_FALLBACK_TIMEOUT,
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.endpoint = env::var("FALLBACK_API_URL").ok();
        config.api_key = env::var("FALLBACK_API_KEY").ok();
        if let Ok(model) = env::var("FALLBACK_MODEL") {
            config.model = model;
        }
        config
    }

    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Both an endpoint and an API key are required to call the service
    pub fn is_configured(&self) -> bool {
        self.endpoint.as_deref().is_some_and(|e| !e.trim().is_empty())
            && self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self::new()
    }
}
