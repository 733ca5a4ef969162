use serde::{Deserialize, Serialize};

/// Represents a retrieved PubMed article with metadata
///
/// Built once by the batch parser; every field is already normalised (see
/// [`crate::parser`] for placeholders and fallbacks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// PubMed ID
    pub id: String,
    /// Article title
    pub title: String,
    /// Up to five authors, each "Last Fore"
    pub authors: Vec<String>,
    /// Journal name
    pub journal: String,
    /// Four-digit publication year, empty when unknown
    pub year: String,
    /// Abstract text, labeled sections joined and truncated
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// DOI (Digital Object Identifier)
    pub doi: Option<String>,
    /// PubMed Central ID
    pub pmcid: Option<String>,
    /// Article types (e.g., "Clinical Trial", "Review", etc.)
    #[serde(default)]
    pub publication_types: Vec<String>,
    /// Leading MeSH descriptor names
    #[serde(default)]
    pub mesh_terms: Vec<String>,
    /// Link to the article's PubMed page
    pub source_url: String,
}

impl Article {
    /// PubMed page for a PMID
    pub fn source_url_for(id: &str) -> String {
        format!("https://pubmed.ncbi.nlm.nih.gov/{}/", id)
    }
}

/// Outcome of one search request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub articles: Vec<Article>,
    /// Total matches reported upstream; may exceed `articles.len()`
    pub total_count: usize,
    /// The query as the caller sent it, before any correction
    pub query: String,
    /// Corrected query, offered only when the original found little
    pub suggestion: Option<String>,
}

impl SearchResult {
    /// Result for a query that was not sent upstream
    pub fn empty(query: &str) -> Self {
        Self {
            articles: Vec::new(),
            total_count: 0,
            query: query.to_string(),
            suggestion: None,
        }
    }
}

/// Provenance tag carried by every fallback answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackSource {
    #[default]
    #[serde(rename = "ai_assisted")]
    AiAssisted,
}

impl FallbackSource {
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackSource::AiAssisted => "ai_assisted",
        }
    }
}

/// Generative explanation offered when literal retrieval is too sparse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackResult {
    pub query: String,
    pub summary: String,
    pub suggested_terms: Vec<String>,
    pub related_topics: Vec<String>,
    pub source: FallbackSource,
}
