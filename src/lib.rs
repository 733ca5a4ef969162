//! # Evidence Search
//!
//! A literature retrieval pipeline for evidence-based natural medicine
//! research. Free-text (possibly misspelled) queries plus optional date and
//! study-type filters are turned into structured article records retrieved
//! from PubMed via NCBI E-utilities.
//!
//! ## Features
//!
//! - **Query Correction**: Lexicon-based spelling suggestions for supplement
//!   and compound names, offered only when a search finds little
//! - **Filters**: Publication-year ranges and study types compiled into
//!   ESearch syntax
//! - **Two-Phase Retrieval**: ESearch id resolution followed by one batched
//!   EFetch call
//! - **Tolerant Parsing**: One malformed record never costs the whole batch
//! - **AI-Assisted Fallback**: Optional generative summary and alternative
//!   search terms for sparse results
//!
//! ## Quick Start
//!
//! ### Searching for Articles
//!
//! ```no_run
//! use evidence_search::{SearchFilters, SearchService, StudyType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = SearchService::new();
//!
//!     let filters = SearchFilters::new()
//!         .date_from("2020")
//!         .study_type(StudyType::RandomizedControlledTrial);
//!     let result = service.search("turmric knee pain", 10, &filters).await?;
//!
//!     println!("{} matches", result.total_count);
//!     if let Some(suggestion) = &result.suggestion {
//!         println!("Did you mean: {}?", suggestion);
//!     }
//!     for article in &result.articles {
//!         println!("Title: {}", article.title);
//!         println!("Authors: {}", article.authors.join(", "));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Falling Back to an AI-Assisted Answer
//!
//! ```no_run
//! use evidence_search::{ClientConfig, FallbackConfig, SearchFilters, SearchService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new().with_fallback(
//!         FallbackConfig::new()
//!             .with_endpoint("https://api.openai.com/v1")
//!             .with_api_key("your_api_key_here"),
//!     );
//!     let service = SearchService::with_config(config);
//!
//!     let result = service.search("shilajit fatigue", 10, &SearchFilters::new()).await?;
//!     if service.needs_fallback(&result) {
//!         let answer = service.augment_with_fallback(&result.query, None).await?;
//!         println!("[{}] {}", answer.source.as_str(), answer.summary);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod corrector;
pub mod error;
pub mod fallback;
pub mod lexicon;
pub mod models;
pub mod parser;
pub mod query;
pub mod retrieval;
pub mod search;

// Re-export main types for convenience
pub use config::{ClientConfig, FallbackConfig};
pub use corrector::QueryCorrector;
pub use error::{ErrorKind, Result, SearchError};
pub use fallback::FallbackClient;
pub use lexicon::Lexicon;
pub use models::{Article, FallbackResult, FallbackSource, SearchResult};
pub use query::{ConditionCategory, SearchFilters, StudyType};
pub use retrieval::{ResolvedIds, RetrievalClient};
pub use search::SearchService;
