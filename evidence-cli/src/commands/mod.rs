pub mod condition;
pub mod fallback;
pub mod search;

use std::io::Write;

use anyhow::Result;
use clap::{Args, ValueEnum};
use evidence_search::{ClientConfig, SearchFilters, SearchResult, SearchService, StudyType};

/// Build a service from the environment, with CLI flags taking precedence
pub fn create_search_service(api_key: Option<&str>, email: Option<&str>) -> SearchService {
    let mut config = ClientConfig::from_env();

    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }

    if let Some(email) = email {
        config = config.with_email(email);
    }

    SearchService::with_config(config)
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Accepts the library's parameter names, with `-` or `_` as separator
fn parse_study_type(value: &str) -> std::result::Result<StudyType, String> {
    StudyType::from_param(&value.replace('-', "_")).ok_or_else(|| {
        format!(
            "unknown study type '{value}' (expected one of: clinical-trial, meta-analysis, \
             review, randomized-controlled-trial, systematic-review, observational, case-report)"
        )
    })
}

/// Options shared by the search-style commands
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Maximum number of results to return
    #[arg(short = 'n', long, default_value = "20")]
    pub max_results: usize,

    /// Only articles published from this year onwards
    #[arg(long, value_name = "YEAR")]
    pub date_from: Option<String>,

    /// Only articles published up to this year
    #[arg(long, value_name = "YEAR")]
    pub date_to: Option<String>,

    /// Restrict to one study type
    #[arg(long, value_name = "TYPE", value_parser = parse_study_type)]
    pub study_type: Option<StudyType>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl FilterArgs {
    pub fn filters(&self) -> SearchFilters {
        let mut filters = SearchFilters::new();
        if let Some(year) = &self.date_from {
            filters = filters.date_from(year.as_str());
        }
        if let Some(year) = &self.date_to {
            filters = filters.date_to(year.as_str());
        }
        if let Some(study_type) = self.study_type {
            filters = filters.study_type(study_type);
        }
        filters
    }
}

/// Print a search result in the requested format
pub fn print_search_result(
    service: &SearchService,
    result: &SearchResult,
    format: OutputFormat,
) -> Result<()> {
    let mut stdout = std::io::stdout();

    if format == OutputFormat::Json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(result)?)?;
        return Ok(());
    }

    writeln!(
        stdout,
        "Query: \"{}\" ({} matches, showing {})",
        result.query,
        result.total_count,
        result.articles.len()
    )?;
    if let Some(suggestion) = &result.suggestion {
        writeln!(stdout, "Did you mean: \"{}\"?", suggestion)?;
    }

    for (index, article) in result.articles.iter().enumerate() {
        writeln!(stdout)?;
        writeln!(stdout, "{}. {}", index + 1, article.title)?;
        writeln!(stdout, "   {}", article.authors.join(", "))?;
        if article.year.is_empty() {
            writeln!(stdout, "   {}", article.journal)?;
        } else {
            writeln!(stdout, "   {} ({})", article.journal, article.year)?;
        }
        if !article.publication_types.is_empty() {
            writeln!(stdout, "   Type: {}", article.publication_types.join(", "))?;
        }
        if let Some(doi) = &article.doi {
            writeln!(stdout, "   DOI: {}", doi)?;
        }
        writeln!(stdout, "   {}", article.source_url)?;
    }

    if service.needs_fallback(result) && service.has_fallback() {
        writeln!(stdout)?;
        writeln!(
            stdout,
            "Few results found. Try `evidence-cli fallback \"{}\"` for an AI-assisted overview.",
            result.query
        )?;
    }

    Ok(())
}
