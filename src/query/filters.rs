//! Filter types for narrowing a search

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Study designs that can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyType {
    /// Clinical trials
    ClinicalTrial,
    /// Meta-analysis
    MetaAnalysis,
    /// Review articles
    Review,
    /// Randomized controlled trials
    RandomizedControlledTrial,
    /// Systematic reviews
    SystematicReview,
    /// Observational studies
    Observational,
    /// Case reports
    CaseReport,
}

impl StudyType {
    /// Publication-type clause understood by ESearch
    pub fn to_query_string(self) -> &'static str {
        match self {
            StudyType::ClinicalTrial => "Clinical Trial[pt]",
            StudyType::MetaAnalysis => "Meta-Analysis[pt]",
            StudyType::Review => "Review[pt]",
            StudyType::RandomizedControlledTrial => "Randomized Controlled Trial[pt]",
            StudyType::SystematicReview => "Systematic Review[pt]",
            StudyType::Observational => "Observational Study[pt]",
            StudyType::CaseReport => "Case Reports[pt]",
        }
    }

    /// Parse the request parameter form (`meta_analysis`, `review`, ...)
    ///
    /// Unknown values, including the UI's `all`, mean "no study-type filter"
    /// and yield `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use evidence_search::StudyType;
    ///
    /// assert_eq!(StudyType::from_param("meta_analysis"), Some(StudyType::MetaAnalysis));
    /// assert_eq!(StudyType::from_param("all"), None);
    /// ```
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clinical_trial" => Some(StudyType::ClinicalTrial),
            "meta_analysis" => Some(StudyType::MetaAnalysis),
            "review" => Some(StudyType::Review),
            "randomized_controlled_trial" => Some(StudyType::RandomizedControlledTrial),
            "systematic_review" => Some(StudyType::SystematicReview),
            "observational" => Some(StudyType::Observational),
            "case_report" => Some(StudyType::CaseReport),
            _ => None,
        }
    }
}

/// Optional constraints applied on top of the free-text query
///
/// Years are kept as the strings the caller supplied; [`SearchFilters::validate`]
/// checks them before they reach the upstream query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Earliest publication year (inclusive)
    #[serde(default)]
    pub date_from: Option<String>,
    /// Latest publication year (inclusive)
    #[serde(default)]
    pub date_to: Option<String>,
    #[serde(default)]
    pub study_type: Option<StudyType>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_from<S: Into<String>>(mut self, year: S) -> Self {
        self.date_from = Some(year.into());
        self
    }

    pub fn date_to<S: Into<String>>(mut self, year: S) -> Self {
        self.date_to = Some(year.into());
        self
    }

    pub fn study_type(mut self, study_type: StudyType) -> Self {
        self.study_type = Some(study_type);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.year_from().is_none() && self.year_to().is_none() && self.study_type.is_none()
    }

    /// Check that both bounds are four-digit years and in order
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("date_from", self.year_from()), ("date_to", self.year_to())] {
            if let Some(year) = value {
                if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
                    return Err(SearchError::InvalidFilter(format!(
                        "{name} must be a four-digit year, got '{year}'"
                    )));
                }
            }
        }

        if let (Some(from), Some(to)) = (self.year_from(), self.year_to()) {
            if from > to {
                return Err(SearchError::InvalidFilter(format!(
                    "date_from ({from}) is after date_to ({to})"
                )));
            }
        }

        Ok(())
    }

    /// Lower bound with blanks treated as absent
    pub(crate) fn year_from(&self) -> Option<&str> {
        non_blank(self.date_from.as_deref())
    }

    /// Upper bound with blanks treated as absent
    pub(crate) fn year_to(&self) -> Option<&str> {
        non_blank(self.date_to.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
