//! Filter compilation into ESearch query syntax
//!
//! [`compile`] turns [`SearchFilters`] into a [`QueryAugmentation`]: a list of
//! clauses that are ANDed onto the user's free-text query. Compilation is pure
//! and never touches the network.

mod conditions;
mod filters;

pub use conditions::{ConditionCategory, QUALITY_CLAUSE, condition_query};
pub use filters::{SearchFilters, StudyType};

/// Lower bound used when only `date_to` is given
const OPEN_RANGE_START: &str = "1800";
/// Upper bound used when only `date_from` is given
const OPEN_RANGE_END: &str = "3000";

/// Extra clauses to AND onto a base query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryAugmentation {
    clauses: Vec<String>,
}

impl QueryAugmentation {
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Append a fixed clause after the compiled filters
    pub fn with_clause(mut self, clause: impl Into<String>) -> Self {
        self.clauses.push(clause.into());
        self
    }

    /// Combine the base query with every clause using AND
    ///
    /// The base is parenthesised so that an `OR` inside it cannot swallow the
    /// filter clauses. Without clauses the base is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use evidence_search::query::{compile, SearchFilters, StudyType};
    ///
    /// let filters = SearchFilters::new()
    ///     .date_from("2020")
    ///     .study_type(StudyType::Review);
    /// let term = compile(&filters).apply("curcumin OR turmeric");
    /// assert_eq!(term, "(curcumin OR turmeric) AND 2020:3000[pdat] AND Review[pt]");
    /// ```
    pub fn apply(&self, base: &str) -> String {
        if self.clauses.is_empty() {
            return base.to_string();
        }

        let mut parts = Vec::with_capacity(self.clauses.len() + 1);
        parts.push(format!("({})", base));
        parts.extend(self.clauses.iter().cloned());
        parts.join(" AND ")
    }
}

/// Translate filters into upstream clauses
///
/// Filters are expected to have passed [`SearchFilters::validate`]; absent
/// bounds produce an open-ended range and an absent study type contributes
/// nothing.
pub fn compile(filters: &SearchFilters) -> QueryAugmentation {
    let mut clauses = Vec::new();

    match (filters.year_from(), filters.year_to()) {
        (None, None) => {}
        (from, to) => clauses.push(format!(
            "{}:{}[pdat]",
            from.unwrap_or(OPEN_RANGE_START),
            to.unwrap_or(OPEN_RANGE_END)
        )),
    }

    if let Some(study_type) = filters.study_type {
        clauses.push(study_type.to_query_string().to_string());
    }

    QueryAugmentation { clauses }
}
