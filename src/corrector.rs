//! Lexical spell correction against the domain lexicon
//!
//! The corrector is a pure string function: it always reports its best guess
//! and leaves the decision of whether to show it to the caller (see
//! [`crate::search::suggestion_for`]).

use std::sync::{Arc, OnceLock};

use regex::{Captures, Regex};
use tracing::debug;

use crate::lexicon::Lexicon;

/// Queries shorter than this (after trimming) are never corrected
pub const MIN_QUERY_LEN: usize = 3;

/// Tokens shorter than this are left untouched
const MIN_TOKEN_LEN: usize = 3;

/// Tokens at least this long tolerate two edits instead of one
const LONG_TOKEN_LEN: usize = 6;

const BOOLEAN_OPERATORS: [&str; 3] = ["AND", "OR", "NOT"];

/// Proposes at most one corrected query using Levenshtein distance
///
/// # Example
///
/// ```
/// use evidence_search::QueryCorrector;
///
/// let corrector = QueryCorrector::new();
/// assert_eq!(corrector.correct("curcuminn").as_deref(), Some("curcumin"));
/// assert_eq!(corrector.correct("curcumin"), None);
/// ```
#[derive(Debug, Clone)]
pub struct QueryCorrector {
    lexicon: Arc<Lexicon>,
}

impl QueryCorrector {
    /// Corrector over the bundled lexicon
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::builtin())
    }

    pub fn with_lexicon(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Return the query with misspelled tokens replaced, or `None` when
    /// nothing needed (or could be given) a correction
    ///
    /// Only word tokens are considered; whitespace, field tags such as
    /// `[pt]`, quotes and parentheses are carried over verbatim.
    pub fn correct(&self, query: &str) -> Option<String> {
        if query.trim().chars().count() < MIN_QUERY_LEN {
            return None;
        }

        let mut changed = false;
        let corrected = token_regex().replace_all(query, |caps: &Captures| {
            let token = &caps[0];
            match self.correct_token(token) {
                Some(term) => {
                    changed = true;
                    match_case(token, term)
                }
                None => token.to_string(),
            }
        });

        if changed {
            debug!(original = %query, corrected = %corrected, "Query correction found");
            Some(corrected.into_owned())
        } else {
            None
        }
    }

    /// Closest lexicon term for a single token, within the edit budget
    ///
    /// Returns `None` for short tokens, boolean operators and tokens that are
    /// already lexicon members. Equal distances resolve to the earlier term.
    pub fn correct_token(&self, token: &str) -> Option<&str> {
        let token_len = token.chars().count();
        if token_len < MIN_TOKEN_LEN
            || BOOLEAN_OPERATORS
                .iter()
                .any(|op| op.eq_ignore_ascii_case(token))
        {
            return None;
        }

        let lowered = token.to_lowercase();
        if self.lexicon.contains(&lowered) {
            return None;
        }

        let budget = max_distance(token_len);
        let mut best: Option<(&str, usize)> = None;

        for term in self.lexicon.terms() {
            if term.chars().count().abs_diff(token_len) > budget {
                continue;
            }
            let distance = strsim::levenshtein(&lowered, term);
            if distance <= budget && best.is_none_or(|(_, d)| distance < d) {
                best = Some((term, distance));
            }
        }

        best.map(|(term, _)| term)
    }
}

impl Default for QueryCorrector {
    fn default() -> Self {
        Self::new()
    }
}

fn max_distance(token_len: usize) -> usize {
    if token_len >= LONG_TOKEN_LEN { 2 } else { 1 }
}

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"\p{Alphabetic}[\p{Alphabetic}\p{Nd}'\-]*")
            .expect("Failed to compile token regex")
    })
}

/// Carry the casing style of `original` over to `replacement`
fn match_case(original: &str, replacement: &str) -> String {
    let mut letters = original.chars().filter(|c| c.is_alphabetic()).peekable();
    let first_upper = letters.peek().is_some_and(|c| c.is_uppercase());
    let all_upper = first_upper && letters.all(char::is_uppercase);

    if all_upper && original.chars().filter(|c| c.is_alphabetic()).count() > 1 {
        replacement.to_uppercase()
    } else if first_upper {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}
