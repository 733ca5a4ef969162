//! Field normalisation helpers shared by the record converter
//!
//! Every fallback chain for an article field is written as an ordered list of
//! candidates passed to [`first_present`]; the first non-blank candidate wins.

pub(crate) const NO_TITLE: &str = "No title";
pub(crate) const UNKNOWN_JOURNAL: &str = "Unknown Journal";
pub(crate) const NO_ABSTRACT: &str = "No abstract available.";
pub(crate) const UNKNOWN_AUTHOR: &str = "Unknown";

pub(crate) const MAX_AUTHORS: usize = 5;
pub(crate) const MAX_MESH_TERMS: usize = 5;
pub(crate) const MAX_ABSTRACT_CHARS: usize = 1000;

const TRUNCATION_MARKER: &str = "...";

/// First candidate that is present and not blank, trimmed
///
/// ```
/// use evidence_search::parser::extractors::first_present;
///
/// let journal = first_present([None, Some("  "), Some("Nutrients")]);
/// assert_eq!(journal.as_deref(), Some("Nutrients"));
/// ```
pub fn first_present<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .map(str::to_string)
}

/// Replace every run of whitespace (including newlines from pretty-printed
/// XML) with a single space
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A value that is exactly four ASCII digits
pub(crate) fn four_digit_year(value: &str) -> Option<&str> {
    let value = value.trim();
    (value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit())).then_some(value)
}

/// Year at the start of a free-form `MedlineDate` such as `"2019 Nov-Dec"`
pub(crate) fn leading_year(value: &str) -> Option<&str> {
    let value = value.trim();
    value.get(..4).and_then(four_digit_year)
}

/// Cut `text` to `max_chars` characters and append `...` when it was longer
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// `"Label: text"` for labeled sections, the bare text otherwise
pub(crate) fn format_section(label: Option<&str>, text: &str) -> String {
    match label.map(str::trim).filter(|label| !label.is_empty()) {
        Some(label) => format!("{}: {}", label, text),
        None => text.to_string(),
    }
}
