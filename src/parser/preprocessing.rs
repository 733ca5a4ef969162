//! Cleanup applied to the EFetch document before it is split into records

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Remove inline markup (`<i>`, `<sup>`, `<sub>`, `<b>` and friends) while
/// keeping the enclosed text
///
/// Titles and abstract sections carry these tags as mixed content, which the
/// serde mirror cannot map onto a plain string. Tags with attributes are
/// removed too; structural elements are never touched.
pub(crate) fn strip_inline_html_tags(xml: &str) -> String {
    static INLINE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = INLINE_TAG_REGEX.get_or_init(|| {
        Regex::new(r"</?(?:i|b|u|sup|sub|em|strong|italic|bold)(?:\s[^>]*)?>")
            .expect("Failed to compile inline tag regex")
    });

    let cleaned = re.replace_all(xml, "");

    if cleaned.len() != xml.len() {
        debug!(
            original_bytes = xml.len(),
            cleaned_bytes = cleaned.len(),
            "Stripped inline formatting tags"
        );
    }

    cleaned.into_owned()
}
