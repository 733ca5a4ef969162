//! EFetch batch document parser
//!
//! [`parse_batch`] turns one `PubmedArticleSet` document into normalised
//! [`Article`] values. The document is first checked for well-formedness as a
//! whole; each record is then deserialized on its own so that one bad record
//! costs only itself.
//!
//! Field normalisation:
//!
//! | Field | Source, in order | Placeholder |
//! |-------|------------------|-------------|
//! | title | `ArticleTitle` | `No title` |
//! | journal | `Journal/Title`, `Journal/ISOAbbreviation`, `MedlineTA` | `Unknown Journal` |
//! | year | `PubDate/Year`, first four characters of `PubDate/MedlineDate` | empty |
//! | abstract | `AbstractText` sections as `Label: text`, cut at 1000 characters | `No abstract available.` |
//! | authors | `LastName` plus `ForeName` (or `Initials`), at most five | `Unknown` |
//! | doi | `ArticleId[@IdType=doi]`, `ELocationID[@EIdType=doi]` | none |
//! | pmcid | `ArticleId[@IdType=pmc]` | none |

mod batch;
mod converters;
mod deserializers;
pub mod extractors;
mod preprocessing;
mod xml_types;

use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::models::Article;

use self::xml_types::PubmedArticleXml;

/// Parse an EFetch XML batch into articles
///
/// A blank document yields no articles. Records without a PMID, or that the
/// deserializer rejects, are skipped with a warning.
///
/// # Errors
///
/// Returns [`crate::SearchError::XmlError`] when the document is not
/// well-formed or its root is not `PubmedArticleSet`. No partial results are
/// returned in that case.
///
/// # Example
///
/// ```
/// use evidence_search::parser::parse_batch;
///
/// let xml = r#"<PubmedArticleSet>
///   <PubmedArticle>
///     <MedlineCitation>
///       <PMID Version="1">31978945</PMID>
///       <Article>
///         <Journal><Title>Nutrients</Title></Journal>
///         <ArticleTitle>Curcumin and joint pain</ArticleTitle>
///       </Article>
///     </MedlineCitation>
///   </PubmedArticle>
/// </PubmedArticleSet>"#;
///
/// let articles = parse_batch(xml).unwrap();
/// assert_eq!(articles.len(), 1);
/// assert_eq!(articles[0].id, "31978945");
/// assert_eq!(articles[0].journal, "Nutrients");
/// assert_eq!(articles[0].abstract_text, "No abstract available.");
/// ```
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_batch(xml: &str) -> Result<Vec<Article>> {
    if xml.trim().is_empty() {
        debug!("Empty batch document, nothing to parse");
        return Ok(Vec::new());
    }

    let cleaned = preprocessing::strip_inline_html_tags(xml);
    let records = batch::split_records(&cleaned)?;

    let mut articles = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for (index, record) in records.iter().enumerate() {
        match quick_xml::de::from_str::<PubmedArticleXml>(record) {
            Ok(parsed) => match parsed.into_article() {
                Some(article) => articles.push(article),
                None => {
                    skipped += 1;
                    warn!(record = index, "Skipping record without PMID");
                }
            },
            Err(e) => {
                skipped += 1;
                warn!(record = index, error = %e, "Skipping record that failed to deserialize");
            }
        }
    }

    info!(
        records = records.len(),
        parsed = articles.len(),
        skipped,
        "Parsed batch document"
    );

    Ok(articles)
}
