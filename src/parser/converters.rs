//! Conversion from the serde record mirror to [`Article`]

use crate::models::Article;

use super::extractors::{
    MAX_ABSTRACT_CHARS, MAX_AUTHORS, MAX_MESH_TERMS, NO_ABSTRACT, NO_TITLE, UNKNOWN_AUTHOR,
    UNKNOWN_JOURNAL, collapse_whitespace, first_present, format_section, four_digit_year,
    leading_year, truncate_chars,
};
use super::xml_types::{
    AbstractXml, ArticleIdXml, AuthorListXml, AuthorXml, ELocationIdXml, MeshHeadingListXml,
    PubmedArticleXml,
};

impl PubmedArticleXml {
    /// Build the normalised article, or `None` when the record has no PMID
    pub(super) fn into_article(self) -> Option<Article> {
        let citation = self.medline_citation;
        let id = first_present([citation.pmid.as_ref().map(|p| p.value.as_str())])?;

        let article = citation.article.unwrap_or_default();
        let journal = article.journal.unwrap_or_default();
        let pub_date = journal
            .journal_issue
            .and_then(|issue| issue.pub_date)
            .unwrap_or_default();

        let title = first_present([article.article_title.as_ref().map(|t| t.0.as_str())])
        .map(|title| collapse_whitespace(&title))
        .unwrap_or_else(|| NO_TITLE.to_string());

        let journal_name = first_present([
            journal.title.as_deref(),
            journal.iso_abbreviation.as_deref(),
            citation
                .medline_journal_info
                .as_ref()
                .and_then(|info| info.medline_ta.as_deref()),
        ])
        .unwrap_or_else(|| UNKNOWN_JOURNAL.to_string());

        let year = pub_date
            .year
            .as_deref()
            .and_then(four_digit_year)
            .or_else(|| pub_date.medline_date.as_deref().and_then(leading_year))
            .unwrap_or_default()
            .to_string();

        let article_ids = self
            .pubmed_data
            .and_then(|data| data.article_id_list)
            .map(|list| list.ids)
            .unwrap_or_default();

        let doi = first_present([
            article_id(&article_ids, "doi"),
            elocation_id(&article.elocation_ids, "doi"),
        ]);
        let pmcid = first_present([article_id(&article_ids, "pmc")]);

        let publication_types = article
            .publication_type_list
            .map(|list| {
                list.publication_types
                    .iter()
                    .filter_map(|pt| first_present([Some(pt.value.as_str())]))
                    .collect()
            })
            .unwrap_or_default();

        Some(Article {
            source_url: Article::source_url_for(&id),
            id,
            title,
            authors: author_names(article.author_list),
            journal: journal_name,
            year,
            abstract_text: abstract_text(article.abstract_section),
            doi,
            pmcid,
            publication_types,
            mesh_terms: mesh_terms(citation.mesh_heading_list),
        })
    }
}

fn article_id<'a>(ids: &'a [ArticleIdXml], id_type: &str) -> Option<&'a str> {
    ids.iter()
        .find(|id| {
            id.id_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(id_type))
                && !id.value.trim().is_empty()
        })
        .map(|id| id.value.as_str())
}

fn elocation_id<'a>(ids: &'a [ELocationIdXml], id_type: &str) -> Option<&'a str> {
    ids.iter()
        .find(|id| {
            id.id_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(id_type))
                && !id.value.trim().is_empty()
        })
        .map(|id| id.value.as_str())
}

fn author_names(author_list: Option<AuthorListXml>) -> Vec<String> {
    let authors: Vec<String> = author_list
        .map(|list| list.authors)
        .unwrap_or_default()
        .iter()
        .filter_map(author_name)
        .take(MAX_AUTHORS)
        .collect();

    if authors.is_empty() {
        vec![UNKNOWN_AUTHOR.to_string()]
    } else {
        authors
    }
}

fn author_name(author: &AuthorXml) -> Option<String> {
    let last = first_present([author.last_name.as_deref()])?;
    match first_present([author.fore_name.as_deref(), author.initials.as_deref()]) {
        Some(fore) => Some(format!("{} {}", last, fore)),
        None => Some(last),
    }
}

fn abstract_text(section: Option<AbstractXml>) -> String {
    let segments: Vec<String> = section
        .map(|s| s.texts)
        .unwrap_or_default()
        .iter()
        .filter_map(|element| {
            let text = collapse_whitespace(&element.text);
            (!text.is_empty()).then(|| format_section(element.label.as_deref(), &text))
        })
        .collect();

    if segments.is_empty() {
        return NO_ABSTRACT.to_string();
    }

    truncate_chars(&segments.join(" "), MAX_ABSTRACT_CHARS)
}

fn mesh_terms(heading_list: Option<MeshHeadingListXml>) -> Vec<String> {
    heading_list
        .map(|list| list.headings)
        .unwrap_or_default()
        .iter()
        .filter_map(|heading| {
            first_present([heading.descriptor_name.as_ref().map(|d| d.value.as_str())])
        })
        .take(MAX_MESH_TERMS)
        .collect()
}
