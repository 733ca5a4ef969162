//! Serde mirror of one `<PubmedArticle>` record
//!
//! Only the elements the pipeline reads are declared; everything else in the
//! record is ignored. Nearly every field is optional so that a sparse record
//! still deserializes and the fallbacks in `converters` can apply.

use serde::Deserialize;

use super::deserializers::{AbstractTextElement, MixedText};

#[derive(Debug, Deserialize)]
pub(super) struct PubmedArticleXml {
    #[serde(rename = "MedlineCitation")]
    pub medline_citation: MedlineCitationXml,
    #[serde(rename = "PubmedData", default)]
    pub pubmed_data: Option<PubmedDataXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct MedlineCitationXml {
    #[serde(rename = "PMID", default)]
    pub pmid: Option<TextXml>,
    #[serde(rename = "Article", default)]
    pub article: Option<ArticleXml>,
    #[serde(rename = "MedlineJournalInfo", default)]
    pub medline_journal_info: Option<MedlineJournalInfoXml>,
    #[serde(rename = "MeshHeadingList", default)]
    pub mesh_heading_list: Option<MeshHeadingListXml>,
}

/// Element whose text is wanted regardless of its attributes
#[derive(Debug, Default, Deserialize)]
pub(super) struct TextXml {
    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ArticleXml {
    #[serde(rename = "Journal", default)]
    pub journal: Option<JournalXml>,
    #[serde(rename = "ArticleTitle", default)]
    pub article_title: Option<MixedText>,
    #[serde(rename = "ELocationID", default)]
    pub elocation_ids: Vec<ELocationIdXml>,
    #[serde(rename = "Abstract", default)]
    pub abstract_section: Option<AbstractXml>,
    #[serde(rename = "AuthorList", default)]
    pub author_list: Option<AuthorListXml>,
    #[serde(rename = "PublicationTypeList", default)]
    pub publication_type_list: Option<PublicationTypeListXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct JournalXml {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "ISOAbbreviation", default)]
    pub iso_abbreviation: Option<String>,
    #[serde(rename = "JournalIssue", default)]
    pub journal_issue: Option<JournalIssueXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct JournalIssueXml {
    #[serde(rename = "PubDate", default)]
    pub pub_date: Option<PubDateXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PubDateXml {
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "MedlineDate", default)]
    pub medline_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct MedlineJournalInfoXml {
    #[serde(rename = "MedlineTA", default)]
    pub medline_ta: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct AbstractXml {
    #[serde(rename = "AbstractText", default)]
    pub texts: Vec<AbstractTextElement>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct AuthorListXml {
    #[serde(rename = "Author", default)]
    pub authors: Vec<AuthorXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct AuthorXml {
    #[serde(rename = "LastName", default)]
    pub last_name: Option<String>,
    #[serde(rename = "ForeName", default)]
    pub fore_name: Option<String>,
    #[serde(rename = "Initials", default)]
    pub initials: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PublicationTypeListXml {
    #[serde(rename = "PublicationType", default)]
    pub publication_types: Vec<TextXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct MeshHeadingListXml {
    #[serde(rename = "MeshHeading", default)]
    pub headings: Vec<MeshHeadingXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct MeshHeadingXml {
    #[serde(rename = "DescriptorName", default)]
    pub descriptor_name: Option<TextXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PubmedDataXml {
    #[serde(rename = "ArticleIdList", default)]
    pub article_id_list: Option<ArticleIdListXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ArticleIdListXml {
    #[serde(rename = "ArticleId", default)]
    pub ids: Vec<ArticleIdXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ArticleIdXml {
    #[serde(rename = "@IdType", default)]
    pub id_type: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ELocationIdXml {
    #[serde(rename = "@EIdType", default)]
    pub id_type: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: String,
}
