//! Curated MeSH queries for browsing by condition category

use serde::{Deserialize, Serialize};

/// Restricts condition browsing to human, trial or review literature in English
pub const QUALITY_CLAUSE: &str =
    "(humans[MeSH] OR clinical trial[pt] OR review[pt]) AND english[la]";

/// Condition categories with a hand-built upstream query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Cancer,
    Neurological,
    Cardiovascular,
    Metabolic,
    Autoimmune,
    Infectious,
    Musculoskeletal,
}

impl ConditionCategory {
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cancer" => Some(ConditionCategory::Cancer),
            "neurological" => Some(ConditionCategory::Neurological),
            "cardiovascular" => Some(ConditionCategory::Cardiovascular),
            "metabolic" => Some(ConditionCategory::Metabolic),
            "autoimmune" => Some(ConditionCategory::Autoimmune),
            "infectious" => Some(ConditionCategory::Infectious),
            "musculoskeletal" => Some(ConditionCategory::Musculoskeletal),
            _ => None,
        }
    }

    pub fn search_terms(self) -> &'static str {
        match self {
            ConditionCategory::Cancer => {
                "(neoplasms[MeSH] OR cancer[tiab]) AND (complementary therapies[MeSH] OR herbal medicine[MeSH] OR phytotherapy[MeSH])"
            }
            ConditionCategory::Neurological => {
                "(neurodegenerative diseases[MeSH] OR dementia[MeSH] OR alzheimer[tiab] OR parkinson[tiab]) AND (neuroprotection[tiab] OR natural products[MeSH])"
            }
            ConditionCategory::Cardiovascular => {
                "(cardiovascular diseases[MeSH] OR heart diseases[MeSH]) AND (dietary supplements[MeSH] OR phytotherapy[MeSH])"
            }
            ConditionCategory::Metabolic => {
                "(metabolic diseases[MeSH] OR diabetes mellitus[MeSH] OR obesity[MeSH]) AND (herbal medicine[MeSH] OR dietary supplements[MeSH])"
            }
            ConditionCategory::Autoimmune => {
                "(autoimmune diseases[MeSH] OR rheumatoid arthritis[MeSH]) AND (anti-inflammatory agents[MeSH] OR immunomodulation[tiab])"
            }
            ConditionCategory::Infectious => {
                "(communicable diseases[MeSH] OR COVID-19[MeSH] OR viral infections) AND (antiviral agents[MeSH] OR immunomodulation[tiab])"
            }
            ConditionCategory::Musculoskeletal => {
                "(musculoskeletal diseases[MeSH] OR osteoarthritis[MeSH]) AND (dietary supplements[MeSH] OR glucosamine[tiab])"
            }
        }
    }
}

/// Upstream query for a condition name; unknown names are searched verbatim
pub fn condition_query(condition: &str) -> String {
    match ConditionCategory::from_param(condition) {
        Some(category) => category.search_terms().to_string(),
        None => condition.trim().to_string(),
    }
}
