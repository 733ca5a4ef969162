use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchResult {
    pub esearchresult: ESearchData,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ESearchData {
    /// Total matches, sent as a decimal string
    #[serde(default)]
    pub count: Option<String>,
    #[serde(default)]
    pub idlist: Vec<String>,
    #[serde(default)]
    pub querytranslation: Option<String>,
    /// Present when the query itself was rejected
    #[serde(rename = "ERROR", default)]
    pub error: Option<String>,
}
