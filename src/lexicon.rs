//! Curated vocabulary of correctly-spelled domain terms
//!
//! The lexicon is the target pool for [`crate::corrector::QueryCorrector`].
//! It holds single-word supplement, botanical and compound names together with
//! the study-design vocabulary users commonly type into a literature search.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

/// Terms bundled with the crate, in tie-break order
const BUILTIN_TERMS: &[&str] = &[
    // Supplements, botanicals and compounds
    "curcumin",
    "turmeric",
    "ashwagandha",
    "ginseng",
    "ginkgo",
    "berberine",
    "magnesium",
    "resveratrol",
    "probiotics",
    "probiotic",
    "shilajit",
    "apigenin",
    "theanine",
    "quercetin",
    "elderberry",
    "creatine",
    "spirulina",
    "chlorella",
    "glycine",
    "cordyceps",
    "reishi",
    "chaga",
    "rhodiola",
    "hericium",
    "collagen",
    "cacao",
    "maca",
    "tongkat",
    "papaya",
    "melatonin",
    "thiamine",
    "riboflavin",
    "niacin",
    "biotin",
    "folate",
    "cobalamin",
    "pyridoxine",
    "ascorbic",
    "tocopherol",
    "zinc",
    "selenium",
    "iron",
    "calcium",
    "potassium",
    "iodine",
    "omega-3",
    "coenzyme",
    "ubiquinol",
    "vitamin",
    "glucosamine",
    "chondroitin",
    "boswellia",
    "ginger",
    "garlic",
    "cinnamon",
    "echinacea",
    "valerian",
    "chamomile",
    "lavender",
    "saffron",
    "fenugreek",
    "moringa",
    "astaxanthin",
    "lutein",
    "zeaxanthin",
    "lycopene",
    "sulforaphane",
    "fisetin",
    "spermidine",
    "taurine",
    "carnitine",
    "arginine",
    "citrulline",
    "glutamine",
    "inositol",
    "choline",
    "nicotinamide",
    "psilocybin",
    "cannabidiol",
    "kratom",
    "kombucha",
    "polyphenols",
    "flavonoids",
    "antioxidants",
    "triphala",
    "brahmi",
    "guduchi",
    "neem",
    "tulsi",
    "amla",
    // Study design and evidence vocabulary
    "randomized",
    "randomised",
    "controlled",
    "clinical",
    "trial",
    "trials",
    "placebo",
    "double-blind",
    "meta-analysis",
    "systematic",
    "review",
    "cohort",
    "observational",
    "longitudinal",
    "prospective",
    "retrospective",
    "case-control",
    "supplementation",
    "efficacy",
    "safety",
    "dosage",
    // Frequent indications
    "inflammation",
    "anxiety",
    "depression",
    "insomnia",
    "cognition",
    "cognitive",
    "dementia",
    "alzheimer",
    "parkinson",
    "diabetes",
    "obesity",
    "hypertension",
    "cholesterol",
    "arthritis",
    "osteoarthritis",
    "cancer",
    "immunity",
    "fatigue",
    "menopause",
    "fertility",
    "testosterone",
    "microbiome",
];

/// Case-insensitive set of known terms
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    terms: Vec<String>,
    index: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from arbitrary terms
    ///
    /// Terms are trimmed and lowercased; blanks and duplicates are dropped and
    /// first-seen order is kept.
    ///
    /// # Example
    ///
    /// ```
    /// use evidence_search::Lexicon;
    ///
    /// let lexicon = Lexicon::from_terms(["Curcumin", "curcumin", "Ginseng"]);
    /// assert_eq!(lexicon.len(), 2);
    /// assert!(lexicon.contains("CURCUMIN"));
    /// ```
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::default();
        for term in terms {
            let normalized = term.as_ref().trim().to_lowercase();
            if normalized.is_empty() || lexicon.index.contains(&normalized) {
                continue;
            }
            lexicon.index.insert(normalized.clone());
            lexicon.terms.push(normalized);
        }
        lexicon
    }

    /// Shared instance of the bundled vocabulary, built on first use
    pub fn builtin() -> Arc<Lexicon> {
        static BUILTIN: OnceLock<Arc<Lexicon>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| Arc::new(Lexicon::from_terms(BUILTIN_TERMS)))
            .clone()
    }

    /// Exact membership, ignoring case
    pub fn contains(&self, term: &str) -> bool {
        self.index.contains(&term.trim().to_lowercase())
    }

    /// Terms in tie-break order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
