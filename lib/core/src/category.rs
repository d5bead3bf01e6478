//! Rule-based disease categories
//!
//! Two independent keyword tables live here:
//!
//! - [`categorize`] maps a disease *name* to a category by substring
//!   containment, testing categories in [`Category::DECLARED`] order.
//! - [`predict_query_category`] maps a normalized *symptom query* to a
//!   category by counting whole-token hits in a smaller symptom table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Disease category taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Cancer,
    Infection,
    Syndrome,
    Deficiency,
    Poisoning,
    Injury,
    #[serde(rename = "Eye Condition")]
    EyeCondition,
    Cardiovascular,
    Endocrine,
    Neurological,
    Respiratory,
    Gastrointestinal,
    #[serde(rename = "Pain Condition")]
    PainCondition,
    Other,
}

impl Category {
    /// Categories in tie-break order, most specific first. `Other` is not
    /// part of the list; it is the fallback.
    pub const DECLARED: [Category; 13] = [
        Category::Cancer,
        Category::Infection,
        Category::Syndrome,
        Category::Deficiency,
        Category::Poisoning,
        Category::Injury,
        Category::EyeCondition,
        Category::Cardiovascular,
        Category::Endocrine,
        Category::Neurological,
        Category::Respiratory,
        Category::Gastrointestinal,
        Category::PainCondition,
    ];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cancer => "Cancer",
            Self::Infection => "Infection",
            Self::Syndrome => "Syndrome",
            Self::Deficiency => "Deficiency",
            Self::Poisoning => "Poisoning",
            Self::Injury => "Injury",
            Self::EyeCondition => "Eye Condition",
            Self::Cardiovascular => "Cardiovascular",
            Self::Endocrine => "Endocrine",
            Self::Neurological => "Neurological",
            Self::Respiratory => "Respiratory",
            Self::Gastrointestinal => "Gastrointestinal",
            Self::PainCondition => "Pain Condition",
            Self::Other => "Other",
        }
    }

    /// Substring keywords matched against lowercased disease names
    #[must_use]
    pub const fn name_keywords(self) -> &'static [&'static str] {
        match self {
            Self::Cancer => &[
                "cancer", "carcinoma", "tumor", "tumour", "lymphoma", "leukemia",
                "leukaemia", "melanoma", "sarcoma", "neoplasm", "myeloma", "blastoma",
            ],
            Self::Infection => &[
                "infection", "infectious", "virus", "viral", "bacterial", "fungal",
                "influenza", "flu", "sepsis", "tuberculosis", "hepatitis", "pox",
            ],
            Self::Syndrome => &["syndrome"],
            Self::Deficiency => &["deficiency", "deficient", "insufficiency"],
            Self::Poisoning => &["poisoning", "toxicity", "overdose", "venom"],
            Self::Injury => &[
                "injury", "fracture", "burn", "wound", "trauma", "sprain",
                "laceration", "dislocation", "concussion",
            ],
            Self::EyeCondition => &[
                "eye", "ocular", "retina", "cataract", "glaucoma", "conjunctiv",
                "macular", "vision", "blindness",
            ],
            Self::Cardiovascular => &[
                "heart", "cardiac", "cardio", "artery", "arterial", "vascular",
                "hypertension", "aneurysm", "angina", "arrhythmia",
            ],
            Self::Endocrine => &[
                "diabetes", "thyroid", "hormone", "adrenal", "pituitary", "endocrine",
                "insulin",
            ],
            Self::Neurological => &[
                "brain", "nerve", "neuro", "epilepsy", "seizure", "migraine",
                "dementia", "alzheimer", "parkinson", "sclerosis", "palsy", "headache",
            ],
            Self::Respiratory => &[
                "lung", "pulmonary", "asthma", "bronch", "pneumonia", "respiratory",
                "copd",
            ],
            Self::Gastrointestinal => &[
                "stomach", "gastric", "gastro", "bowel", "colon", "intestin", "liver",
                "pancrea", "esophag", "ulcer", "crohn",
            ],
            Self::PainCondition => &["pain", "ache", "algia"],
            Self::Other => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::DECLARED
            .iter()
            .copied()
            .chain(std::iter::once(Category::Other))
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Classify a disease by its name
///
/// The first category in [`Category::DECLARED`] order with a keyword
/// contained anywhere in the lowercased name wins. A keyword may match
/// inside an unrelated longer word; that is accepted.
pub fn categorize(disease_name: &str) -> Category {
    let name = disease_name.to_lowercase();
    Category::DECLARED
        .iter()
        .copied()
        .find(|category| {
            category
                .name_keywords()
                .iter()
                .any(|keyword| name.contains(keyword))
        })
        .unwrap_or(Category::Other)
}

/// Symptom keyword table used to guess a query's category, in tie-break order
pub const QUERY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Infection, &["fever", "chills", "infection", "sweating", "swollen"]),
    (Category::Respiratory, &["cough", "breath", "breathing", "wheezing", "sputum", "congestion"]),
    (Category::Cardiovascular, &["chest", "palpitations", "heartbeat", "heart"]),
    (Category::Gastrointestinal, &["stomach", "nausea", "vomiting", "diarrhea", "abdominal", "bloating"]),
    (Category::Neurological, &["headache", "dizziness", "numbness", "seizures", "confusion", "tingling"]),
    (Category::EyeCondition, &["vision", "blurred", "eye", "eyes"]),
    (Category::Endocrine, &["thirst", "urination", "weight"]),
    (Category::PainCondition, &["pain", "ache", "aching", "sore"]),
];

/// Guess the category of a normalized symptom query
///
/// Counts, per category, how many of its symptom keywords occur among the
/// query tokens. The highest count wins; ties go to the category declared
/// first in [`QUERY_KEYWORDS`]. Returns `Other` when nothing matches.
pub fn predict_query_category(normalized_query: &str) -> Category {
    let tokens: Vec<&str> = normalized_query.split_whitespace().collect();

    let mut best = Category::Other;
    let mut best_count = 0usize;
    for (category, keywords) in QUERY_KEYWORDS {
        let count = keywords
            .iter()
            .filter(|keyword| tokens.contains(keyword))
            .count();
        if count > best_count {
            best = *category;
            best_count = count;
        }
    }
    best
}
