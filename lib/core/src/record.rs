use serde::{Deserialize, Serialize};

/// A single disease row of a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub code: DiseaseCode,
    pub name: String,
    /// Free-text symptom description; `None` when the cell was empty
    #[serde(default)]
    pub symptoms: Option<String>,
    /// Free-text treatment description; `None` when the cell was empty
    #[serde(default)]
    pub treatments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiseaseCode {
    Integer(u64),
    String(String),
}

impl DiseaseCode {
    /// Parse a raw cell value. Unsigned integers become `Integer`,
    /// everything else is kept verbatim (trimmed) as `String`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<u64>() {
            Ok(i) => DiseaseCode::Integer(i),
            Err(_) => DiseaseCode::String(raw.to_string()),
        }
    }
}

impl std::fmt::Display for DiseaseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiseaseCode::String(s) => write!(f, "{}", s),
            DiseaseCode::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for DiseaseCode {
    fn from(s: String) -> Self {
        DiseaseCode::String(s)
    }
}

impl From<&str> for DiseaseCode {
    fn from(s: &str) -> Self {
        DiseaseCode::String(s.to_string())
    }
}

impl From<u64> for DiseaseCode {
    fn from(i: u64) -> Self {
        DiseaseCode::Integer(i)
    }
}

impl DiseaseRecord {
    #[inline]
    #[must_use]
    pub fn new(code: impl Into<DiseaseCode>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            symptoms: None,
            treatments: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_symptoms(mut self, symptoms: impl Into<String>) -> Self {
        self.symptoms = Some(symptoms.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_treatments(mut self, treatments: impl Into<String>) -> Self {
        self.treatments = Some(treatments.into());
        self
    }

    /// Symptom text, empty when missing
    #[inline]
    pub fn symptoms_text(&self) -> &str {
        self.symptoms.as_deref().unwrap_or("")
    }

    /// Treatment text, empty when missing
    #[inline]
    pub fn treatments_text(&self) -> &str {
        self.treatments.as_deref().unwrap_or("")
    }
}
