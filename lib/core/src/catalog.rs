use crate::category::{categorize, Category};
use crate::normalize::normalize;
use crate::record::{DiseaseCode, DiseaseRecord};
use crate::vector::TermVector;
use crate::{Error, Result};
use ahash::AHashMap;
use std::collections::BTreeMap;

/// A catalog row together with the fields derived from it at load time
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    record: DiseaseRecord,
    normalized_symptoms: String,
    terms: TermVector,
    category: Category,
}

impl CatalogEntry {
    fn new(record: DiseaseRecord) -> Self {
        let normalized_symptoms = normalize(record.symptoms_text());
        let terms = TermVector::from_normalized(&normalized_symptoms);
        let category = categorize(&record.name);
        Self {
            record,
            normalized_symptoms,
            terms,
            category,
        }
    }

    #[inline]
    pub fn record(&self) -> &DiseaseRecord {
        &self.record
    }

    #[inline]
    pub fn normalized_symptoms(&self) -> &str {
        &self.normalized_symptoms
    }

    #[inline]
    pub fn terms(&self) -> &TermVector {
        &self.terms
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }
}

/// An immutable, ordered collection of disease records
///
/// Normalized symptom text, term vectors and categories are computed once in
/// [`Catalog::new`] and never rewritten, so a catalog can be shared freely
/// between readers. Replacing a catalog means building a new one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_code: AHashMap<DiseaseCode, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate codes and empty names
    pub fn new(records: Vec<DiseaseRecord>) -> Result<Self> {
        let mut by_code = AHashMap::with_capacity(records.len());
        let mut entries = Vec::with_capacity(records.len());

        for (idx, record) in records.into_iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(Error::EmptyName {
                    code: record.code.to_string(),
                });
            }
            if by_code.insert(record.code.clone(), idx).is_some() {
                return Err(Error::DuplicateCode(record.code.to_string()));
            }
            entries.push(CatalogEntry::new(record));
        }

        Ok(Self { entries, by_code })
    }

    /// The three-row catalog shown as the expected input format
    pub fn sample() -> Self {
        let records = vec![
            DiseaseRecord::new(1u64, "Flu")
                .with_symptoms("fever cough fatigue")
                .with_treatments("rest fluids"),
            DiseaseRecord::new(2u64, "Cold")
                .with_symptoms("runny nose sneezing")
                .with_treatments("medication"),
            DiseaseRecord::new(3u64, "Headache")
                .with_symptoms("head pain")
                .with_treatments("pain relief"),
        ];
        // codes are distinct and names non-empty, so this cannot fail
        Self::new(records).unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in catalog order
    #[inline]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Look up an entry by its code
    pub fn get(&self, code: &DiseaseCode) -> Option<&CatalogEntry> {
        self.by_code.get(code).map(|&idx| &self.entries[idx])
    }

    /// Number of entries per category
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.category).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
