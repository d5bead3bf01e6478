use ahash::AHashMap;

/// Sparse term-frequency vector over normalized tokens
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    counts: AHashMap<String, u32>,
    squared_norm: u64,
}

impl TermVector {
    /// Build from already-normalized text (whitespace separated tokens)
    #[must_use]
    pub fn from_normalized(normalized: &str) -> Self {
        let mut counts: AHashMap<String, u32> = AHashMap::new();
        for token in normalized.split_whitespace() {
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
        let squared_norm = counts.values().map(|&c| u64::from(c) * u64::from(c)).sum();
        Self { counts, squared_norm }
    }

    /// Normalize raw text, then build
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_normalized(&crate::normalize::normalize(text))
    }

    /// Number of distinct terms
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of `term`
    #[inline]
    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Total number of tokens
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Sum of count products over shared terms
    pub fn dot(&self, other: &TermVector) -> u64 {
        let (small, large) = if self.dim() <= other.dim() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .counts
            .iter()
            .map(|(term, &c)| u64::from(c) * u64::from(large.count(term)))
            .sum()
    }

    /// Term-frequency cosine similarity in [0.0, 1.0]
    ///
    /// Either side empty yields exactly 0.0.
    #[inline]
    pub fn cosine_similarity(&self, other: &TermVector) -> f32 {
        if self.squared_norm == 0 || other.squared_norm == 0 {
            return 0.0;
        }

        // sqrt(|a|^2 * |b|^2) is exact for identical vectors, so self-similarity is exactly 1.0
        let denominator = (self.squared_norm as f64 * other.squared_norm as f64).sqrt();
        let similarity = self.dot(other) as f64 / denominator;
        similarity.clamp(0.0, 1.0) as f32
    }

    /// Jaccard index over the distinct term sets in [0.0, 1.0]
    ///
    /// An empty union yields exactly 0.0.
    #[inline]
    pub fn jaccard_similarity(&self, other: &TermVector) -> f32 {
        let (small, large) = if self.dim() <= other.dim() {
            (self, other)
        } else {
            (other, self)
        };
        let intersection = small
            .counts
            .keys()
            .filter(|term| large.counts.contains_key(*term))
            .count();
        let union = self.dim() + other.dim() - intersection;

        if union == 0 {
            0.0
        } else {
            intersection as f32 / union as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_counts() {
        let v = TermVector::from_normalized("fever cough fever");
        assert_eq!(v.dim(), 2);
        assert_eq!(v.count("fever"), 2);
        assert_eq!(v.count("cough"), 1);
        assert_eq!(v.count("rash"), 0);
        assert_eq!(v.total(), 3);
    }

    #[test]
    fn test_from_text_normalizes() {
        let v = TermVector::from_text("The FEVER, and the cough!");
        let mut terms: Vec<&str> = v.terms().collect();
        terms.sort_unstable();
        assert_eq!(terms, vec!["cough", "fever"]);
    }

    #[test]
    fn test_cosine_similarity() {
        let a = TermVector::from_normalized("fever cough");
        let b = TermVector::from_normalized("fever cough fatigue");
        // dot = 2, |a| = sqrt(2), |b| = sqrt(3)
        let expected = 2.0 / (2.0f32.sqrt() * 3.0f32.sqrt());
        assert!((a.cosine_similarity(&b) - expected).abs() < 1e-6);
        assert_eq!(a.cosine_similarity(&a), 1.0);
    }

    #[test]
    fn test_cosine_weights_repeats() {
        let a = TermVector::from_normalized("pain pain pain swelling");
        let b = TermVector::from_normalized("pain swelling");
        let c = TermVector::from_normalized("pain swelling swelling swelling");
        assert!(a.cosine_similarity(&b) < 1.0);
        assert!(a.cosine_similarity(&b) > a.cosine_similarity(&c));
    }

    #[test]
    fn test_empty_is_zero() {
        let empty = TermVector::default();
        let v = TermVector::from_normalized("fever");
        assert_eq!(empty.cosine_similarity(&v), 0.0);
        assert_eq!(v.cosine_similarity(&empty), 0.0);
        assert_eq!(empty.cosine_similarity(&empty), 0.0);
        assert_eq!(empty.jaccard_similarity(&empty), 0.0);
        assert_eq!(empty.jaccard_similarity(&v), 0.0);
    }

    #[test]
    fn test_jaccard_similarity() {
        let a = TermVector::from_normalized("fever cough fever");
        let b = TermVector::from_normalized("cough fatigue");
        // {fever, cough} vs {cough, fatigue}: 1 / 3
        assert!((a.jaccard_similarity(&b) - 1.0 / 3.0).abs() < 1e-6);
        // sets are identical even though multisets differ
        let c = TermVector::from_normalized("cough fever");
        assert_eq!(a.jaccard_similarity(&c), 1.0);
        assert!(a.cosine_similarity(&c) < 1.0);
    }
}
