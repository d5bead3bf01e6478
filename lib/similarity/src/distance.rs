//! Similarity scorers for normalized symptom text
//!
//! Both scorers are symmetric, bounded to [0.0, 1.0] and return exactly 0.0
//! when either side has no tokens. Identical inputs score exactly 1.0.
//! `Weighted` also gives 1.0 for proportional term counts ("fever fever"
//! against "fever"), and after rounding to `f32` for counts that are nearly
//! proportional. `Jaccard` gives 1.0 whenever the distinct token sets match.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use symptomatch_core::TermVector;

/// Similarity algorithm used to compare a query with a catalog entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scorer {
    /// Term-frequency cosine similarity
    #[default]
    Weighted,
    /// Jaccard index over distinct tokens
    Jaccard,
}

impl Scorer {
    /// Score two term vectors
    #[inline]
    pub fn score(&self, a: &TermVector, b: &TermVector) -> f32 {
        match self {
            Scorer::Weighted => a.cosine_similarity(b),
            Scorer::Jaccard => a.jaccard_similarity(b),
        }
    }

    /// Score two already-normalized token strings
    pub fn score_text(&self, a: &str, b: &str) -> f32 {
        self.score(&TermVector::from_normalized(a), &TermVector::from_normalized(b))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scorer::Weighted => "weighted",
            Scorer::Jaccard => "jaccard",
        }
    }
}

impl fmt::Display for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scorer {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" | "cosine" | "tf" => Ok(Scorer::Weighted),
            "jaccard" | "overlap" => Ok(Scorer::Jaccard),
            other => Err(ConfigError::UnknownScorer(other.to_string())),
        }
    }
}

/// Term-frequency cosine similarity between two normalized texts
#[inline]
pub fn weighted_similarity(a: &str, b: &str) -> f32 {
    Scorer::Weighted.score_text(a, b)
}

/// Jaccard index between the token sets of two normalized texts
#[inline]
pub fn jaccard_similarity(a: &str, b: &str) -> f32 {
    Scorer::Jaccard.score_text(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use symptomatch_core::normalize;

    const TEXTS: &[&str] = &[
        "",
        "fever",
        "fever cough",
        "fever cough fatigue",
        "cough cough fever",
        "runny nose sneezing",
        "head pain pain",
        "chest pain shortness breath sweating",
    ];

    #[test]
    fn test_bounds_and_symmetry() {
        for scorer in [Scorer::Weighted, Scorer::Jaccard] {
            for a in TEXTS {
                for b in TEXTS {
                    let ab = scorer.score_text(a, b);
                    let ba = scorer.score_text(b, a);
                    assert!((0.0..=1.0).contains(&ab), "{} out of range for {:?} / {:?}", ab, a, b);
                    assert_eq!(ab, ba, "{} not symmetric for {:?} / {:?}", scorer, a, b);
                }
            }
        }
    }

    #[test]
    fn test_self_similarity() {
        for scorer in [Scorer::Weighted, Scorer::Jaccard] {
            for text in TEXTS.iter().filter(|t| !t.is_empty()) {
                assert_eq!(scorer.score_text(text, text), 1.0);
            }
            for text in TEXTS {
                assert_eq!(scorer.score_text("", text), 0.0);
            }
        }
    }

    #[test]
    fn test_when_scores_reach_one() {
        // same set, different multiset
        assert!(weighted_similarity("cough cough fever", "fever cough") < 1.0);
        // proportional counts are parallel vectors
        assert_eq!(weighted_similarity("fever fever", "fever"), 1.0);
        assert_eq!(weighted_similarity("cough cough fever fever", "fever cough"), 1.0);
        assert_eq!(jaccard_similarity("cough cough fever", "fever cough"), 1.0);
        assert!(jaccard_similarity("fever cough", "fever cough fatigue") < 1.0);
    }

    #[test]
    fn test_known_values() {
        let w = weighted_similarity("fever cough", "fever cough fatigue");
        assert!((w - 2.0 / 6.0f32.sqrt()).abs() < 1e-6);

        let j = jaccard_similarity("fever cough", "fever cough fatigue");
        assert!((j - 2.0 / 3.0).abs() < 1e-6);

        assert_eq!(weighted_similarity("fever", "sneezing"), 0.0);
    }

    #[test]
    fn test_scores_normalized_input() {
        let query = normalize("The FEVER and a bad cough!");
        assert_eq!(query, "fever bad cough");
        assert!(weighted_similarity(&query, "fever cough fatigue") > 0.5);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("weighted".parse::<Scorer>().unwrap(), Scorer::Weighted);
        assert_eq!("JACCARD".parse::<Scorer>().unwrap(), Scorer::Jaccard);
        assert!("euclid".parse::<Scorer>().is_err());
        assert_eq!(Scorer::Jaccard.to_string(), "jaccard");
        assert_eq!(Scorer::default(), Scorer::Weighted);
    }
}
