//! # symptomatch Similarity
//!
//! Scores symptom queries against a disease catalog and ranks the results.
//!
//! ## Features
//!
//! - **Two scorers**: term-frequency cosine (`weighted`, default) and Jaccard
//! - **Two ranking strategies**: `strict_floor` and `category_biased`
//! - **Stable ordering**: ties keep catalog order
//! - **Summaries**: predicted category and per-query stats
//!
//! ## Example
//!
//! ```rust
//! use symptomatch_core::{Catalog, DiseaseRecord};
//! use symptomatch_similarity::{Matcher, MatchConfig, RankingStrategy, Scorer};
//!
//! let catalog = Catalog::new(vec![
//!     DiseaseRecord::new(1u64, "Flu").with_symptoms("fever cough fatigue"),
//!     DiseaseRecord::new(2u64, "Cold").with_symptoms("runny nose sneezing"),
//! ]).unwrap();
//!
//! let matcher = Matcher::new(MatchConfig::new(Scorer::Weighted, RankingStrategy::StrictFloor));
//! let results = matcher.find_matches("fever and cough", &catalog);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].disease_name, "Flu");
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Query     │────>│  Normalize  │────>│ TermVector  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!       ┌─────────────┐     ┌─────────────┐      │
//!       │   Catalog   │────>│   Scorer    │<─────┘
//!       │ (memoized)  │     │ (per entry) │
//!       └─────────────┘     └─────────────┘
//!                                  │
//!                           ┌─────────────┐
//!                           │   Ranking   │
//!                           │ (strategy)  │
//!                           └─────────────┘
//! ```

pub mod config;
pub mod distance;
pub mod explain;
pub mod matcher;

pub use config::{
    ConfigError, MatchConfig, RankingStrategy, DEFAULT_BIASED_TOP_N, DEFAULT_STRICT_TOP_N,
    SIMILARITY_FLOOR,
};
pub use distance::{jaccard_similarity, weighted_similarity, Scorer};
pub use explain::{MatchResponse, MatchStats};
pub use matcher::{find_matches, Candidate, CategoryBiased, MatchResult, Matcher, Ranking, StrictFloor};
