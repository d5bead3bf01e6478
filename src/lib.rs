//! # symptomatch
//!
//! Matches a free-text description of symptoms against a disease catalog and
//! returns ranked candidate diseases with similarity scores, categories and
//! treatments.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! symptomatch match --catalog Diseases_Symptoms.csv --symptoms "fever, cough, fatigue"
//! symptomatch serve --catalog Diseases_Symptoms.csv --http-port 6340
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use symptomatch::prelude::*;
//!
//! let catalog = Catalog::sample();
//! let matcher = Matcher::new(MatchConfig::default());
//! let results = matcher.find_matches("fever and a cough", &catalog);
//! assert_eq!(results[0].disease_name, "Flu");
//! ```
//!
//! ## Crate Structure
//!
//! - [`symptomatch-core`](symptomatch_core) - Records, catalog, normalization, categories, term vectors
//! - [`symptomatch-similarity`](symptomatch_similarity) - Scorers, ranking strategies, match responses
//! - [`symptomatch-storage`](symptomatch_storage) - CSV loading, source-keyed cache, active catalog
//! - [`symptomatch-api`](symptomatch_api) - REST API

// Re-export core types
pub use symptomatch_core::{
    categorize, normalize, predict_query_category, Catalog, CatalogEntry, Category, DiseaseCode,
    DiseaseRecord, Error, Result, TermVector,
};

// Re-export matching
pub use symptomatch_similarity::{
    find_matches, MatchConfig, MatchResponse, MatchResult, MatchStats, Matcher, RankingStrategy,
    Scorer,
};

// Re-export storage
pub use symptomatch_storage::{CatalogCache, CatalogInfo, CatalogManager, CatalogSource};

// Re-export API
pub use symptomatch_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, Category, DiseaseRecord, Error, Result,
        MatchConfig, MatchResult, Matcher, RankingStrategy, Scorer,
        CatalogManager, CatalogSource,
    };
}
