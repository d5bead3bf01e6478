//! # symptomatch Core
//!
//! Core library for the symptomatch disease matching engine.
//!
//! This crate provides the fundamental data structures and text processing:
//!
//! - [`DiseaseRecord`] - A typed catalog row (code, name, symptoms, treatments)
//! - [`Catalog`] - Immutable record collection with memoized derived fields
//! - [`normalize()`] - Symptom text normalization
//! - [`categorize`] - Rule-based disease categories
//! - [`TermVector`] - Sparse term-frequency vectors with cosine and Jaccard
//!
//! ## Example
//!
//! ```rust
//! use symptomatch_core::{Catalog, DiseaseRecord, Category, TermVector};
//!
//! let catalog = Catalog::new(vec![
//!     DiseaseRecord::new(1u64, "Flu").with_symptoms("fever cough fatigue"),
//!     DiseaseRecord::new(2u64, "Cold").with_symptoms("runny nose sneezing"),
//! ]).unwrap();
//!
//! let query = TermVector::from_text("Fever and a cough");
//! let flu = &catalog.entries()[0];
//! assert_eq!(flu.category(), Category::Infection);
//! assert!(query.cosine_similarity(flu.terms()) > 0.5);
//! ```

pub mod catalog;
pub mod category;
pub mod error;
pub mod normalize;
pub mod record;
pub mod vector;

pub use catalog::{Catalog, CatalogEntry};
pub use category::{categorize, predict_query_category, Category};
pub use error::{Error, Result};
pub use normalize::{normalize, normalize_opt, tokenize};
pub use record::{DiseaseCode, DiseaseRecord};
pub use vector::TermVector;
