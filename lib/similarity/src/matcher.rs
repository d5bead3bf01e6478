//! Catalog matcher
//!
//! Scores a symptom query against every catalog entry and ranks the
//! results with one of two strategies:
//!
//! - [`StrictFloor`] keeps only entries above the similarity floor.
//! - [`CategoryBiased`] prefers entries in the query's predicted category
//!   and backfills by similarity, below the floor if that is what it takes
//!   to return `top_n` results.
//!
//! Either way the output is ordered by descending similarity with ties kept
//! in catalog order.

use crate::config::{MatchConfig, RankingStrategy};
use crate::distance::Scorer;
use crate::explain::MatchResponse;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;
use symptomatch_core::{
    normalize, predict_query_category, Catalog, CatalogEntry, Category, DiseaseCode, TermVector,
};

/// Catalogs at least this large are scored on the rayon pool
const PARALLEL_THRESHOLD: usize = 4096;

/// One ranked disease for a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub code: DiseaseCode,
    pub disease_name: String,
    pub symptoms_text: String,
    pub treatments_text: String,
    /// Similarity in [0.0, 1.0]
    pub similarity: f32,
    pub category: Category,
}

impl MatchResult {
    fn from_entry(entry: &CatalogEntry, similarity: f32) -> Self {
        let record = entry.record();
        Self {
            code: record.code.clone(),
            disease_name: record.name.clone(),
            symptoms_text: record.symptoms_text().to_string(),
            treatments_text: record.treatments_text().to_string(),
            similarity,
            category: entry.category(),
        }
    }

    /// Similarity as a percentage
    pub fn percent(&self) -> f32 {
        self.similarity * 100.0
    }
}

/// A scored catalog position, before ranking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Position in the catalog
    pub index: usize,
    pub similarity: f32,
    pub category: Category,
}

/// Sort by descending similarity, ties in catalog order
fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by_key(|c| (Reverse(OrderedFloat(c.similarity)), c.index));
}

/// Selects and orders the candidates that make it into the result list
pub trait Ranking {
    /// `candidates` arrive in catalog order; the output is at most `top_n`
    /// long and sorted by descending similarity, ties in catalog order
    fn select(&self, candidates: Vec<Candidate>, top_n: usize) -> Vec<Candidate>;
}

/// Keep only candidates strictly above `floor`
#[derive(Debug, Clone, Copy)]
pub struct StrictFloor {
    pub floor: f32,
}

impl Ranking for StrictFloor {
    fn select(&self, mut candidates: Vec<Candidate>, top_n: usize) -> Vec<Candidate> {
        candidates.retain(|c| c.similarity > self.floor);
        sort_candidates(&mut candidates);
        candidates.truncate(top_n);
        candidates
    }
}

/// Fill `top_n` slots in three passes:
/// 1. entries of `preferred` above the floor
/// 2. any remaining entry above the floor
/// 3. any remaining entry, floor ignored
#[derive(Debug, Clone, Copy)]
pub struct CategoryBiased {
    pub preferred: Category,
    pub floor: f32,
}

impl CategoryBiased {
    fn admits(&self, pass: usize, candidate: &Candidate) -> bool {
        match pass {
            0 => candidate.category == self.preferred && candidate.similarity > self.floor,
            1 => candidate.similarity > self.floor,
            _ => true,
        }
    }
}

impl Ranking for CategoryBiased {
    fn select(&self, mut candidates: Vec<Candidate>, top_n: usize) -> Vec<Candidate> {
        sort_candidates(&mut candidates);

        let mut taken = vec![false; candidates.len()];
        let mut selected = Vec::with_capacity(top_n.min(candidates.len()));

        for pass in 0..3 {
            for (slot, candidate) in candidates.iter().enumerate() {
                if selected.len() >= top_n {
                    break;
                }
                if !taken[slot] && self.admits(pass, candidate) {
                    taken[slot] = true;
                    selected.push(*candidate);
                }
            }
        }

        sort_candidates(&mut selected);
        selected
    }
}

/// Matches symptom queries against a catalog
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Ranked matches for `query`
    ///
    /// An empty catalog or a query that normalizes to nothing yields an
    /// empty list.
    pub fn find_matches(&self, query: &str, catalog: &Catalog) -> Vec<MatchResult> {
        self.run(query, catalog).results
    }

    /// Ranked matches plus the predicted category and summary stats
    pub fn explain(&self, query: &str, catalog: &Catalog) -> MatchResponse {
        let run = self.run(query, catalog);
        MatchResponse::new(run.predicted, run.results, run.scored)
    }

    fn run(&self, query: &str, catalog: &Catalog) -> MatchRun {
        let normalized_query = normalize(query);
        if normalized_query.is_empty() || catalog.is_empty() {
            return MatchRun::default();
        }

        let query_terms = TermVector::from_normalized(&normalized_query);
        let candidates = score_all(self.config.scorer, &query_terms, catalog);
        let scored = candidates.len();
        let top_n = self.config.effective_top_n();

        let (predicted, selected) = match self.config.strategy {
            RankingStrategy::StrictFloor => {
                let ranking = StrictFloor { floor: self.config.floor };
                (None, ranking.select(candidates, top_n))
            }
            RankingStrategy::CategoryBiased => {
                let preferred = predict_query_category(&normalized_query);
                let ranking = CategoryBiased {
                    preferred,
                    floor: self.config.floor,
                };
                (Some(preferred), ranking.select(candidates, top_n))
            }
        };

        let entries = catalog.entries();
        let results = selected
            .into_iter()
            .map(|c| MatchResult::from_entry(&entries[c.index], c.similarity))
            .collect();
        MatchRun {
            predicted,
            results,
            scored,
        }
    }
}

#[derive(Default)]
struct MatchRun {
    predicted: Option<Category>,
    results: Vec<MatchResult>,
    /// Catalog entries that were scored
    scored: usize,
}

/// Score every entry, in catalog order
fn score_all(scorer: Scorer, query_terms: &TermVector, catalog: &Catalog) -> Vec<Candidate> {
    let score = |(index, entry): (usize, &CatalogEntry)| Candidate {
        index,
        similarity: scorer.score(query_terms, entry.terms()),
        category: entry.category(),
    };

    if catalog.len() >= PARALLEL_THRESHOLD {
        catalog.entries().par_iter().enumerate().map(score).collect()
    } else {
        catalog.entries().iter().enumerate().map(score).collect()
    }
}

/// Rank `catalog` against `query` with the default weighted scorer
pub fn find_matches(
    query: &str,
    catalog: &Catalog,
    top_n: usize,
    strategy: RankingStrategy,
) -> Vec<MatchResult> {
    let config = MatchConfig::default()
        .with_strategy(strategy)
        .with_top_n(top_n);
    Matcher::new(config).find_matches(query, catalog)
}
